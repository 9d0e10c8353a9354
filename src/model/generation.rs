//! Outcome of invoking the external text generator.

/// Guidance shown when the generator executable (or its launcher) is missing.
pub const GENERATOR_NOT_FOUND_MESSAGE: &str =
    "Error: the generator executable was not found. Ensure it is installed and on your PATH, or configure GENERATOR_COMMAND with a full path.";

/// Tagged result of one generator invocation.
///
/// Produced by `GeneratorGateway::invoke` and consumed by callers who format it
/// for display. On-demand commands show `render()` to the requester; scheduled
/// broadcasts only post `Success` text and log everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Process exited with code 0. Text is trimmed and may be empty.
    Success(String),
    /// Process exited unsuccessfully.
    ProcessFailure {
        /// Exit code, `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },
    /// The executable or launcher could not be found on the search path.
    NotFound,
    /// Any other launch or runtime fault.
    UnexpectedError {
        /// Category name of the fault (the `io::ErrorKind` debug name).
        kind: String,
        /// Human readable description.
        description: String,
    },
}

impl GenerationResult {
    /// Returns the generated text when the run succeeded with non-empty output.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Renders the result as a display string.
    ///
    /// Success renders as the generated text itself (possibly empty, callers
    /// substitute their own fallback). Failures render as diagnostics naming
    /// the program so the operator can tell which executable misbehaved.
    ///
    /// # Arguments
    /// - `program` - Display name of the generator executable
    pub fn render(&self, program: &str) -> String {
        match self {
            Self::Success(text) => text.clone(),
            Self::ProcessFailure {
                exit_code: Some(code),
                stderr,
            } => format!("{} exited with code {}:\n{}", program, code, stderr),
            Self::ProcessFailure {
                exit_code: None,
                stderr,
            } => format!("{} was terminated by a signal:\n{}", program, stderr),
            Self::NotFound => GENERATOR_NOT_FOUND_MESSAGE.to_string(),
            Self::UnexpectedError { kind, description } => {
                format!("Error running {}: {} - {}", program, kind, description)
            }
        }
    }
}
