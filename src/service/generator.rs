use dioxus_logger::tracing;
use std::{io, process::Stdio, sync::Arc};
use tokio::{process::Command, sync::Mutex};

use crate::{error::config::ConfigError, model::generation::GenerationResult};

/// Program and arguments used to launch the external generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GeneratorCommand {
    /// Builds a command from a program followed by its arguments.
    ///
    /// # Returns
    /// - `Ok(GeneratorCommand)` - First element is the program
    /// - `Err(ConfigError::InvalidEnvVar)` - The list was empty
    pub fn from_parts(parts: Vec<String>) -> Result<Self, ConfigError> {
        let mut parts = parts.into_iter();
        let program = parts
            .next()
            .ok_or_else(|| ConfigError::InvalidEnvVar {
                name: "GENERATOR_COMMAND".to_string(),
                value: String::new(),
            })?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Serialized gateway to the external text generator.
///
/// Clones share a single lock, so at most one generator process runs at any
/// time across the whole bot (commands and scheduled broadcasts alike).
/// Waiters are served in arrival order by `tokio::sync::Mutex`.
#[derive(Debug, Clone)]
pub struct GeneratorGateway {
    command: Arc<GeneratorCommand>,
    lock: Arc<Mutex<()>>,
}

impl GeneratorGateway {
    pub fn new(command: GeneratorCommand) -> Self {
        Self {
            command: Arc::new(command),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Display name of the generator program, used when rendering failures.
    pub fn program_name(&self) -> &str {
        &self.command.program
    }

    /// Runs the generator once and classifies the outcome.
    ///
    /// Holds the gateway lock for the entire lifetime of the child process.
    /// The guard is released on every exit path, including launch failures.
    pub async fn invoke(&self) -> GenerationResult {
        let _guard = self.lock.lock().await;

        tracing::debug!("Invoking generator {}", self.command.program);

        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::null())
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!("Generator {} not found", self.command.program);
                return GenerationResult::NotFound;
            }
            Err(e) => {
                tracing::error!("Failed to run generator {}: {}", self.command.program, e);
                return GenerationResult::UnexpectedError {
                    kind: format!("{:?}", e.kind()),
                    description: e.to_string(),
                };
            }
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return GenerationResult::Success(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::error!(
            "Generator {} failed with status {}: {}",
            self.command.program,
            output.status,
            stderr
        );

        GenerationResult::ProcessFailure {
            exit_code: output.status.code(),
            stderr,
        }
    }
}
