//! Fake generator executables for exercising the generator gateway.
//!
//! Each fake is a small POSIX shell script written into the test directory and
//! launched through `sh`, so the gateway sees a real child process with real
//! exit codes and output streams. Launching through `sh` (instead of executing
//! the script file directly) avoids `ETXTBSY` races with files that were just
//! written while other tests fork.

use std::path::Path;

/// Behavior of a fake generator script.
#[derive(Debug, Clone)]
pub enum FakeGenerator {
    /// Prints `stdout` and exits 0.
    Succeeds(String),
    /// Prints `stderr` on standard error and exits with `code`.
    Fails {
        /// Exit code
        code: i32,
        /// Text written to standard error
        stderr: String,
    },
    /// Fails with exit code 3 if another instance is running, otherwise holds
    /// a marker directory for `hold_ms` milliseconds and prints `run`.
    ///
    /// Every completed run appends one line to `runs.log` in the test directory.
    Exclusive {
        /// How long each run holds the marker
        hold_ms: u64,
    },
}

/// Quotes a value for safe inclusion in a POSIX shell script.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

impl FakeGenerator {
    /// Renders the script body for this fake.
    ///
    /// # Arguments
    /// - `dir` - Test directory used for marker and log files
    pub fn script(&self, dir: &Path) -> String {
        match self {
            Self::Succeeds(stdout) => {
                format!("#!/bin/sh\nprintf '%s\\n' {}\n", shell_quote(stdout))
            }
            Self::Fails { code, stderr } => format!(
                "#!/bin/sh\nprintf '%s\\n' {} >&2\nexit {}\n",
                shell_quote(stderr),
                code
            ),
            Self::Exclusive { hold_ms } => {
                let busy = shell_quote(&dir.join("busy").to_string_lossy());
                let log = shell_quote(&dir.join("runs.log").to_string_lossy());
                format!(
                    "#!/bin/sh\n\
                     if ! mkdir {busy} 2>/dev/null; then\n\
                     \techo 'overlapping invocation' >&2\n\
                     \texit 3\n\
                     fi\n\
                     sleep {secs}\n\
                     echo run >> {log}\n\
                     rmdir {busy}\n\
                     printf 'run\\n'\n",
                    busy = busy,
                    log = log,
                    secs = format!("{}.{:03}", hold_ms / 1000, hold_ms % 1000),
                )
            }
        }
    }
}
