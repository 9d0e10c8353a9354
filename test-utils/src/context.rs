use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::TestError;

/// File name of the rule counter inside the test directory.
pub const RULES_FILE_NAME: &str = "rules_data.json";
/// File name of the roster inside the test directory.
pub const ROSTER_FILE_NAME: &str = "roster.txt";
/// File name of the fake generator script inside the test directory.
pub const GENERATOR_FILE_NAME: &str = "rod_gen.sh";

/// Test context containing an isolated temporary directory.
///
/// Every file the bot persists (rule counter, rosters, GIF lists) and every fake
/// generator script lives inside the directory, which is deleted when the
/// context is dropped. Keep the context alive for the whole test.
pub struct TestContext {
    /// Temporary directory backing this context.
    dir: TempDir,

    /// Launch command for the fake generator, if one was configured.
    ///
    /// Shaped like the bot's `GENERATOR_COMMAND` (program followed by args).
    generator: Option<Vec<String>>,
}

impl TestContext {
    /// Creates a new test context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a fresh directory
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            generator: None,
        })
    }

    /// Root of the temporary directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `name` inside the temporary directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path of the rule counter file (may not exist yet).
    pub fn rules_file(&self) -> PathBuf {
        self.path(RULES_FILE_NAME)
    }

    /// Path of the roster file (may not exist yet).
    pub fn roster_file(&self) -> PathBuf {
        self.path(ROSTER_FILE_NAME)
    }

    /// Launch command for the configured fake generator.
    ///
    /// Falls back to a program that does not exist, which exercises the
    /// gateway's not-found path.
    pub fn generator_command(&self) -> Vec<String> {
        self.generator.clone().unwrap_or_else(|| {
            vec![self
                .path("missing_rod_gen.exe")
                .to_string_lossy()
                .into_owned()]
        })
    }

    /// Number of completed runs recorded by an exclusive fake generator.
    pub fn generator_runs(&self) -> usize {
        std::fs::read_to_string(self.path("runs.log"))
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    /// Writes a file into the temporary directory.
    ///
    /// # Arguments
    /// - `name` - File name relative to the directory
    /// - `contents` - File contents
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, TestError> {
        let path = self.path(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Records the launch command for a generator script already written.
    pub(crate) fn set_generator(&mut self, script: PathBuf) {
        self.generator = Some(vec![
            "sh".to_string(),
            script.to_string_lossy().into_owned(),
        ]);
    }
}
