//! Rule counter repository backed by a small JSON file.
//!
//! The file holds a single record, `{"last_rule_number": N}`. It is read once at
//! startup and fully overwritten after every rule creation (last writer wins).

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// On-disk shape of the rule counter file.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct RuleCounterRecord {
    #[serde(default)]
    last_rule_number: u64,
}

/// Repository providing load and save operations for the persisted rule number.
#[derive(Debug, Clone)]
pub struct RuleCounterRepository {
    path: PathBuf,
}

impl RuleCounterRepository {
    /// Creates a new RuleCounterRepository for the given file path.
    ///
    /// The file does not need to exist yet; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the last rule number.
    ///
    /// # Returns
    /// - `Ok(0)` - The counter file does not exist yet
    /// - `Ok(n)` - The persisted last rule number
    /// - `Err(AppError::IoErr)` - The file exists but could not be read
    /// - `Err(AppError::JsonErr)` - The file is not a valid counter record
    pub async fn load(&self) -> Result<u64, AppError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let record: RuleCounterRecord = serde_json::from_str(&contents)?;

        Ok(record.last_rule_number)
    }

    /// Saves the last rule number, overwriting the whole file.
    ///
    /// # Arguments
    /// - `number` - The rule number to persist
    pub async fn save(&self, number: u64) -> Result<(), AppError> {
        let record = RuleCounterRecord {
            last_rule_number: number,
        };
        let contents = serde_json::to_string(&record)?;

        tokio::fs::write(&self.path, contents).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    #[tokio::test]
    async fn missing_file_loads_as_zero() -> Result<(), AppError> {
        let test = TestBuilder::new().build().unwrap();
        let repo = RuleCounterRepository::new(test.rules_file());

        assert_eq!(repo.load().await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> Result<(), AppError> {
        let test = TestBuilder::new().build().unwrap();
        let repo = RuleCounterRepository::new(test.rules_file());

        repo.save(41).await?;
        repo.save(42).await?;

        assert_eq!(repo.load().await?, 42);
        let stored = std::fs::read_to_string(test.rules_file())?;
        assert_eq!(stored, r#"{"last_rule_number":42}"#);

        Ok(())
    }

    #[tokio::test]
    async fn reads_existing_counter_file() -> Result<(), AppError> {
        let test = TestBuilder::new().with_rule_counter(7).build().unwrap();
        let repo = RuleCounterRepository::new(test.rules_file());

        assert_eq!(repo.load().await?, 7);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let test = TestBuilder::new()
            .with_file("rules_data.json", "not json")
            .build()
            .unwrap();
        let repo = RuleCounterRepository::new(test.rules_file());

        assert!(matches!(repo.load().await, Err(AppError::JsonErr(_))));
    }
}
