//! Line-oriented flat file loading.
//!
//! Rosters and GIF lists are plain text with one entry per line. Missing files
//! are reported as `None` so callers can fall back to built-in defaults.

use std::io::ErrorKind;
use std::path::Path;

use crate::{error::AppError, model::roster::Roster};

/// Reads the non-blank, trimmed lines of a file.
///
/// # Returns
/// - `Ok(Some(lines))` - File exists; blank lines removed
/// - `Ok(None)` - File does not exist
/// - `Err(AppError::IoErr)` - Any other read failure
pub async fn read_entries(path: &Path) -> Result<Option<Vec<String>>, AppError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    ))
}

/// Loads and parses a roster file; a missing file yields an empty roster.
pub async fn read_roster(path: &Path) -> Result<Roster, AppError> {
    let lines = read_entries(path).await?.unwrap_or_default();

    Ok(Roster::parse(lines.iter().map(String::as_str)))
}
