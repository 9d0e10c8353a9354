//! Error types for the bot.
//!
//! This module provides the bot's error hierarchy. `AppError` is the top-level
//! error returned from startup, the CLI, and the scheduler; it wraps the
//! concern-specific errors below. Errors raised inside a single command are
//! `CommandError`s and are rendered to the requester rather than propagated.

pub mod command;
pub mod config;
pub mod delivery;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates all possible error types that can stop startup or a background
/// task. Most variants use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Filesystem error while reading or writing persisted state.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed JSON in the persisted rule counter.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
