use thiserror::Error;

use crate::error::delivery::DeliveryError;

/// Errors raised while executing a single chat command.
///
/// Every variant's display text is written for the requester: dispatch turns
/// a `CommandError` into a private reply instead of propagating it, so one
/// failing command never disturbs the event loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// A referenced message, user, or roster section does not exist.
    #[error("{0}")]
    LookupNotFound(String),

    /// Discord rejected the operation for lack of permissions.
    #[error("{0}")]
    PermissionDenied(String),

    /// There was nothing to quote, send, or generate.
    #[error("{0}")]
    ContentMissing(String),

    /// Command arguments could not be understood.
    #[error("{0}")]
    InvalidInput(String),

    /// Regular (non-quote) rules were requested outside the rules channel.
    #[error("Regular Rod rules (non-quotes or generated) can only be created in the designated rules channel.")]
    WrongChannel,

    /// Any other Discord failure, already rendered for display.
    #[error("Something went wrong talking to Discord: {0}")]
    Discord(String),
}

impl From<DeliveryError> for CommandError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::PermissionDenied(_) => {
                CommandError::PermissionDenied(
                    "I don't have permission to do that here.".to_string(),
                )
            }
            DeliveryError::NotFound(_) => {
                CommandError::LookupNotFound("I couldn't find that channel.".to_string())
            }
            DeliveryError::Other { reason, .. } => CommandError::Discord(reason),
        }
    }
}
