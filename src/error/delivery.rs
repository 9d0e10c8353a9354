use thiserror::Error;

/// Failure to deliver a message to a single Discord destination.
///
/// Delivery errors are always caught per destination when fanning out, so a
/// channel that rejects a message never blocks delivery to the others.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    /// The destination rejected the message (HTTP 403 from Discord).
    #[error("Missing permission to post in channel {0}")]
    PermissionDenied(u64),

    /// The destination does not exist or is not visible to the bot (HTTP 404).
    #[error("Channel {0} not found")]
    NotFound(u64),

    /// Any other Discord API or transport failure.
    #[error("Failed to deliver to channel {channel_id}: {reason}")]
    Other {
        /// Destination channel
        channel_id: u64,
        /// Display form of the underlying error
        reason: String,
    },
}

impl DeliveryError {
    /// Classifies a serenity error for the given destination.
    ///
    /// Maps Discord's HTTP status codes onto the delivery taxonomy: 403 becomes
    /// `PermissionDenied`, 404 becomes `NotFound`, everything else is `Other`.
    pub fn from_serenity(channel_id: u64, err: &serenity::Error) -> Self {
        let status = match err {
            serenity::Error::Http(http_err) => http_err.status_code().map(|s| s.as_u16()),
            _ => None,
        };

        match status {
            Some(403) => Self::PermissionDenied(channel_id),
            Some(404) => Self::NotFound(channel_id),
            _ => Self::Other {
                channel_id,
                reason: err.to_string(),
            },
        }
    }
}
