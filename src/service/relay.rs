use dioxus_logger::tracing;
use serenity::async_trait;

use crate::error::{command::CommandError, delivery::DeliveryError};

/// Name of the webhook Rod speaks through, used for both lookup and creation.
pub const RELAY_WEBHOOK_NAME: &str = "Rod Messages";

/// Posts a message into a channel under another user's name and avatar.
#[async_trait]
pub trait Relayer: Send + Sync {
    async fn relay_as(&self, channel_id: u64, user_id: u64, text: &str)
        -> Result<(), CommandError>;
}

/// Webhooks of a single channel.
#[async_trait]
pub trait WebhookDirectory: Send + Sync {
    type Webhook: Send;

    /// Returns an existing webhook named `name`, if any.
    async fn find_existing(&self, name: &str) -> Result<Option<Self::Webhook>, DeliveryError>;

    /// Creates a webhook named `name` with an optional avatar.
    async fn create_new(
        &self,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<Self::Webhook, DeliveryError>;
}

/// Reuses the channel's relay webhook or creates one.
pub async fn reuse_or_create<D>(
    directory: &D,
    avatar_url: Option<&str>,
) -> Result<D::Webhook, DeliveryError>
where
    D: WebhookDirectory + ?Sized,
{
    if let Some(webhook) = directory.find_existing(RELAY_WEBHOOK_NAME).await? {
        return Ok(webhook);
    }

    tracing::info!("Creating webhook {}", RELAY_WEBHOOK_NAME);
    directory.create_new(RELAY_WEBHOOK_NAME, avatar_url).await
}
