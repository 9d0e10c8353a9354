//! Serenity implementations of the delivery and relay seams.

use dioxus_logger::tracing;
use serenity::all::{
    ChannelId, CreateAttachment, CreateEmbed, CreateEmbedFooter, CreateMessage, CreateWebhook,
    ExecuteWebhook, Http, User, UserId, Webhook,
};
use serenity::async_trait;
use std::sync::Arc;

use crate::{
    error::{command::CommandError, delivery::DeliveryError},
    model::rule::{RuleAuthor, RuleEmbed},
    service::{
        delivery::MessageSink,
        relay::{reuse_or_create, Relayer, WebhookDirectory},
    },
};

/// Converts a rule embed into a serenity embed builder.
pub fn rule_embed(embed: &RuleEmbed) -> CreateEmbed {
    let mut footer = CreateEmbedFooter::new(&embed.footer_text);
    if let Some(icon_url) = &embed.footer_icon_url {
        footer = footer.icon_url(icon_url);
    }

    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .color(embed.color)
        .footer(footer);
    if let Some(image_url) = &embed.image_url {
        builder = builder.image(image_url);
    }

    builder
}

/// Display identity of a user, preferring their guild nickname.
pub fn rule_author(user: &User, nick: Option<String>) -> RuleAuthor {
    RuleAuthor {
        display_name: nick.unwrap_or_else(|| user.display_name().to_string()),
        avatar_url: user.avatar_url(),
    }
}

/// Posts through the bot's shared HTTP client.
#[derive(Clone)]
pub struct HttpSink {
    http: Arc<Http>,
}

impl HttpSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageSink for HttpSink {
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DeliveryError> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::from_serenity(channel_id, &e))
    }

    async fn send_rule(&self, channel_id: u64, embed: &RuleEmbed) -> Result<(), DeliveryError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(rule_embed(embed)))
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::from_serenity(channel_id, &e))
    }
}

#[async_trait]
impl Relayer for HttpSink {
    async fn relay_as(
        &self,
        channel_id: u64,
        user_id: u64,
        text: &str,
    ) -> Result<(), CommandError> {
        let user = self
            .http
            .get_user(UserId::new(user_id))
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user {}: {}", user_id, e);
                CommandError::LookupNotFound("I couldn't find Rod.".to_string())
            })?;
        let author = rule_author(&user, None);

        let webhooks = ChannelWebhooks {
            http: self.http.clone(),
            channel_id: ChannelId::new(channel_id),
        };
        let webhook = reuse_or_create(&webhooks, author.avatar_url.as_deref()).await?;

        let mut builder = ExecuteWebhook::new()
            .content(text)
            .username(&author.display_name);
        if let Some(avatar_url) = &author.avatar_url {
            builder = builder.avatar_url(avatar_url);
        }

        webhook
            .execute(self.http.as_ref(), false, builder)
            .await
            .map_err(|e| DeliveryError::from_serenity(channel_id, &e))?;

        Ok(())
    }
}

/// Webhooks of one channel.
pub struct ChannelWebhooks {
    http: Arc<Http>,
    channel_id: ChannelId,
}

#[async_trait]
impl WebhookDirectory for ChannelWebhooks {
    type Webhook = Webhook;

    async fn find_existing(&self, name: &str) -> Result<Option<Webhook>, DeliveryError> {
        let webhooks = self
            .channel_id
            .webhooks(&self.http)
            .await
            .map_err(|e| DeliveryError::from_serenity(self.channel_id.get(), &e))?;

        Ok(webhooks
            .into_iter()
            .find(|webhook| webhook.name.as_deref() == Some(name)))
    }

    async fn create_new(
        &self,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<Webhook, DeliveryError> {
        let channel_id = self.channel_id.get();
        let avatar = match avatar_url {
            Some(url) => Some(
                CreateAttachment::url(&self.http, url)
                    .await
                    .map_err(|e| DeliveryError::from_serenity(channel_id, &e))?,
            ),
            None => None,
        };

        let mut builder = CreateWebhook::new(name);
        if let Some(avatar) = &avatar {
            builder = builder.avatar(avatar);
        }

        self.channel_id
            .create_webhook(&self.http, builder)
            .await
            .map_err(|e| DeliveryError::from_serenity(channel_id, &e))
    }
}
