use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents, Http};
use std::sync::Arc;

use crate::{bot::handler::Handler, error::AppError, state::BotState};

/// Builds the Discord client and returns it with its shared HTTP client.
///
/// The HTTP client is handed to the broadcast scheduler so scheduled posts
/// reuse the bot's connection pool and rate limiter.
///
/// # Arguments
/// - `state` - Shared bot state handed to the event handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start, plus its HTTP client
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(state: BotState) -> Result<(Client, Arc<Http>), AppError> {
    // MESSAGE_CONTENT is privileged and must be enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let token = state.config.discord_bot_token.clone();
    let client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the bot until the gateway connection shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
