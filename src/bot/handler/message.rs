use dioxus_logger::tracing;
use serenity::all::{Context, Message};

use crate::{
    bot::{
        command::{
            dispatch,
            registry::{self, CommandKind},
            CommandEnv, Invocation,
        },
        http::{rule_author, HttpSink},
    },
    error::delivery::DeliveryError,
    model::rule::QuoteResolution,
    state::BotState,
};

/// Handles prefixed commands in guild and direct messages.
pub async fn handle_message(state: &BotState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some((name, args)) =
        registry::parse_prefixed(&message.content, &state.config.command_prefixes)
    else {
        return;
    };

    let Some(command) = registry::find(name) else {
        tracing::debug!("Ignoring unknown command {}", name);
        return;
    };

    if matches!(command.kind, CommandKind::Gen | CommandKind::RodRule) {
        if let Err(e) = message.channel_id.broadcast_typing(&ctx.http).await {
            tracing::debug!("Failed to start typing in {}: {}", message.channel_id, e);
        }
    }

    let quote = match command.kind {
        CommandKind::RodRule => resolve_quote(&ctx, &message).await,
        _ => QuoteResolution::None,
    };

    let nick = message.author_nick(&ctx).await;
    let invocation = Invocation {
        channel_id: message.channel_id.get(),
        author: rule_author(&message.author, nick),
        args: args.to_string(),
        quote,
    };

    let sink = HttpSink::new(ctx.http.clone());
    let env = CommandEnv {
        state,
        sink: &sink,
        relayer: &sink,
    };
    let response = dispatch(&env, command.kind, invocation).await;

    // Prefix commands cannot reply privately, so every reply goes to the channel.
    for reply in response.replies {
        if let Err(e) = message.reply(&ctx, reply.text()).await {
            tracing::error!(
                "Failed to reply to {} in channel {}: {}",
                command.name,
                message.channel_id,
                e
            );
        }
    }
}

/// Resolves the message the command replied to, if any.
async fn resolve_quote(ctx: &Context, message: &Message) -> QuoteResolution {
    let Some(reference) = &message.message_reference else {
        return QuoteResolution::None;
    };

    let replied = match &message.referenced_message {
        Some(replied) => (**replied).clone(),
        None => {
            let Some(message_id) = reference.message_id else {
                return QuoteResolution::Missing;
            };

            match message.channel_id.message(&ctx.http, message_id).await {
                Ok(replied) => replied,
                Err(e) => {
                    return match DeliveryError::from_serenity(message.channel_id.get(), &e) {
                        DeliveryError::NotFound(_) => QuoteResolution::Missing,
                        _ => QuoteResolution::Failed(e.to_string()),
                    }
                }
            }
        }
    };

    if replied.content.trim().is_empty() {
        return QuoteResolution::Empty;
    }

    let nick = replied.author_nick(ctx).await;
    QuoteResolution::Found {
        author: rule_author(&replied.author, nick),
        content: replied.content,
    }
}
