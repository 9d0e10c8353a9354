use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponseFollowup, EditInteractionResponse,
    Interaction,
};

use crate::{
    bot::{
        command::{dispatch, registry, CommandEnv, Invocation},
        http::{rule_author, HttpSink},
    },
    model::rule::QuoteResolution,
    state::BotState,
};

/// Handles slash command interactions.
///
/// Defers first (privately for private commands) so slow commands such as
/// generation stay within Discord's response window, then edits the deferred
/// response with the first reply and sends the rest as follow-ups.
pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let Some(descriptor) = registry::find(&command.data.name) else {
        tracing::warn!("Received unknown slash command {}", command.data.name);
        return;
    };

    let deferred = if descriptor.private {
        command.defer_ephemeral(&ctx.http).await
    } else {
        command.defer(&ctx.http).await
    };
    if let Err(e) = deferred {
        tracing::error!("Failed to defer /{}: {}", descriptor.name, e);
        return;
    }

    let invocation = Invocation {
        channel_id: command.channel_id.get(),
        author: rule_author(
            &command.user,
            command.member.as_ref().and_then(|member| member.nick.clone()),
        ),
        args: argument(&command, descriptor.argument.as_ref().map(|arg| arg.name)),
        quote: QuoteResolution::None,
    };

    let sink = HttpSink::new(ctx.http.clone());
    let env = CommandEnv {
        state,
        sink: &sink,
        relayer: &sink,
    };
    let response = dispatch(&env, descriptor.kind, invocation).await;

    let mut replies = response.replies.into_iter();
    let first = replies
        .next()
        .map(|reply| reply.text().to_string())
        .unwrap_or_else(|| "Done.".to_string());

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(first))
        .await
    {
        tracing::error!("Failed to respond to /{}: {}", descriptor.name, e);
        return;
    }

    for reply in replies {
        let followup = CreateInteractionResponseFollowup::new()
            .content(reply.text())
            .ephemeral(reply.is_private());
        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            tracing::error!("Failed to send follow-up for /{}: {}", descriptor.name, e);
        }
    }
}

/// Trimmed value of the command's string option, or empty.
fn argument(command: &CommandInteraction, name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .unwrap_or_default()
        .trim()
        .to_string()
}
