//! Command dispatch shared by the prefix and slash paths.
//!
//! Handlers resolve everything Discord-specific (author, replied message)
//! into an `Invocation`, then `dispatch` runs the command against the bot
//! state and returns the replies. Command failures never escape: they are
//! rendered as private replies.

pub mod registry;

use dioxus_logger::tracing;

use crate::{
    error::command::CommandError,
    model::rule::{QuoteResolution, RuleAuthor, RuleRequest},
    service::{
        decision,
        delivery::{fan_out, MessageSink, Payload},
        games::{dice, rps, slots},
        relay::Relayer,
    },
    state::BotState,
};

use registry::CommandKind;

const NO_OUTPUT: &str = "No output.";
const RULE_ADDED: &str = "Rod rule added successfully!";
const MESSAGE_SENT: &str = "Message sent!";

/// A resolved command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub channel_id: u64,
    pub author: RuleAuthor,
    /// Free text after the command name, trimmed.
    pub args: String,
    pub quote: QuoteResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Public(String),
    Private(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Public(text) | Reply::Private(text) => text,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Reply::Private(_))
    }
}

/// Ordered replies to a single command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandResponse {
    pub replies: Vec<Reply>,
}

/// Outbound seams a command may use besides replying.
pub struct CommandEnv<'a> {
    pub state: &'a BotState,
    pub sink: &'a dyn MessageSink,
    pub relayer: &'a dyn Relayer,
}

/// Runs a command and collects its replies.
pub async fn dispatch(
    env: &CommandEnv<'_>,
    kind: CommandKind,
    invocation: Invocation,
) -> CommandResponse {
    tracing::debug!("Dispatching {:?} in channel {}", kind, invocation.channel_id);

    let replies = match run(env, kind, invocation).await {
        Ok(replies) => replies,
        Err(e) => {
            tracing::debug!("Command {:?} failed: {}", kind, e);
            vec![Reply::Private(e.to_string())]
        }
    };

    CommandResponse { replies }
}

async fn run(
    env: &CommandEnv<'_>,
    kind: CommandKind,
    invocation: Invocation,
) -> Result<Vec<Reply>, CommandError> {
    match kind {
        CommandKind::Gen => {
            let result = env.state.generator.invoke().await;
            let text = match result.text() {
                Some(text) => text.to_string(),
                None if result.is_success() => NO_OUTPUT.to_string(),
                None => result.render(env.state.generator.program_name()),
            };
            Ok(vec![Reply::Public(text)])
        }
        CommandKind::Grod => {
            if invocation.args.is_empty() {
                return Err(CommandError::InvalidInput(
                    "Ask me something, like `grod is rod real`.".to_string(),
                ));
            }
            Ok(vec![Reply::Public(decision::is_this_real(&invocation.args))])
        }
        CommandKind::Roll | CommandKind::Slots | CommandKind::Rps | CommandKind::Rpsls => {
            Ok(vec![Reply::Public(play(kind, &invocation.args))])
        }
        CommandKind::RodRule => rod_rule(env, invocation).await,
        CommandKind::Say => say(env, invocation).await,
        CommandKind::Roster => {
            roster(env.state, &invocation.args).map(|text| vec![Reply::Public(text)])
        }
        CommandKind::Help => {
            let prefix = env
                .state
                .config
                .command_prefixes
                .first()
                .map(String::as_str)
                .unwrap_or("!");
            Ok(vec![Reply::Private(registry::help_text(prefix))])
        }
    }
}

/// Seed-free games draw from the thread-local generator.
fn play(kind: CommandKind, args: &str) -> String {
    let mut rng = rand::rng();

    match kind {
        CommandKind::Roll => dice::roll(args, &mut rng),
        CommandKind::Slots => slots::spin(&mut rng).render(),
        CommandKind::Rps => rps::play(args, rps::Variant::Classic, &mut rng),
        _ => rps::play(args, rps::Variant::Extended, &mut rng),
    }
}

async fn rod_rule(
    env: &CommandEnv<'_>,
    invocation: Invocation,
) -> Result<Vec<Reply>, CommandError> {
    let config = &env.state.config;
    let request = RuleRequest {
        channel_id: invocation.channel_id,
        text: invocation.args,
        author: invocation.author,
        quote: invocation.quote,
    };

    let created = env
        .state
        .rules
        .create_rule(request, &env.state.generator, config.rules_channel_id)
        .await?;

    let report = fan_out(
        env.sink,
        &config.rule_post_channel_ids,
        Some(invocation.channel_id),
        Payload::Rule(&created.embed),
    )
    .await;

    tracing::info!(
        "Rule {} posted to {} channels ({} failed)",
        created.number,
        report.delivered.len(),
        report.failed.len()
    );

    let mut replies: Vec<Reply> = created.notices.into_iter().map(Reply::Private).collect();
    if report.delivered.is_empty() && !report.failed.is_empty() {
        replies.push(Reply::Private(format!(
            "Rule {} was saved but could not be posted to any channel.",
            created.number
        )));
    } else {
        replies.push(Reply::Private(RULE_ADDED.to_string()));
    }

    Ok(replies)
}

async fn say(env: &CommandEnv<'_>, invocation: Invocation) -> Result<Vec<Reply>, CommandError> {
    let Some(rod_user_id) = env.state.config.rod_user_id else {
        return Err(CommandError::LookupNotFound(
            "Rod's user ID is not configured.".to_string(),
        ));
    };

    if invocation.args.is_empty() {
        return Err(CommandError::ContentMissing(
            "Tell me what Rod should say.".to_string(),
        ));
    }

    env.relayer
        .relay_as(invocation.channel_id, rod_user_id, &invocation.args)
        .await?;

    Ok(vec![Reply::Private(MESSAGE_SENT.to_string())])
}

fn roster(state: &BotState, section: &str) -> Result<String, CommandError> {
    if state.roster.is_empty() {
        return Err(CommandError::ContentMissing("The roster is empty.".to_string()));
    }

    if section.is_empty() {
        let count = state.roster.count();
        return Ok(format!("There are {} people on the roster.", count));
    }

    let found = state.roster.section(section).ok_or_else(|| {
        CommandError::LookupNotFound(format!("There is no roster section called `{}`.", section))
    })?;

    Ok(format!(
        "There are {} people in {}.",
        found.members.len(),
        found.name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        data::rule_counter::RuleCounterRepository,
        model::roster::Roster,
        service::{
            delivery::test::RecordingSink,
            generator::{GeneratorCommand, GeneratorGateway},
            rule::RuleService,
        },
    };
    use serenity::async_trait;
    use std::{collections::HashMap, sync::Mutex};
    use test_utils::{builder::TestBuilder, context::TestContext, generator::FakeGenerator};

    const RULES_CHANNEL: u64 = 10;

    #[derive(Default)]
    struct RecordingRelayer {
        relayed: Mutex<Vec<(u64, u64, String)>>,
    }

    #[async_trait]
    impl Relayer for RecordingRelayer {
        async fn relay_as(
            &self,
            channel_id: u64,
            user_id: u64,
            text: &str,
        ) -> Result<(), CommandError> {
            self.relayed
                .lock()
                .unwrap()
                .push((channel_id, user_id, text.to_string()));
            Ok(())
        }
    }

    async fn state(test: &TestContext, extra: &[(&str, &str)]) -> BotState {
        let mut vars: HashMap<String, String> = HashMap::from([
            ("DISCORD_BOT_TOKEN".to_string(), "token".to_string()),
            ("RULES_CHANNEL_ID".to_string(), RULES_CHANNEL.to_string()),
            ("RULE_POST_CHANNEL_IDS".to_string(), "10,20,30".to_string()),
        ]);
        for (name, value) in extra {
            vars.insert(name.to_string(), value.to_string());
        }
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        let generator =
            GeneratorGateway::new(GeneratorCommand::from_parts(test.generator_command()).unwrap());
        let rules = RuleService::load(RuleCounterRepository::new(test.rules_file()), vec![])
            .await
            .unwrap();
        let roster = Roster::parse(["# Crew", "alice", "bob", "# Guests", "carol"]);

        BotState::new(config, generator, rules, roster)
    }

    fn invocation(channel_id: u64, args: &str) -> Invocation {
        Invocation {
            channel_id,
            author: RuleAuthor {
                display_name: "alice".to_string(),
                avatar_url: None,
            },
            args: args.to_string(),
            quote: QuoteResolution::None,
        }
    }

    async fn run_command(
        state: &BotState,
        sink: &RecordingSink,
        relayer: &RecordingRelayer,
        kind: CommandKind,
        invocation: Invocation,
    ) -> Vec<Reply> {
        let env = CommandEnv {
            state,
            sink,
            relayer,
        };
        dispatch(&env, kind, invocation).await.replies
    }

    #[tokio::test]
    async fn gen_replies_with_generated_text() {
        let test = TestBuilder::new()
            .with_generator(FakeGenerator::Succeeds("rod rod rod".to_string()))
            .build()
            .unwrap();
        let state = state(&test, &[]).await;

        let replies = run_command(
            &state,
            &RecordingSink::default(),
            &RecordingRelayer::default(),
            CommandKind::Gen,
            invocation(1, ""),
        )
        .await;

        assert_eq!(replies, vec![Reply::Public("rod rod rod".to_string())]);
    }

    #[tokio::test]
    async fn gen_substitutes_empty_output() {
        let test = TestBuilder::new()
            .with_generator(FakeGenerator::Succeeds(String::new()))
            .build()
            .unwrap();
        let state = state(&test, &[]).await;

        let replies = run_command(
            &state,
            &RecordingSink::default(),
            &RecordingRelayer::default(),
            CommandKind::Gen,
            invocation(1, ""),
        )
        .await;

        assert_eq!(replies, vec![Reply::Public(NO_OUTPUT.to_string())]);
    }

    #[tokio::test]
    async fn grod_needs_a_question() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::default();
        let relayer = RecordingRelayer::default();

        let empty = run_command(&state, &sink, &relayer, CommandKind::Grod, invocation(1, ""))
            .await;
        let answered = run_command(
            &state,
            &sink,
            &relayer,
            CommandKind::Grod,
            invocation(1, "is rod real"),
        )
        .await;

        assert!(empty[0].is_private());
        assert_eq!(
            answered,
            vec![Reply::Public(decision::is_this_real("is rod real"))]
        );
    }

    #[tokio::test]
    async fn rod_rule_fans_out_except_origin() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::default();

        let replies = run_command(
            &state,
            &sink,
            &RecordingRelayer::default(),
            CommandKind::RodRule,
            invocation(RULES_CHANNEL, "no running"),
        )
        .await;

        assert_eq!(replies, vec![Reply::Private(RULE_ADDED.to_string())]);
        assert_eq!(
            sink.sent(),
            vec![
                (20, "Rule 1: no running".to_string()),
                (30, "Rule 1: no running".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn rod_rule_reports_when_no_channel_accepts_the_post() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::rejecting(vec![20], vec![30]);

        let replies = run_command(
            &state,
            &sink,
            &RecordingRelayer::default(),
            CommandKind::RodRule,
            invocation(RULES_CHANNEL, "no running"),
        )
        .await;

        assert_eq!(
            replies,
            vec![Reply::Private(
                "Rule 1 was saved but could not be posted to any channel.".to_string()
            )]
        );
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn rod_rule_outside_rules_channel_is_rejected() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::default();

        let replies = run_command(
            &state,
            &sink,
            &RecordingRelayer::default(),
            CommandKind::RodRule,
            invocation(99, "no running"),
        )
        .await;

        assert_eq!(
            replies,
            vec![Reply::Private(CommandError::WrongChannel.to_string())]
        );
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn say_relays_as_rod() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[("ROD_USER_ID", "42")]).await;
        let relayer = RecordingRelayer::default();

        let replies = run_command(
            &state,
            &RecordingSink::default(),
            &relayer,
            CommandKind::Say,
            invocation(5, "hello chat"),
        )
        .await;

        assert_eq!(replies, vec![Reply::Private(MESSAGE_SENT.to_string())]);
        assert_eq!(
            *relayer.relayed.lock().unwrap(),
            vec![(5, 42, "hello chat".to_string())]
        );
    }

    #[tokio::test]
    async fn say_without_rod_is_rejected() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let relayer = RecordingRelayer::default();

        let replies = run_command(
            &state,
            &RecordingSink::default(),
            &relayer,
            CommandKind::Say,
            invocation(5, "hello chat"),
        )
        .await;

        assert!(replies[0].is_private());
        assert!(relayer.relayed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn roster_counts_members() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::default();
        let relayer = RecordingRelayer::default();

        let all = run_command(&state, &sink, &relayer, CommandKind::Roster, invocation(1, ""))
            .await;
        let crew = run_command(&state, &sink, &relayer, CommandKind::Roster, invocation(1, "crew"))
            .await;
        let missing = run_command(
            &state,
            &sink,
            &relayer,
            CommandKind::Roster,
            invocation(1, "pirates"),
        )
        .await;

        assert_eq!(all[0].text(), "There are 3 people on the roster.");
        assert_eq!(crew[0].text(), "There are 2 people in Crew.");
        assert!(missing[0].is_private());
    }

    #[tokio::test]
    async fn games_reply_publicly() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;
        let sink = RecordingSink::default();
        let relayer = RecordingRelayer::default();

        let roll = run_command(&state, &sink, &relayer, CommandKind::Roll, invocation(1, "2d6"))
            .await;
        let slots = run_command(&state, &sink, &relayer, CommandKind::Slots, invocation(1, ""))
            .await;
        let rps = run_command(&state, &sink, &relayer, CommandKind::Rpsls, invocation(1, "spock"))
            .await;

        assert!(roll[0].text().starts_with(":game_die: `2d6`"));
        assert!(slots[0].text().starts_with(":slot_machine:"));
        assert!(rps[0].text().starts_with("You picked 🖖 spock"));
        assert!(!roll[0].is_private());
    }

    #[tokio::test]
    async fn help_renders_the_registry() {
        let test = TestBuilder::new().build().unwrap();
        let state = state(&test, &[]).await;

        let replies = run_command(
            &state,
            &RecordingSink::default(),
            &RecordingRelayer::default(),
            CommandKind::Help,
            invocation(1, ""),
        )
        .await;

        assert_eq!(replies, vec![Reply::Private(registry::help_text("!"))]);
    }
}
