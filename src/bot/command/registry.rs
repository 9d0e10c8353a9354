//! Static command registry.
//!
//! Every chat command is described once here. The prefix and slash paths
//! both look commands up in `COMMANDS`, and `help` renders it.

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Gen,
    Grod,
    Roll,
    Slots,
    Rps,
    Rpsls,
    RodRule,
    Say,
    Roster,
    Help,
}

/// Single free-text argument taken by a command.
#[derive(Debug)]
pub struct CommandArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub argument: Option<CommandArgument>,
    /// Replies go only to the requester where Discord allows it.
    pub private: bool,
    pub kind: CommandKind,
}

pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "gen",
        description: "Generate a message like Rod",
        argument: None,
        private: false,
        kind: CommandKind::Gen,
    },
    CommandDescriptor {
        name: "grod",
        description: "Ask grod if something is real!",
        argument: Some(CommandArgument {
            name: "question",
            description: "What grod should judge",
            required: true,
        }),
        private: false,
        kind: CommandKind::Grod,
    },
    CommandDescriptor {
        name: "roll",
        description: "Roll dice, e.g. 2d6, d20 or 3d8+2",
        argument: Some(CommandArgument {
            name: "dice",
            description: "Dice notation (defaults to one six-sided die)",
            required: false,
        }),
        private: false,
        kind: CommandKind::Roll,
    },
    CommandDescriptor {
        name: "slots",
        description: "Spin the slot machine",
        argument: None,
        private: false,
        kind: CommandKind::Slots,
    },
    CommandDescriptor {
        name: "rps",
        description: "Play rock, paper, scissors against Rod",
        argument: Some(CommandArgument {
            name: "hand",
            description: "rock, paper or scissors",
            required: true,
        }),
        private: false,
        kind: CommandKind::Rps,
    },
    CommandDescriptor {
        name: "rpsls",
        description: "Play rock, paper, scissors, lizard, spock against Rod",
        argument: Some(CommandArgument {
            name: "hand",
            description: "rock, paper, scissors, lizard or spock",
            required: true,
        }),
        private: false,
        kind: CommandKind::Rpsls,
    },
    CommandDescriptor {
        name: "rod_rule",
        description: "Create a new Rod rule (or generate one if no text is given)",
        argument: Some(CommandArgument {
            name: "text",
            description: "Rule text; reply to a message to quote it instead",
            required: false,
        }),
        private: true,
        kind: CommandKind::RodRule,
    },
    CommandDescriptor {
        name: "say",
        description: "Send a message as if it was sent by Rod",
        argument: Some(CommandArgument {
            name: "message",
            description: "What Rod should say",
            required: true,
        }),
        private: true,
        kind: CommandKind::Say,
    },
    CommandDescriptor {
        name: "roster",
        description: "Count the people on the roster",
        argument: Some(CommandArgument {
            name: "section",
            description: "Only count this section",
            required: false,
        }),
        private: false,
        kind: CommandKind::Roster,
    },
    CommandDescriptor {
        name: "help",
        description: "List Rod's commands",
        argument: None,
        private: true,
        kind: CommandKind::Help,
    },
];

/// Looks a command up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

/// Splits a prefixed message into `(command name, remaining text)`.
///
/// Returns `None` when the message does not start with one of `prefixes` or
/// nothing follows the prefix.
pub fn parse_prefixed<'a>(content: &'a str, prefixes: &[String]) -> Option<(&'a str, &'a str)> {
    let content = content.trim_start();
    let rest = prefixes
        .iter()
        .find_map(|prefix| content.strip_prefix(prefix.as_str()))?;

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    if name.is_empty() {
        return None;
    }

    Some((name, args))
}

/// Renders the registry as a help message.
pub fn help_text(prefix: &str) -> String {
    let mut lines = vec!["**Rod's commands**".to_string()];

    for command in COMMANDS {
        let usage = match &command.argument {
            Some(arg) if arg.required => format!("{}{} <{}>", prefix, command.name, arg.name),
            Some(arg) => format!("{}{} [{}]", prefix, command.name, arg.name),
            None => format!("{}{}", prefix, command.name),
        };
        lines.push(format!("`{}` - {}", usage, command.description));
    }

    lines.push("Every command is also available as a slash command.".to_string());
    lines.join("\n")
}

/// Slash command definitions for every registered command.
pub fn slash_commands() -> Vec<CreateCommand> {
    COMMANDS
        .iter()
        .map(|command| {
            let builder = CreateCommand::new(command.name).description(command.description);
            match &command.argument {
                Some(arg) => builder.add_option(
                    CreateCommandOption::new(CommandOptionType::String, arg.name, arg.description)
                        .required(arg.required),
                ),
                None => builder,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["!".to_string(), ":".to_string()]
    }

    #[test]
    fn parses_prefixed_messages() {
        assert_eq!(
            parse_prefixed("!grod is rod real?", &prefixes()),
            Some(("grod", "is rod real?"))
        );
        assert_eq!(parse_prefixed(":gen", &prefixes()), Some(("gen", "")));
        assert_eq!(
            parse_prefixed("  !roll   2d6 ", &prefixes()),
            Some(("roll", "2d6"))
        );
    }

    #[test]
    fn ignores_unprefixed_messages() {
        assert_eq!(parse_prefixed("grod is rod real?", &prefixes()), None);
        assert_eq!(parse_prefixed("!", &prefixes()), None);
        assert_eq!(parse_prefixed("! gen", &prefixes()), None);
    }

    #[test]
    fn finds_commands_case_insensitively() {
        assert_eq!(find("GROD").map(|c| c.kind), Some(CommandKind::Grod));
        assert_eq!(find("rod_rule").map(|c| c.kind), Some(CommandKind::RodRule));
        assert!(find("nope").is_none());
    }

    #[test]
    fn command_names_are_unique_and_slash_compatible() {
        for (index, command) in COMMANDS.iter().enumerate() {
            assert!(command
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(COMMANDS[index + 1..].iter().all(|c| c.name != command.name));
        }
        assert_eq!(slash_commands().len(), COMMANDS.len());
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text("!");

        for command in COMMANDS {
            assert!(help.contains(&format!("`!{}", command.name)));
        }
        assert!(help.contains("`!grod <question>`"));
        assert!(help.contains("`!roll [dice]`"));
    }
}
