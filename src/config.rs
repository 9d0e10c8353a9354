use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIXES: &str = "!,:";
const DEFAULT_GENERATOR_COMMAND: &str = "dune exec ./rod_gen.exe";
const DEFAULT_RULES_FILE: &str = "rules_data.json";
const DEFAULT_HOURLY_SCHEDULE: &str = "0 0 * * * *";
const DEFAULT_FREQUENT_SCHEDULE: &str = "0 * * * * *";

pub struct Config {
    pub discord_bot_token: String,
    pub command_prefixes: Vec<String>,

    pub rod_user_id: Option<u64>,
    pub rules_channel_id: Option<u64>,
    pub rule_post_channel_ids: Vec<u64>,

    pub hourly_channel_ids: Vec<u64>,
    pub frequent_channel_ids: Vec<u64>,
    pub hourly_schedule: String,
    pub frequent_schedule: String,

    pub generator_command: Vec<String>,

    pub rules_file: PathBuf,
    pub gifs_file: Option<PathBuf>,
    pub roster_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes `std::env::var`; tests pass a map so they never touch
    /// the process environment. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let generator_command: Vec<String> = var("GENERATOR_COMMAND")
            .unwrap_or_else(|| DEFAULT_GENERATOR_COMMAND.to_string())
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let command_prefixes: Vec<String> = var("COMMAND_PREFIXES")
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIXES.to_string())
            .split(',')
            .map(|prefix| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect();

        if command_prefixes.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: "COMMAND_PREFIXES".to_string(),
                value: var("COMMAND_PREFIXES").unwrap_or_default(),
            });
        }

        Ok(Self {
            discord_bot_token: var("DISCORD_BOT_TOKEN")
                .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            command_prefixes,
            rod_user_id: parse_optional_id("ROD_USER_ID", var("ROD_USER_ID"))?,
            rules_channel_id: parse_optional_id("RULES_CHANNEL_ID", var("RULES_CHANNEL_ID"))?,
            rule_post_channel_ids: parse_id_list(
                "RULE_POST_CHANNEL_IDS",
                var("RULE_POST_CHANNEL_IDS"),
            )?,
            hourly_channel_ids: parse_id_list("HOURLY_CHANNEL_IDS", var("HOURLY_CHANNEL_IDS"))?,
            frequent_channel_ids: parse_id_list(
                "FREQUENT_CHANNEL_IDS",
                var("FREQUENT_CHANNEL_IDS"),
            )?,
            hourly_schedule: var("HOURLY_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_HOURLY_SCHEDULE.to_string()),
            frequent_schedule: var("FREQUENT_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_FREQUENT_SCHEDULE.to_string()),
            generator_command,
            rules_file: var("RULES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_FILE)),
            gifs_file: var("GIFS_FILE").map(PathBuf::from),
            roster_file: var("ROSTER_FILE").map(PathBuf::from),
        })
    }
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_optional_id(name: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    value.map(|value| parse_id(name, &value)).transpose()
}

/// Parses a comma separated list of Discord IDs, skipping empty items.
fn parse_id_list(name: &str, value: Option<String>) -> Result<Vec<u64>, ConfigError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_id(name, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn requires_bot_token() {
        let result = config_from(&[]);

        assert_eq!(
            result.err(),
            Some(ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))
        );
    }

    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DISCORD_BOT_TOKEN", "token")]).unwrap();

        assert_eq!(config.command_prefixes, vec!["!", ":"]);
        assert_eq!(config.generator_command, vec!["dune", "exec", "./rod_gen.exe"]);
        assert_eq!(config.rules_file, PathBuf::from("rules_data.json"));
        assert_eq!(config.hourly_schedule, "0 0 * * * *");
        assert_eq!(config.frequent_schedule, "0 * * * * *");
        assert!(config.rule_post_channel_ids.is_empty());
        assert!(config.rules_channel_id.is_none());
        assert!(config.gifs_file.is_none());
    }

    #[test]
    fn parses_channel_lists() {
        let config = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("RULE_POST_CHANNEL_IDS", "1381295413423771740, 1164969184158044220,"),
            ("RULES_CHANNEL_ID", "1365712408710086737"),
        ])
        .unwrap();

        assert_eq!(
            config.rule_post_channel_ids,
            vec![1381295413423771740, 1164969184158044220]
        );
        assert_eq!(config.rules_channel_id, Some(1365712408710086737));
    }

    #[test]
    fn rejects_malformed_ids() {
        let result = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("HOURLY_CHANNEL_IDS", "123,abc"),
        ]);

        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidEnvVar {
                name: "HOURLY_CHANNEL_IDS".to_string(),
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("ROD_USER_ID", "  "),
            ("GENERATOR_COMMAND", "./rod_gen --short"),
        ])
        .unwrap();

        assert!(config.rod_user_id.is_none());
        assert_eq!(config.generator_command, vec!["./rod_gen", "--short"]);
    }
}
