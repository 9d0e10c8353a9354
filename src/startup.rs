//! Startup helpers: build the shared bot state from configuration.

use dioxus_logger::tracing;
use std::path::Path;

use crate::{
    config::Config,
    data::{flat_file, rule_counter::RuleCounterRepository},
    error::AppError,
    model::roster::Roster,
    service::{
        generator::{GeneratorCommand, GeneratorGateway},
        rule::RuleService,
    },
    state::BotState,
};

/// GIFs attached to rule embeds when no GIF list file is configured.
pub const DEFAULT_RULE_GIFS: &[&str] = &[
    "https://media1.giphy.com/media/v1.Y2lkPTc5MGI3NjExbXhkaTRrN3ZyMGptbTBibnl2ZWFjajNhZnR6eG5nd250cGswNHU3ZyZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/XKZxVL0ZdTlf1Detsh/giphy.gif",
    "https://media3.giphy.com/media/v1.Y2lkPTc5MGI3NjExYzBjZDJ4cG10MHN4dXN6OGRqbm9vNHYwdXd0Ym82aWtuNjBhZXY3MCZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/YHRllqcns1yI0rtJyx/giphy.gif",
    "https://media2.giphy.com/media/v1.Y2lkPTc5MGI3NjExY282aHdvcm01dTVxdDNhNWxmcXlwMXVuYmI2dnk4dGoxaTdpY3U5eiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/nLa6JbJ0F8mzaVVBwF/giphy.gif",
    "https://media0.giphy.com/media/v1.Y2lkPTc5MGI3NjExM2Rqd3U2djFhZTQ3M3Y4azVkZ3gxcmt4ajdyY3Y0N3hqdzNnOTBiaiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/nKeq599EKJOolyCtPk/giphy.gif",
    "https://media2.giphy.com/media/v1.Y2lkPTc5MGI3NjExZ25oNWFlaml3YXp5cnA1NWVnaDY2cnp2a2hyazFiZnl5OGtwcXg0NiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/p7QeOqVc1U6X025Ql6/giphy.gif",
    "https://media3.giphy.com/media/v1.Y2lkPTc5MGI3NjExMmg3d2dteGh2a3pwcG0xeWptYXNjNWU2cWZ4c21sZHQ3cjZtZjF1YSZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/vMGG0UloaTGnDodQ7z/giphy.gif",
    "https://media4.giphy.com/media/v1.Y2lkPTc5MGI3NjExYzdpaWoxY2wxZGg0dnVnZDRmcDB4a2w0NnRhZzRxdjFoYnRkMmxuOSZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/eZ35MrjDyOqGSUaFFz/giphy.gif",
    "https://media1.giphy.com/media/v1.Y2lkPTc5MGI3NjExNWRkdGx4bXJvamR0d2d2M2MzbjZvYTdvbGxoN3Q5YmFmNnp2d2x1dSZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/A0ZEUfAWDpqiryHM6h/giphy.gif",
    "https://media4.giphy.com/media/v1.Y2lkPTc5MGI3NjExcGdiYmZ6amY2NTUycHRmZm5mN3N2cTQ4dmRtb2VoYmxoMDljOWt3ciZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/EyDYdGCCZBnGskjnIB/giphy.gif",
    "https://media4.giphy.com/media/v1.Y2lkPTc5MGI3NjExcWRnbDZzeWpianA5YWVkZWR4NG9qdmxreXpiZ2J6M2FzYWx3ZHplZiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/PHFczETRKfPropxkka/giphy.gif",
    "https://media1.giphy.com/media/v1.Y2lkPTc5MGI3NjExZDh4aHM1dnBjYWJvZ3g5Y3c0OWl1MXkzcGg2c3ZibDM2bnA4bDZ1YiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/Z1cmg6ojCJIY9WMqso/giphy.gif",
    "https://media4.giphy.com/media/v1.Y2lkPTc5MGI3NjExMnI5ODQ5ZzJlZzhqOGk4cmtiYm4yczloNHg0eWZyM3ZmdmN6aXdlNiZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/ZdwwQ8UwVxm5K5VgWU/giphy.gif",
    "https://media2.giphy.com/media/v1.Y2lkPTc5MGI3NjExajdxbHlrdTYweDRtZ2Z1MzUybDhjY3F0NGVuNGllMmM4dGU3NndobCZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/Lzd0wFp65M9HkVrP2a/giphy.gif",
];

/// Loads the GIF pool, falling back to the built-in list when the file is
/// unset, missing, or empty.
///
/// # Arguments
/// - `path` - Optional GIF list file (one URL per line)
pub async fn load_gifs(path: Option<&Path>) -> Result<Vec<String>, AppError> {
    let entries = match path {
        Some(path) => flat_file::read_entries(path).await?,
        None => None,
    };

    match entries {
        Some(gifs) if !gifs.is_empty() => {
            tracing::info!("Loaded {} rule GIFs", gifs.len());
            Ok(gifs)
        }
        _ => Ok(DEFAULT_RULE_GIFS.iter().map(|gif| gif.to_string()).collect()),
    }
}

/// Loads the roster, or an empty one when no roster file is configured.
pub async fn load_roster(path: Option<&Path>) -> Result<Roster, AppError> {
    let Some(path) = path else {
        return Ok(Roster::default());
    };

    let roster = flat_file::read_roster(path).await?;
    tracing::info!(
        "Loaded roster with {} members in {} sections",
        roster.count(),
        roster.sections.len()
    );

    Ok(roster)
}

/// Builds the bot state: generator gateway, rule counter, GIF pool and roster.
///
/// # Returns
/// - `Ok(BotState)` - State ready to be shared with the bot and the scheduler
/// - `Err(AppError::ConfigErr)` - The generator command is empty
/// - `Err(AppError::IoErr)` / `Err(AppError::JsonErr)` - A data file could not be read
pub async fn build_state(config: Config) -> Result<BotState, AppError> {
    let generator = GeneratorGateway::new(GeneratorCommand::from_parts(
        config.generator_command.clone(),
    )?);

    let gifs = load_gifs(config.gifs_file.as_deref()).await?;
    let rules = RuleService::load(RuleCounterRepository::new(&config.rules_file), gifs).await?;
    let roster = load_roster(config.roster_file.as_deref()).await?;

    Ok(BotState::new(config, generator, rules, roster))
}
