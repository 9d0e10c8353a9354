//! Bot state shared across event handlers and scheduled jobs.

use std::sync::Arc;

use crate::{
    config::Config,
    model::roster::Roster,
    service::{generator::GeneratorGateway, rule::RuleService},
};

/// Shared resources of a running bot.
///
/// Built once during startup and cloned into the event handler and every
/// scheduled job. All fields are cheap to clone:
/// - `Arc<Config>` and `Arc<Roster>` are reference-counted
/// - `GeneratorGateway` clones share one lock, so generation stays serialized
/// - `RuleService` clones share one counter
#[derive(Clone)]
pub struct BotState {
    /// Runtime configuration.
    pub config: Arc<Config>,

    /// Serialized access to the external generator.
    pub generator: GeneratorGateway,

    /// Rule numbering and embed composition.
    pub rules: RuleService,

    /// Roster loaded at startup.
    pub roster: Arc<Roster>,
}

impl BotState {
    pub fn new(
        config: Config,
        generator: GeneratorGateway,
        rules: RuleService,
        roster: Roster,
    ) -> Self {
        Self {
            config: Arc::new(config),
            generator,
            rules,
            roster: Arc::new(roster),
        }
    }
}
