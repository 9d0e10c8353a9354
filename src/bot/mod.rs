//! Discord bot integration.
//!
//! Chat commands arrive two ways: as prefixed messages (`!grod ...`) through
//! the `message` event, and as slash commands through `interaction_create`.
//! Both paths resolve an `Invocation` and share `command::dispatch`.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and channel metadata
//! - `GUILD_MESSAGES` / `DIRECT_MESSAGES` - Receive prefixed commands
//! - `MESSAGE_CONTENT` - Read message text (privileged intent)

pub mod command;
pub mod handler;
pub mod http;
pub mod start;
