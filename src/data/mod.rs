//! Persistence layer for the bot's file-backed state.
//!
//! The bot keeps no database: the rule counter is a small JSON record and the
//! rosters and GIF lists are flat text files. Repositories here hide the file
//! formats from the service layer.

pub mod flat_file;
pub mod rule_counter;
