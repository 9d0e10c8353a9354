//! Domain models shared by the service and bot layers.
//!
//! Models here are free of serenity types so services can be tested without a
//! Discord connection; the bot layer converts them at the platform boundary.

pub mod generation;
pub mod roster;
pub mod rule;
