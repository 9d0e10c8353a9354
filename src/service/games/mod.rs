//! Seed-free games. Every draw here uses a fresh, non-seeded generator.

pub mod dice;
pub mod rps;
pub mod slots;
