pub mod broadcast;
pub mod corpus;
pub mod decision;
pub mod delivery;
pub mod games;
pub mod generator;
pub mod relay;
pub mod rule;
