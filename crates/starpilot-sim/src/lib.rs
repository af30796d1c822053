//! Headless harness for STARPILOT.
//!
//! Owns a hecs ECS world standing in for the game around the pilot: spawns
//! hostiles and items, moves everything, resolves contacts, and hands the
//! pilot a fresh snapshot every tick.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use score::ScoreState;
pub use starpilot_core as core;

#[cfg(test)]
mod tests;
