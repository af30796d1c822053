//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::Velocity;

/// What an entity in the snapshot is. Each variant carries only the
/// fields relevant to that kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityKind {
    /// Hostile projectile on a linear trajectory.
    Projectile { velocity: Velocity },
    /// Normal hostile craft.
    Hostile,
    /// Boss-tier hostile craft.
    Boss,
    /// Collectible item.
    Item { power_up: PowerUpKind },
}

/// Collectible item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary invulnerability.
    Shield,
    /// Spread fire.
    MultiShot,
    /// Restores one life.
    HealthPack,
}

/// Which evasion tier produced the movement this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DodgeTier {
    /// Full offset, full strategic horizon.
    Ideal,
    /// Full offset, short horizon.
    Panic,
    /// Half offset, short horizon.
    Micro,
    /// Instant relocation found by radial search.
    Teleport,
    /// Sidestep away from a hostile body.
    Body,
}

/// Lateral direction of a dodge or alignment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Top-level decision the pilot took in a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PilotAction {
    /// Nothing beyond vertical centering.
    #[default]
    Idle,
    /// Current position was unsafe; the evasion planner ran.
    Evade,
    /// Inside the post-shot pause.
    Paused,
    /// Sidestepped a hostile body.
    BodyDodge,
    /// Moving laterally to line up with a hostile.
    Align,
    /// Aligned and fired.
    Fire,
    /// Aligned but held fire to dodge instead.
    HoldFire,
    /// Moving toward a collectible item.
    Collect,
    /// Small exploratory shift while idle.
    Reposition,
}
