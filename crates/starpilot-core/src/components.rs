//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::PowerUpKind;
use crate::types::{Extent, Position};

/// Movement and fire intents written by the pilot and consumed by the
/// motion system. Reset at the start of every pilot tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    /// Toward the top of the screen (decreasing y).
    pub move_forward: bool,
    /// Toward the bottom of the screen (increasing y).
    pub move_backward: bool,
    pub shoot: bool,
}

/// The piloted craft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub position: Position,
    pub extent: Extent,
    /// Speed on each axis (units/s).
    pub speed: f64,
    pub intents: Intents,
}

/// Marks a hostile projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Marks a normal hostile craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Marks a boss-tier hostile craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss;

/// A collectible item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: PowerUpKind,
}

/// Marks an entity as no longer alive. It stays visible (flagged dead) for
/// one snapshot and is despawned by cleanup afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Expired;

/// Fire cadence for a hostile that shoots at the craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gunner {
    /// Ticks between volleys.
    pub interval_ticks: u64,
    /// Tick of the last volley.
    pub last_fired_tick: u64,
}

/// Marks a shot fired by the craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shot;

/// Remaining hit points of a hostile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub hit_points: u32,
}

/// Craft weapon and pickup state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Loadout {
    /// Tick of the last shot, if any.
    pub last_shot_tick: Option<u64>,
    /// Multi-shot is active until this tick.
    pub multi_shot_until_tick: u64,
    /// Hits the shield will still absorb.
    pub shield_charges: u32,
}
