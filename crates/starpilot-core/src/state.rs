//! Per-tick snapshot handed to the pilot, and the report it hands back.

use serde::{Deserialize, Serialize};

use crate::enums::{DodgeTier, EntityKind, PilotAction};
use crate::types::{EntityId, Extent, Position, SimTime, Velocity};

/// Read-only view of one entity for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub extent: Extent,
    pub alive: bool,
}

/// Everything the pilot may look at during a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub entities: Vec<EntityView>,
    /// Lives the craft has left.
    pub lives: u32,
}

/// The projectile the pilot judged most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatView {
    pub id: EntityId,
    /// Time to impact (s) against the preferred line.
    pub tti: f64,
}

/// What the pilot decided in one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    pub action: PilotAction,
    pub dodge: Option<DodgeTier>,
    pub threat: Option<ThreatView>,
    pub body_threat: Option<EntityId>,
    pub target: Option<EntityId>,
    pub item: Option<EntityId>,
    pub fired: bool,
    /// Where the craft was relocated to, if a teleport happened.
    pub teleported_to: Option<Position>,
}

impl EntityView {
    /// Projectile velocity, if this entity is a projectile.
    pub fn velocity(&self) -> Option<Velocity> {
        match self.kind {
            EntityKind::Projectile { velocity } => Some(velocity),
            _ => None,
        }
    }

    pub fn is_hostile_body(&self) -> bool {
        matches!(self.kind, EntityKind::Hostile | EntityKind::Boss)
    }
}

impl WorldSnapshot {
    /// Copy an entity list so evaluation stays stable for the tick.
    pub fn capture(entities: &[EntityView], lives: u32) -> Self {
        Self {
            entities: entities.to_vec(),
            lives,
        }
    }

    /// Live projectiles with their velocities.
    pub fn live_projectiles(&self) -> impl Iterator<Item = (&EntityView, Velocity)> {
        self.entities
            .iter()
            .filter(|e| e.alive)
            .filter_map(|e| e.velocity().map(|v| (e, v)))
    }

    /// Live hostile bodies, normal and boss.
    pub fn live_hostiles(&self) -> impl Iterator<Item = &EntityView> {
        self.entities
            .iter()
            .filter(|e| e.alive && e.is_hostile_body())
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id && e.alive)
    }
}
