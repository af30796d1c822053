//! Wave spawning system: seeded hostile, boss and item streams.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use starpilot_core::components::{Boss, Expired, Hostile};
use starpilot_core::constants::*;
use starpilot_core::enums::PowerUpKind;

use crate::world_setup;

/// Spawn cadence. An interval of 0 disables that stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub hostile_interval_ticks: u64,
    pub max_hostiles: usize,
    pub hostile_fire_interval_ticks: u64,
    pub boss_interval_ticks: u64,
    pub boss_fire_interval_ticks: u64,
    pub item_interval_ticks: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            hostile_interval_ticks: HOSTILE_SPAWN_INTERVAL_TICKS,
            max_hostiles: MAX_HOSTILES,
            hostile_fire_interval_ticks: HOSTILE_FIRE_INTERVAL_TICKS,
            boss_interval_ticks: BOSS_SPAWN_INTERVAL_TICKS,
            boss_fire_interval_ticks: BOSS_FIRE_INTERVAL_TICKS,
            item_interval_ticks: ITEM_SPAWN_INTERVAL_TICKS,
        }
    }
}

impl SpawnConfig {
    /// No spawning at all; for scripted scenarios.
    pub fn disabled() -> Self {
        Self {
            hostile_interval_ticks: 0,
            boss_interval_ticks: 0,
            item_interval_ticks: 0,
            ..Default::default()
        }
    }
}

fn due(interval: u64, tick: u64) -> bool {
    interval > 0 && tick > 0 && tick % interval == 0
}

/// Spawn whatever is due this tick.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, config: &SpawnConfig, tick: u64, arena_width: f64) {
    if due(config.hostile_interval_ticks, tick) {
        let live = world
            .query::<&Hostile>()
            .without::<&Expired>()
            .iter()
            .count();
        if live < config.max_hostiles {
            let x = rng.gen_range(HOSTILE_HALF_EXTENT..arena_width - HOSTILE_HALF_EXTENT);
            world_setup::spawn_hostile(world, x, config.hostile_fire_interval_ticks, tick);
        }
    }

    if due(config.boss_interval_ticks, tick) {
        let boss_alive = world
            .query::<&Boss>()
            .without::<&Expired>()
            .iter()
            .next()
            .is_some();
        if !boss_alive {
            let x = rng.gen_range(BOSS_HALF_EXTENT..arena_width - BOSS_HALF_EXTENT);
            world_setup::spawn_boss(world, x, config.boss_fire_interval_ticks, tick);
            debug!(tick, x, "boss spawned");
        }
    }

    if due(config.item_interval_ticks, tick) {
        let kind = match rng.gen_range(0..3) {
            0 => PowerUpKind::Shield,
            1 => PowerUpKind::MultiShot,
            _ => PowerUpKind::HealthPack,
        };
        let x = rng.gen_range(ITEM_HALF_EXTENT..arena_width - ITEM_HALF_EXTENT);
        world_setup::spawn_item(world, kind, x);
    }
}
