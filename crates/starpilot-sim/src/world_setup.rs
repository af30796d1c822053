//! Entity spawn factories for the harness world.

use hecs::{Entity, World};

use starpilot_core::components::*;
use starpilot_core::constants::*;
use starpilot_core::enums::PowerUpKind;
use starpilot_core::types::{EntityId, Extent, Position, Velocity};

/// Stable id of a hecs entity (generation and index bits).
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Spawn the controlled craft centered near the bottom of the arena.
pub fn spawn_craft(world: &mut World, arena_width: f64, arena_height: f64) -> Entity {
    let extent = Extent::square(CRAFT_HALF_EXTENT);
    world.spawn((
        Craft {
            position: Position::new(
                arena_width / 2.0,
                arena_height * PREFERRED_Y_FACTOR - extent.half_height,
            ),
            extent,
            speed: CRAFT_SPEED,
            intents: Intents::default(),
        },
        Loadout::default(),
    ))
}

/// Spawn a hostile projectile.
pub fn spawn_projectile(world: &mut World, position: Position, velocity: Velocity, half: f64) -> Entity {
    world.spawn((Projectile, position, velocity, Extent::square(half)))
}

/// Spawn a normal hostile that descends and fires every `fire_interval` ticks.
pub fn spawn_hostile(world: &mut World, x: f64, fire_interval: u64, tick: u64) -> Entity {
    world.spawn((
        Hostile,
        Position::new(x, -HOSTILE_HALF_EXTENT),
        Velocity::new(0.0, HOSTILE_SPEED),
        Extent::square(HOSTILE_HALF_EXTENT),
        Hull { hit_points: 1 },
        Gunner {
            interval_ticks: fire_interval,
            last_fired_tick: tick,
        },
    ))
}

/// Spawn a boss that descends to its hold line while sweeping sideways.
pub fn spawn_boss(world: &mut World, x: f64, fire_interval: u64, tick: u64) -> Entity {
    world.spawn((
        Boss,
        Position::new(x, -BOSS_HALF_EXTENT),
        Velocity::new(BOSS_SPEED, BOSS_DESCENT_SPEED),
        Extent::square(BOSS_HALF_EXTENT),
        Hull {
            hit_points: BOSS_HIT_POINTS,
        },
        Gunner {
            interval_ticks: fire_interval,
            last_fired_tick: tick,
        },
    ))
}

/// Spawn a falling collectible.
pub fn spawn_item(world: &mut World, kind: PowerUpKind, x: f64) -> Entity {
    world.spawn((
        Collectible { kind },
        Position::new(x, -ITEM_HALF_EXTENT),
        Velocity::new(0.0, ITEM_FALL_SPEED),
        Extent::square(ITEM_HALF_EXTENT),
    ))
}

/// Spawn a craft shot.
pub fn spawn_shot(world: &mut World, position: Position, velocity: Velocity) -> Entity {
    world.spawn((Shot, position, velocity, Extent::square(SHOT_HALF_EXTENT)))
}
