//! Cleanup system: despawns expired entities and expires ones that left the arena.

use hecs::{Entity, World};

use starpilot_core::components::Expired;
use starpilot_core::constants::OUT_OF_BOUNDS_MARGIN;
use starpilot_core::types::Position;

/// Despawn entities that were marked `Expired` on a previous tick.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Expired>().into_iter().map(|(e, _)| e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Mark everything beyond the arena margin as `Expired`.
pub fn expire_out_of_bounds(
    world: &mut World,
    arena_width: f64,
    arena_height: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let m = OUT_OF_BOUNDS_MARGIN;
    for (entity, pos) in world.query_mut::<&Position>().without::<&Expired>() {
        if pos.x < -m || pos.x > arena_width + m || pos.y < -m || pos.y > arena_height + m {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.insert_one(entity, Expired);
    }
}
