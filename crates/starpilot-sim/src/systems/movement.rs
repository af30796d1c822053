//! Motion systems.
//!
//! The craft moves from its intents, everything else integrates its velocity:
//! position += velocity * dt.

use hecs::World;

use starpilot_core::components::{Boss, Craft, Intents};
use starpilot_core::constants::{BOSS_HOLD_Y, DT};
use starpilot_core::types::{Extent, Position, Velocity};

/// Move the craft one tick along its intents, clamped to the arena, and
/// reset the intents so the next pilot tick starts clean.
pub fn run_craft(world: &mut World, arena_width: f64, arena_height: f64) {
    for (_entity, craft) in world.query_mut::<&mut Craft>() {
        let step = craft.speed * DT;
        let intents = std::mem::take(&mut craft.intents);
        let Intents {
            move_left,
            move_right,
            move_forward,
            move_backward,
            ..
        } = intents;

        let pos = &mut craft.position;
        if move_left {
            pos.x -= step;
        }
        if move_right {
            pos.x += step;
        }
        if move_forward {
            pos.y -= step;
        }
        if move_backward {
            pos.y += step;
        }

        let half = craft.extent;
        pos.x = pos.x.clamp(half.half_width, arena_width - half.half_width);
        pos.y = pos.y.clamp(half.half_height, arena_height - half.half_height);
    }
}

/// Keep bosses sweeping inside the arena and stop their descent at the hold line.
pub fn steer_bosses(world: &mut World, arena_width: f64) {
    for (_entity, (pos, vel, extent, _boss)) in
        world.query_mut::<(&Position, &mut Velocity, &Extent, &Boss)>()
    {
        if pos.y >= BOSS_HOLD_Y {
            vel.y = 0.0;
        }
        if (pos.x - extent.half_width <= 0.0 && vel.x < 0.0)
            || (pos.x + extent.half_width >= arena_width && vel.x > 0.0)
        {
            vel.x = -vel.x;
        }
    }
}

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }
}
