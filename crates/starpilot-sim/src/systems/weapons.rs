//! Weapons: craft shots from the shoot intent, aimed volleys from gunners.

use glam::DVec2;
use hecs::{Entity, World};

use starpilot_core::components::{Boss, Craft, Expired, Gunner, Loadout};
use starpilot_core::constants::*;
use starpilot_core::types::{Position, Velocity};

use crate::score::ScoreState;
use crate::world_setup::{spawn_projectile, spawn_shot};

/// Fire the craft's gun if the pilot asked for it and the gun has cycled.
pub fn run_craft(world: &mut World, craft: Entity, tick: u64, score: &mut ScoreState) {
    let Ok((craft_state, loadout)) = world.query_one_mut::<(&Craft, &mut Loadout)>(craft) else {
        return;
    };
    if !craft_state.intents.shoot {
        return;
    }
    let cycled = loadout
        .last_shot_tick
        .map_or(true, |last| tick >= last + CRAFT_FIRE_INTERVAL_TICKS);
    if !cycled {
        return;
    }
    loadout.last_shot_tick = Some(tick);

    let muzzle = Position::new(
        craft_state.position.x,
        craft_state.position.y - craft_state.extent.half_height,
    );
    let spread = if tick < loadout.multi_shot_until_tick {
        vec![-MULTI_SHOT_SPREAD_SPEED, 0.0, MULTI_SHOT_SPREAD_SPEED]
    } else {
        vec![0.0]
    };

    for vx in spread {
        spawn_shot(world, muzzle, Velocity::new(vx, -SHOT_SPEED));
    }
    score.shots_fired += 1;
}

/// Fire a volley at the craft from every gunner whose interval has elapsed.
/// Bosses fire a three-way spread of heavier projectiles.
pub fn run_gunners(world: &mut World, craft: Entity, tick: u64) {
    let target = match world.get::<&Craft>(craft) {
        Ok(c) => c.position.to_dvec2(),
        Err(_) => return,
    };

    let mut volleys: Vec<(Position, DVec2, bool)> = Vec::new();
    for (_entity, (pos, gunner, boss)) in world
        .query_mut::<(&Position, &mut Gunner, Option<&Boss>)>()
        .without::<&Expired>()
    {
        if tick < gunner.last_fired_tick + gunner.interval_ticks {
            continue;
        }
        gunner.last_fired_tick = tick;
        let aim = (target - pos.to_dvec2()).normalize_or_zero();
        if aim == DVec2::ZERO {
            continue;
        }
        volleys.push((*pos, aim, boss.is_some()));
    }

    for (origin, aim, is_boss) in volleys {
        let velocity = aim * PROJECTILE_SPEED;
        if is_boss {
            let side = aim.perp() * BOSS_VOLLEY_SPREAD_SPEED;
            for v in [velocity - side, velocity, velocity + side] {
                spawn_projectile(world, origin, Velocity::new(v.x, v.y), BOSS_PROJECTILE_HALF_EXTENT);
            }
        } else {
            spawn_projectile(
                world,
                origin,
                Velocity::new(velocity.x, velocity.y),
                PROJECTILE_HALF_EXTENT,
            );
        }
    }
}
