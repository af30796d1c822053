//! Contact resolution: shots against hostiles, and the craft against
//! projectiles, hostile bodies and items. Anything consumed is marked
//! `Expired`; cleanup despawns it after it has been seen dead once.

use hecs::{Entity, World};
use tracing::debug;

use starpilot_core::components::*;
use starpilot_core::constants::{MAX_LIVES, MULTI_SHOT_DURATION_TICKS};
use starpilot_core::enums::PowerUpKind;
use starpilot_core::types::{Extent, Position};

use crate::score::ScoreState;

fn overlaps(a: Position, ae: Extent, b: Position, be: Extent) -> bool {
    (a.x - b.x).abs() < ae.half_width + be.half_width
        && (a.y - b.y).abs() < ae.half_height + be.half_height
}

fn collect<Q: hecs::Component>(world: &World) -> Vec<(Entity, Position, Extent)> {
    world
        .query::<(&Position, &Extent)>()
        .with::<&Q>()
        .without::<&Expired>()
        .iter()
        .map(|(e, (p, x))| (e, *p, *x))
        .collect()
}

fn expire(world: &mut World, entity: Entity) {
    let _ = world.insert_one(entity, Expired);
}

/// Resolve craft shots against hostile hulls.
pub fn run_shots(world: &mut World, score: &mut ScoreState) {
    let shots = collect::<Shot>(world);
    let mut targets = collect::<Hostile>(world);
    targets.extend(collect::<Boss>(world));

    for (shot, shot_pos, shot_ext) in shots {
        let Some(&(target, _, _)) = targets
            .iter()
            .find(|(_, pos, ext)| overlaps(shot_pos, shot_ext, *pos, *ext))
        else {
            continue;
        };
        expire(world, shot);

        let destroyed = match world.get::<&mut Hull>(target) {
            Ok(mut hull) => {
                hull.hit_points = hull.hit_points.saturating_sub(1);
                hull.hit_points == 0
            }
            Err(_) => true,
        };
        if destroyed {
            let is_boss = world.get::<&Boss>(target).is_ok();
            expire(world, target);
            targets.retain(|(e, _, _)| *e != target);
            if is_boss {
                score.bosses_destroyed += 1;
                debug!("boss destroyed");
            } else {
                score.hostiles_destroyed += 1;
            }
        }
    }
}

/// Resolve the craft against projectiles, hostile bodies and items.
/// Returns the updated lives count.
pub fn run_craft(
    world: &mut World,
    craft: Entity,
    lives: u32,
    tick: u64,
    score: &mut ScoreState,
) -> u32 {
    let Ok((craft_pos, craft_ext)) = world
        .get::<&Craft>(craft)
        .map(|c| (c.position, c.extent))
    else {
        return lives;
    };

    let mut harmful = collect::<Projectile>(world);
    harmful.extend(collect::<Hostile>(world));
    harmful.extend(collect::<Boss>(world));
    let items: Vec<(Entity, PowerUpKind, Position, Extent)> = world
        .query::<(&Collectible, &Position, &Extent)>()
        .without::<&Expired>()
        .iter()
        .map(|(e, (c, p, x))| (e, c.kind, *p, *x))
        .collect();

    let mut lives = lives;
    for (entity, pos, ext) in harmful {
        if !overlaps(craft_pos, craft_ext, pos, ext) {
            continue;
        }
        // Bosses survive ramming; everything else is consumed.
        if world.get::<&Boss>(entity).is_err() {
            expire(world, entity);
        }

        let absorbed = match world.get::<&mut Loadout>(craft) {
            Ok(mut loadout) if loadout.shield_charges > 0 => {
                loadout.shield_charges -= 1;
                true
            }
            _ => false,
        };
        if absorbed {
            score.hits_absorbed += 1;
        } else {
            lives = lives.saturating_sub(1);
            score.hits_taken += 1;
            debug!(tick, lives, "craft hit");
        }
    }

    for (entity, kind, pos, ext) in items {
        if !overlaps(craft_pos, craft_ext, pos, ext) {
            continue;
        }
        expire(world, entity);
        score.items_collected += 1;
        match kind {
            PowerUpKind::HealthPack => lives = (lives + 1).min(MAX_LIVES),
            PowerUpKind::Shield => {
                if let Ok(mut loadout) = world.get::<&mut Loadout>(craft) {
                    loadout.shield_charges += 1;
                }
            }
            PowerUpKind::MultiShot => {
                if let Ok(mut loadout) = world.get::<&mut Loadout>(craft) {
                    loadout.multi_shot_until_tick = tick + MULTI_SHOT_DURATION_TICKS;
                }
            }
        }
    }

    lives
}
