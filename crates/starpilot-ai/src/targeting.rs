//! Target selection: one hostile to attack and one item to collect per tick.

use starpilot_core::enums::{EntityKind, PowerUpKind};
use starpilot_core::state::{EntityView, WorldSnapshot};
use starpilot_core::types::Position;

use crate::config::Tuning;
use crate::memory::EngagementMemory;

// --- Hostile scoring ---

const HOSTILE_BASE_SCORE: f64 = 1000.0;
const HOSTILE_DX_WEIGHT: f64 = 2.8;
const HOSTILE_DY_WEIGHT: f64 = 0.15;
const HOSTILE_BAND_WEIGHT: f64 = 0.7;
const HOSTILE_HIGH_PENALTY: f64 = 6000.0;
const HOSTILE_HIGH_FACTOR: f64 = 0.70;

const BOSS_BASE_SCORE: f64 = 28000.0;
const BOSS_DX_WEIGHT: f64 = 2.2;
const BOSS_DY_WEIGHT: f64 = 0.1;
const BOSS_HIGH_PENALTY: f64 = 9000.0;
const BOSS_HIGH_FACTOR: f64 = 0.75;

/// Bonus for hostiles in the lowest quarter of the arena.
const VERY_DEEP_BONUS: f64 = 16000.0;
/// Bonus for hostiles below 60% of arena height.
const DEEP_BONUS: f64 = 11000.0;

// --- Item scoring ---

const SHIELD_SCORE: f64 = 1350.0;
const SHIELD_LAST_LIFE_BONUS: f64 = 1250.0;
const MULTI_SHOT_SCORE: f64 = 750.0;
const HEALTH_SCORE_ONE_LIFE: f64 = 1950.0;
const HEALTH_SCORE_TWO_LIVES: f64 = 850.0;
const HEALTH_SCORE_HEALTHY: f64 = 250.0;
const ITEM_DISTANCE_WEIGHT: f64 = 0.8;
const ITEM_HIGH_PENALTY: f64 = 700.0;
const ITEM_FAR_PENALTY: f64 = 400.0;
const ITEM_FAR_FACTOR: f64 = 0.40;

/// Lower-band bonus by depth, before weighting.
fn depth_bonus(y: f64, arena_height: f64) -> f64 {
    if y > arena_height * 0.75 {
        VERY_DEEP_BONUS
    } else if y > arena_height * 0.60 {
        DEEP_BONUS
    } else {
        0.0
    }
}

fn hostile_score(hostile: &EntityView, craft_x: f64, tuning: &Tuning) -> f64 {
    let h = tuning.config.arena_height;
    let pref = tuning.preferred_y;
    let y = hostile.position.y;

    let mut score = HOSTILE_BASE_SCORE
        - (craft_x - hostile.position.x).abs() * HOSTILE_DX_WEIGHT
        - (pref - y).abs() * HOSTILE_DY_WEIGHT
        + depth_bonus(y, h) * HOSTILE_BAND_WEIGHT;
    if y < pref - h * HOSTILE_HIGH_FACTOR {
        score -= HOSTILE_HIGH_PENALTY;
    }
    score
}

fn boss_score(boss: &EntityView, craft_x: f64, tuning: &Tuning) -> f64 {
    let h = tuning.config.arena_height;
    let pref = tuning.preferred_y;
    let y = boss.position.y;

    let mut score = BOSS_BASE_SCORE
        - (craft_x - boss.position.x).abs() * BOSS_DX_WEIGHT
        - (pref - y).abs() * BOSS_DY_WEIGHT
        + depth_bonus(y, h);
    if y < pref - h * BOSS_HIGH_FACTOR {
        score -= BOSS_HIGH_PENALTY;
    }
    score
}

/// Pick the hostile to attack. Normal hostiles under engagement are skipped;
/// the best boss wins if it outscores every normal candidate or none exists.
/// Ties keep the first candidate encountered.
pub fn best_hostile_target(
    snapshot: &WorldSnapshot,
    craft: Position,
    memory: &EngagementMemory,
    now: f64,
    tuning: &Tuning,
) -> Option<EntityView> {
    let mut best: Option<(f64, EntityView)> = None;
    let mut best_boss: Option<(f64, EntityView)> = None;

    for entity in snapshot.entities.iter().filter(|e| e.alive) {
        match entity.kind {
            EntityKind::Hostile => {
                if memory.is_engaged(entity.id, now) {
                    continue;
                }
                let score = hostile_score(entity, craft.x, tuning);
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, *entity));
                }
            }
            EntityKind::Boss => {
                let score = boss_score(entity, craft.x, tuning);
                if best_boss.map_or(true, |(s, _)| score > s) {
                    best_boss = Some((score, *entity));
                }
            }
            _ => {}
        }
    }

    match (best, best_boss) {
        (Some((normal, _)), Some((boss, view))) if boss > normal => Some(view),
        (None, Some((_, view))) => Some(view),
        (normal, _) => normal.map(|(_, view)| view),
    }
}

fn base_item_score(kind: PowerUpKind, lives: u32) -> f64 {
    match kind {
        PowerUpKind::Shield if lives <= 1 => SHIELD_SCORE + SHIELD_LAST_LIFE_BONUS,
        PowerUpKind::Shield => SHIELD_SCORE,
        PowerUpKind::MultiShot => MULTI_SHOT_SCORE,
        PowerUpKind::HealthPack => match lives {
            1 => HEALTH_SCORE_ONE_LIFE,
            2 => HEALTH_SCORE_TWO_LIVES,
            _ => HEALTH_SCORE_HEALTHY,
        },
    }
}

/// Pick the item worth collecting, if any is reachable in Y.
pub fn best_power_up_target(
    snapshot: &WorldSnapshot,
    craft: Position,
    tuning: &Tuning,
) -> Option<EntityView> {
    let pref = tuning.preferred_y;
    let craft_h = tuning.craft_extent.height();
    let arena_w = tuning.config.arena_width;
    let arena_h = tuning.config.arena_height;
    let anchor = Position::new(craft.x, pref);

    let mut best: Option<(f64, EntityView)> = None;
    for item in snapshot.entities.iter().filter(|e| e.alive) {
        let EntityKind::Item { power_up } = item.kind else {
            continue;
        };
        let y = item.position.y;

        let mut score = base_item_score(power_up, snapshot.lives)
            - anchor.distance_to(&item.position) * ITEM_DISTANCE_WEIGHT;
        if y < pref - craft_h * 3.0 {
            score -= ITEM_HIGH_PENALTY * 1.8;
        } else if y < pref - craft_h * 1.5 {
            score -= ITEM_HIGH_PENALTY * 0.6;
        }
        if (craft.x - item.position.x).abs() > arena_w * ITEM_FAR_FACTOR {
            score -= ITEM_FAR_PENALTY;
        }

        if best.map_or(false, |(s, _)| score <= s) {
            continue;
        }
        let reachable = (y - pref).abs() < craft_h * 3.0
            || (y > pref && y < arena_h - item.extent.half_height);
        if reachable {
            best = Some((score, *item));
        }
    }
    best.map(|(_, item)| item)
}
