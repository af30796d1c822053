//! Threat assessment: the most urgent projectile and the nearest hostile body.

use starpilot_core::state::{EntityView, ThreatView, WorldSnapshot};
use starpilot_core::types::{EntityId, Position, Velocity};

use crate::config::Tuning;

/// Vertical speed (units/s) below which a projectile counts as moving sideways.
const LEVEL_SPEED_EPSILON: f64 = 0.6;

/// Nominal TTI (s) given to a sideways projectile already at the craft's level.
const LEVEL_THREAT_TTI: f64 = 0.02;

/// Extra vertical slack (units) for the sideways-projectile level check.
const LEVEL_THREAT_SLACK: f64 = 5.0;

/// First sample and step (s) of the imminent-contact probe.
const PROBE_START_SECS: f64 = 0.01;
const PROBE_STEP_SECS: f64 = 0.02;

/// Fraction of the vertical safety band that still counts as contact.
const PROBE_BAND_FACTOR: f64 = 0.7;

/// A projectile predicted to hit the craft, with its time to impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletThreat {
    pub id: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    pub tti: f64,
}

impl BulletThreat {
    /// Horizontal position after `t` seconds.
    pub fn x_at(&self, t: f64) -> f64 {
        self.position.x + self.velocity.x * t
    }

    pub fn view(&self) -> ThreatView {
        ThreatView {
            id: self.id,
            tti: self.tti,
        }
    }
}

/// Vertical time to impact against `line_y`, or `None` if the projectile
/// never reaches it.
fn vertical_tti(entity: &EntityView, velocity: &Velocity, line_y: f64, tuning: &Tuning) -> Option<f64> {
    let y = entity.position.y;
    if velocity.y > LEVEL_SPEED_EPSILON {
        (y < line_y).then(|| (line_y - y) / velocity.y)
    } else if velocity.y < -LEVEL_SPEED_EPSILON {
        (y > line_y).then(|| (y - line_y) / -velocity.y)
    } else {
        let band =
            tuning.craft_extent.half_height + entity.extent.half_height + LEVEL_THREAT_SLACK;
        ((y - line_y).abs() < band).then_some(LEVEL_THREAT_TTI)
    }
}

/// Find the projectile with the smallest TTI against the preferred line whose
/// predicted impact point falls inside the craft's (buffered) footprint.
///
/// Evaluating at the preferred line rather than the current y keeps the
/// decision stable while the craft is still settling vertically.
pub fn assess_threatening_bullets(
    snapshot: &WorldSnapshot,
    craft: Position,
    tuning: &Tuning,
) -> Option<BulletThreat> {
    let line_y = tuning.preferred_y;
    let window = tuning.config.reaction_window_secs;
    let half_span = tuning.craft_extent.half_width + tuning.config.threat_detection_buffer;

    let mut best: Option<BulletThreat> = None;
    for (entity, velocity) in snapshot.live_projectiles() {
        // Rising projectiles already well below the craft are moving away.
        if velocity.y < -LEVEL_SPEED_EPSILON
            && entity.position.y > line_y + tuning.craft_extent.height() * 1.5
        {
            continue;
        }

        let Some(tti) = vertical_tti(entity, &velocity, line_y, tuning) else {
            continue;
        };
        if !(0.0..window).contains(&tti) {
            continue;
        }

        let impact_x = entity.position.x + velocity.x * tti;
        if (impact_x - craft.x).abs() > half_span {
            continue;
        }

        if best.map_or(true, |b| tti < b.tti) {
            best = Some(BulletThreat {
                id: entity.id,
                position: entity.position,
                velocity,
                tti,
            });
        }
    }
    best
}

/// Find the closest hostile body (normal or boss) within the proximity margin.
///
/// Current frame only: body collisions are near-field, so no extrapolation.
pub fn assess_proximity_threats(
    snapshot: &WorldSnapshot,
    craft: Position,
    tuning: &Tuning,
) -> Option<EntityView> {
    let margin = tuning.config.body_proximity_margin;
    let mut best: Option<(f64, EntityView)> = None;

    for hostile in snapshot.live_hostiles() {
        let combined_w = tuning.craft_extent.half_width + hostile.extent.half_width;
        let combined_h = tuning.craft_extent.half_height + hostile.extent.half_height;
        let dx = (craft.x - hostile.position.x).abs();
        let dy = (craft.y - hostile.position.y).abs();

        if dx >= combined_w + margin || dy >= combined_h + margin {
            continue;
        }

        let effective = (dx - combined_w).max(0.0) + (dy - combined_h).max(0.0);
        if best.map_or(true, |(d, _)| effective < d) {
            best = Some((effective, *hostile));
        }
    }
    best.map(|(_, hostile)| hostile)
}

/// Step every projectile forward and return the one that first overlaps the
/// craft's footprint at `line_y` within `horizon`. The reported TTI is the
/// time of first contact.
pub fn closest_bullet_threatening_position(
    snapshot: &WorldSnapshot,
    craft: Position,
    line_y: f64,
    horizon: f64,
    tuning: &Tuning,
) -> Option<BulletThreat> {
    let mut best: Option<BulletThreat> = None;
    let mut earliest = horizon;

    for (entity, velocity) in snapshot.live_projectiles() {
        let reach_x = tuning.craft_extent.half_width + entity.extent.half_width;
        let reach_y = tuning.craft_extent.half_height + entity.extent.half_height;

        let mut t = PROBE_START_SECS;
        while t <= horizon {
            let predicted = entity.position.extrapolate(&velocity, t);
            let overlaps = (predicted.x - craft.x).abs() < reach_x
                && (predicted.y - line_y).abs() < reach_y;
            if overlaps {
                let gap = line_y - predicted.y;
                let band = if gap > 0.0 {
                    tuning.safe_distance_above
                } else {
                    tuning.safe_distance_below
                };
                if gap.abs() < band * PROBE_BAND_FACTOR {
                    if t < earliest {
                        earliest = t;
                        best = Some(BulletThreat {
                            id: entity.id,
                            position: entity.position,
                            velocity,
                            tti: t,
                        });
                    }
                    break;
                }
            }
            t += PROBE_STEP_SECS;
        }
    }
    best
}
