//! Layered evasion planner.
//!
//! Pure functions: each planner returns a `Maneuver` and the pilot applies it
//! to the craft. Tiers are tried in order (ideal dodge, panic dodge, micro
//! dodge, teleport) and the first viable one wins.

use tracing::{debug, warn};

use starpilot_core::enums::{DodgeTier, Side};
use starpilot_core::state::{EntityView, WorldSnapshot};
use starpilot_core::types::Position;

use crate::config::Tuning;
use crate::oracle::SafetyOracle;
use crate::threat::{closest_bullet_threatening_position, BulletThreat};

/// Cap (s) on how far the threat's x is extrapolated when picking a side.
const SIDE_PREDICTION_CAP_SECS: f64 = 0.25;

/// Horizon bounds (s) for the panic and micro tiers.
const PANIC_HORIZON_MIN_SECS: f64 = 0.05;
const PANIC_HORIZON_MAX_SECS: f64 = 0.20;
const PANIC_HORIZON_FACTOR: f64 = 0.4;
const PANIC_HORIZON_NO_TTI_SECS: f64 = 0.1;

/// Probe horizon as a multiple of the immediate-dodge threshold.
const PROBE_HORIZON_FACTOR: f64 = 1.2;

/// Body-dodge offset as a fraction of the full dodge distance.
const BODY_DODGE_FACTOR: f64 = 0.6;

/// Side-choice dead band as a fraction of craft width.
const SIDE_DEAD_BAND_FACTOR: f64 = 0.05;

/// What the planner wants done with the craft this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Maneuver {
    /// Set a lateral move intent.
    Lateral { tier: DodgeTier, side: Side },
    /// Relocate the craft instantly.
    Teleport(Position),
    /// Nothing viable was found.
    Hold,
}

impl Maneuver {
    pub fn tier(&self) -> Option<DodgeTier> {
        match self {
            Maneuver::Lateral { tier, .. } => Some(*tier),
            Maneuver::Teleport(_) => Some(DodgeTier::Teleport),
            Maneuver::Hold => None,
        }
    }
}

/// Read-only inputs shared by every planner.
pub struct EvasionContext<'a> {
    pub snapshot: &'a WorldSnapshot,
    pub oracle: &'a SafetyOracle,
    pub tuning: &'a Tuning,
    pub craft: Position,
    /// Threat found by the assessor this tick, if any.
    pub threat: Option<&'a BulletThreat>,
}

impl EvasionContext<'_> {
    fn is_clear(&self, x: f64, horizon: f64) -> bool {
        self.oracle.is_zone_clear(
            x,
            self.tuning.preferred_y,
            self.tuning.config.safe_zone_radius,
            horizon,
        )
    }

    /// Whether a lateral move toward `target_x` stays in bounds and clear.
    fn side_clear(&self, side: Side, target_x: f64, horizon: f64) -> bool {
        let room = match side {
            Side::Left => self.tuning.can_move_left(self.craft.x),
            Side::Right => self.tuning.can_move_right(self.craft.x),
        };
        room && self.tuning.fits_horizontally(target_x) && self.is_clear(target_x, horizon)
    }
}

/// Panic horizon for a threat with the given TTI.
pub fn panic_horizon(tti: Option<f64>) -> f64 {
    let raw = match tti {
        Some(t) if t > 0.0 => (t * PANIC_HORIZON_FACTOR).min(PANIC_HORIZON_MAX_SECS),
        _ => PANIC_HORIZON_NO_TTI_SECS,
    };
    raw.max(PANIC_HORIZON_MIN_SECS)
}

/// Choose a side when both are viable: away from the predicted threat x,
/// `tie` when the threat is within `dead_band`.
fn pick_side(craft_x: f64, predicted_x: f64, dead_band: f64, tie: Side) -> Side {
    if predicted_x > craft_x + dead_band {
        Side::Left
    } else if predicted_x < craft_x - dead_band {
        Side::Right
    } else {
        tie
    }
}

fn toward_center(craft_x: f64, arena_width: f64) -> Side {
    if craft_x < arena_width / 2.0 {
        Side::Right
    } else {
        Side::Left
    }
}

/// Try one dodge tier at `offset` and `horizon`.
fn try_tier(
    ctx: &EvasionContext<'_>,
    tier: DodgeTier,
    offset: f64,
    horizon: f64,
    predicted_x: f64,
    dead_band: f64,
    tie: Side,
) -> Option<Maneuver> {
    let x = ctx.craft.x;
    let left = ctx.side_clear(Side::Left, x - offset, horizon);
    let right = ctx.side_clear(Side::Right, x + offset, horizon);

    let side = match (left, right) {
        (true, true) => pick_side(x, predicted_x, dead_band, tie),
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        (false, false) => return None,
    };
    Some(Maneuver::Lateral { tier, side })
}

/// Full evasion: resolve the projectile to dodge, then walk the tiers.
///
/// With no projectile resolved, a nearby hostile body is dodged instead, and
/// failing that the craft teleports.
pub fn strategic_dodge(ctx: &EvasionContext<'_>, body: Option<&EntityView>) -> Maneuver {
    let tuning = ctx.tuning;
    let probed;
    let bullet = match ctx.threat {
        Some(threat) => threat,
        None => {
            let horizon = tuning.config.immediate_dodge_threshold_secs * PROBE_HORIZON_FACTOR;
            probed = closest_bullet_threatening_position(
                ctx.snapshot,
                ctx.craft,
                tuning.preferred_y,
                horizon,
                tuning,
            );
            match probed.as_ref() {
                Some(threat) => threat,
                None => {
                    return match body {
                        Some(body) => body_dodge(ctx, body),
                        None => teleport(ctx),
                    };
                }
            }
        }
    };

    let x = ctx.craft.x;
    let predicted_x = bullet.x_at(bullet.tti.min(SIDE_PREDICTION_CAP_SECS));
    let dead_band = tuning.craft_extent.width() * SIDE_DEAD_BAND_FACTOR;
    let full = tuning.dodge_distance;
    let panic = panic_horizon(Some(bullet.tti));
    let center = toward_center(x, tuning.config.arena_width);

    // The micro tier has no dead band and breaks an exact tie to the right.
    let maneuver = try_tier(
        ctx,
        DodgeTier::Ideal,
        full,
        tuning.config.reaction_window_secs,
        predicted_x,
        dead_band,
        center,
    )
    .or_else(|| try_tier(ctx, DodgeTier::Panic, full, panic, predicted_x, dead_band, center))
    .or_else(|| {
        try_tier(ctx, DodgeTier::Micro, full * 0.5, panic, predicted_x, 0.0, Side::Right)
    });

    match maneuver {
        Some(m) => {
            debug!(?m, threat = ?bullet.id, tti = bullet.tti, x, "dodge");
            m
        }
        None => teleport(ctx),
    }
}

/// Sidestep a hostile body: away from it first, the other way if blocked.
pub fn body_dodge(ctx: &EvasionContext<'_>, body: &EntityView) -> Maneuver {
    let x = ctx.craft.x;
    let offset = ctx.tuning.dodge_distance * BODY_DODGE_FACTOR;
    let horizon = ctx.tuning.config.reaction_window_secs;

    // A body to the left pushes the craft right first.
    let order = if x - body.position.x > 0.0 {
        [Side::Right, Side::Left]
    } else {
        [Side::Left, Side::Right]
    };

    for side in order {
        let target = match side {
            Side::Left => x - offset,
            Side::Right => x + offset,
        };
        let room = match side {
            Side::Left => ctx.tuning.can_move_left(x),
            Side::Right => ctx.tuning.can_move_right(x),
        };
        if room && ctx.is_clear(target, horizon) {
            debug!(?side, body = ?body.id, x, "body dodge");
            return Maneuver::Lateral {
                tier: DodgeTier::Body,
                side,
            };
        }
    }
    Maneuver::Hold
}

/// Radial search for the nearest spot on the preferred line that stays clear
/// for the full strategic horizon. Right is tried before left at each radius.
pub fn teleport(ctx: &EvasionContext<'_>) -> Maneuver {
    let tuning = ctx.tuning;
    let x = ctx.craft.x;
    let half_width = tuning.craft_extent.half_width;
    let arena_width = tuning.config.arena_width;
    let horizon = tuning.config.reaction_window_secs;

    let mut k = 1u32;
    loop {
        let r = tuning.teleport_step * f64::from(k);
        if r > tuning.teleport_max_radius {
            break;
        }

        let right = x + r;
        if right + half_width < arena_width && ctx.is_clear(right, horizon) {
            let to = Position::new(right, tuning.preferred_y);
            debug!(from = x, to = right, radius = r, "teleport");
            return Maneuver::Teleport(to);
        }

        let left = x - r;
        if left - half_width > 0.0 && ctx.is_clear(left, horizon) {
            let to = Position::new(left, tuning.preferred_y);
            debug!(from = x, to = left, radius = r, "teleport");
            return Maneuver::Teleport(to);
        }

        k += 1;
    }

    warn!(x, max_radius = tuning.teleport_max_radius, "no safe teleport spot");
    Maneuver::Hold
}
