//! Per-tick action arbiter.
//!
//! Priority order each tick: safety override, post-shot pause, body dodge,
//! attack, item collection, vertical centering, idle repositioning. Only the
//! decision timestamps, the engagement memory and the last threat survive
//! between ticks.

use rand::Rng;
use tracing::{debug, trace};

use starpilot_core::enums::{EntityKind, PilotAction, Side};
use starpilot_core::state::{EntityView, ThreatView, TickReport, WorldSnapshot};
use starpilot_core::types::{Position, SimTime};

use crate::config::{PilotConfig, Tuning};
use crate::craft::CraftControl;
use crate::error::PilotError;
use crate::evasion::{body_dodge, strategic_dodge, EvasionContext, Maneuver};
use crate::memory::EngagementMemory;
use crate::oracle::SafetyOracle;
use crate::targeting::{best_hostile_target, best_power_up_target};
use crate::threat::{assess_proximity_threats, assess_threatening_bullets, BulletThreat};

/// Post-shot pause dodges only for threats inside this multiple of the
/// immediate threshold.
const PAUSE_DODGE_FACTOR: f64 = 1.1;

/// Vertical extent of the firing window, relative to craft height and arena height.
const ALIGN_MIN_ABOVE_FACTOR: f64 = 0.25;
const ALIGN_MAX_RANGE_FACTOR: f64 = 0.90;

/// Item reach while collecting, in craft heights.
const COLLECT_REACH_FACTOR: f64 = 2.8;
/// Items further than `arena_width / COLLECT_SPAN_DIVISOR` are ignored.
const COLLECT_SPAN_DIVISOR: f64 = 1.8;

/// Clearance (units) kept from the top and bottom edges while centering.
const CENTERING_EDGE_MARGIN: f64 = 2.0;

/// Autonomous pilot for one craft.
#[derive(Debug, Clone)]
pub struct Pilot {
    tuning: Tuning,
    memory: EngagementMemory,
    last_shot_decision: Option<f64>,
    last_shot_attempt: Option<f64>,
    threat: Option<ThreatView>,
}

/// Per-tick state derived from the snapshot before any intent is written.
struct Assessment {
    oracle: SafetyOracle,
    threat: Option<BulletThreat>,
    body: Option<EntityView>,
}

impl Pilot {
    /// Validate `config` against the craft hitbox and build a pilot.
    pub fn new<C: CraftControl + ?Sized>(config: PilotConfig, craft: &C) -> Result<Self, PilotError> {
        let tuning = Tuning::new(config, craft.extent())?;
        let memory = EngagementMemory::new(tuning.config.engagement_expiry_secs);
        Ok(Self {
            tuning,
            memory,
            last_shot_decision: None,
            last_shot_attempt: None,
            threat: None,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn memory(&self) -> &EngagementMemory {
        &self.memory
    }

    /// Threat identified on the most recent tick.
    pub fn threat(&self) -> Option<ThreatView> {
        self.threat
    }

    /// Run one decision tick. Writes intents (and, as a last resort, the
    /// position) of `craft` and reports what was decided.
    pub fn tick<C, R>(
        &mut self,
        snapshot: &WorldSnapshot,
        craft: &mut C,
        time: SimTime,
        rng: &mut R,
    ) -> TickReport
    where
        C: CraftControl + ?Sized,
        R: Rng + ?Sized,
    {
        let now = time.elapsed_secs;
        *craft.intents_mut() = Default::default();
        self.memory.purge(snapshot, now);

        let position = craft.position();
        let assessment = self.assess(snapshot, position);
        self.threat = assessment.threat.as_ref().map(BulletThreat::view);

        let mut report = TickReport {
            time,
            threat: self.threat,
            body_threat: assessment.body.map(|b| b.id),
            ..Default::default()
        };

        let config = &self.tuning.config;
        let pref = self.tuning.preferred_y;
        let window = config.reaction_window_secs;
        let ctx = EvasionContext {
            snapshot,
            oracle: &assessment.oracle,
            tuning: &self.tuning,
            craft: position,
            threat: assessment.threat.as_ref(),
        };

        // Safety override: the resting spot is contested within the window.
        if !assessment
            .oracle
            .is_zone_clear(position.x, pref, config.safe_zone_radius, window)
        {
            report.action = PilotAction::Evade;
            let maneuver = strategic_dodge(&ctx, assessment.body.as_ref());
            apply(craft, maneuver, &mut report);
            self.center(craft);
            return report;
        }

        // Post-shot pause: no fire, only the most urgent reactions.
        if self
            .last_shot_decision
            .is_some_and(|at| now - at < config.post_shot_pause_secs)
        {
            report.action = PilotAction::Paused;
            craft.intents_mut().shoot = false;
            let urgent = config.immediate_dodge_threshold_secs * PAUSE_DODGE_FACTOR;
            if assessment.threat.is_some_and(|t| t.tti < urgent) {
                apply(craft, strategic_dodge(&ctx, assessment.body.as_ref()), &mut report);
            } else if let Some(body) = assessment.body.as_ref() {
                apply(craft, body_dodge(&ctx, body), &mut report);
            }
            self.center(craft);
            return report;
        }
        craft.intents_mut().shoot = false;

        if let Some(body) = assessment.body.as_ref() {
            if !craft.has_lateral_intent() {
                apply(craft, body_dodge(&ctx, body), &mut report);
                if craft.has_lateral_intent() {
                    report.action = PilotAction::BodyDodge;
                    self.center(craft);
                    return report;
                }
            }
        }

        // Attack.
        let mut aligning = false;
        let mut fired = false;
        let target = best_hostile_target(snapshot, position, &self.memory, now, &self.tuning);
        if let Some(target) = target {
            report.target = Some(target.id);
            let dx = target.position.x - position.x;

            if dx.abs() > self.tuning.align_dead_band {
                let next_x = position.x + dx.signum() * self.tuning.align_step;
                if assessment
                    .oracle
                    .is_zone_clear(next_x, pref, config.safe_zone_radius, window)
                {
                    if dx > 0.0 && self.tuning.can_move_right(position.x) {
                        craft.intents_mut().move_right = true;
                        aligning = true;
                    } else if dx < 0.0 && self.tuning.can_move_left(position.x) {
                        craft.intents_mut().move_left = true;
                        aligning = true;
                    }
                }
            }
            if aligning {
                report.action = PilotAction::Align;
            }

            // Lined up: fire, or dodge when the window is too tight. A gun
            // still cooling down leaves the action at Idle.
            if !aligning && self.is_aligned(&target, position) {
                let budget = config.shot_attempt_cooldown_secs
                    + config.immediate_dodge_threshold_secs
                    + config.post_shot_pause_secs
                    + config.firing_safety_buffer_secs;
                let time_to_fire = assessment.threat.map_or(true, |t| t.tti >= budget);
                let firing_spot_clear = assessment.oracle.is_zone_clear(
                    position.x,
                    pref,
                    config.firing_position_safe_radius,
                    window,
                );

                if time_to_fire && firing_spot_clear {
                    let cooldown = config.shot_attempt_cooldown_secs;
                    if try_shoot(craft, &mut self.last_shot_attempt, cooldown, now) {
                        fired = true;
                        self.last_shot_decision = Some(now);
                        if matches!(target.kind, EntityKind::Hostile) {
                            self.memory.record(target.id, now);
                        }
                        report.action = PilotAction::Fire;
                        report.fired = true;
                        debug!(target = ?target.id, x = position.x, "fire");
                    }
                } else {
                    report.action = PilotAction::HoldFire;
                    craft.intents_mut().shoot = false;
                    apply(craft, strategic_dodge(&ctx, assessment.body.as_ref()), &mut report);
                }
            }
        }

        // Items.
        let mut collecting = false;
        if !aligning && !fired && !craft.has_lateral_intent() {
            if let Some(item) = best_power_up_target(snapshot, position, &self.tuning) {
                if self.collect(craft, &item, position, &assessment.oracle) {
                    collecting = true;
                    report.item = Some(item.id);
                    report.action = PilotAction::Collect;
                }
            }
        }

        self.center(craft);

        // Idle drift.
        let centered = (craft.position().y - pref).abs() < config.preferred_y_tolerance;
        if !aligning
            && !collecting
            && !fired
            && !craft.has_lateral_intent()
            && centered
            && assessment.oracle.is_zone_clear(
                position.x,
                pref,
                config.safe_zone_radius,
                config.idle_safe_horizon_secs,
            )
            && rng.gen_bool(config.idle_shift_chance)
        {
            let side = if rng.gen_bool(0.5) { Side::Right } else { Side::Left };
            let (room, target_x) = match side {
                Side::Right => (
                    self.tuning.can_move_right(position.x),
                    position.x + self.tuning.idle_shift_distance,
                ),
                Side::Left => (
                    self.tuning.can_move_left(position.x),
                    position.x - self.tuning.idle_shift_distance,
                ),
            };
            if room
                && assessment.oracle.is_zone_clear(
                    target_x,
                    pref,
                    config.safe_zone_radius,
                    config.idle_safe_horizon_secs,
                )
            {
                set_lateral(craft, side);
                report.action = PilotAction::Reposition;
            }
        }

        report
    }

    fn assess(&self, snapshot: &WorldSnapshot, position: Position) -> Assessment {
        let oracle = SafetyOracle::new(snapshot, self.tuning.config.oracle_sample_step_secs);
        let threat = assess_threatening_bullets(snapshot, position, &self.tuning);
        let body = assess_proximity_threats(snapshot, position, &self.tuning);
        trace!(
            projectiles = oracle.len(),
            threat = ?threat.map(|t| (t.id, t.tti)),
            body = ?body.map(|b| b.id),
            "assessed"
        );
        Assessment {
            oracle,
            threat,
            body,
        }
    }

    /// Target is above the craft, within firing range and lined up.
    fn is_aligned(&self, target: &EntityView, craft: Position) -> bool {
        let height = self.tuning.craft_extent.height();
        let arena_height = self.tuning.config.arena_height;
        let above = target.position.y < craft.y - height * ALIGN_MIN_ABOVE_FACTOR;
        let in_range = target.position.y > craft.y - arena_height * ALIGN_MAX_RANGE_FACTOR;
        above
            && in_range
            && (craft.x - target.position.x).abs() < self.tuning.alignment_tolerance
    }

    /// Move toward `item` if it is in reach and the destination is clear.
    /// Returns whether a move was committed.
    fn collect<C: CraftControl + ?Sized>(
        &self,
        craft: &mut C,
        item: &EntityView,
        position: Position,
        oracle: &SafetyOracle,
    ) -> bool {
        let config = &self.tuning.config;
        let pref = self.tuning.preferred_y;
        let y = item.position.y;
        let dx = item.position.x - position.x;

        let reachable = (y - pref).abs() < self.tuning.craft_extent.height() * COLLECT_REACH_FACTOR
            || (y > pref && y < config.arena_height - item.extent.half_height);
        if !reachable || dx.abs() >= config.arena_width / COLLECT_SPAN_DIVISOR {
            return false;
        }
        if !oracle.is_zone_clear(item.position.x, pref, config.safe_zone_radius, config.reaction_window_secs) {
            return false;
        }
        if dx.abs() <= self.tuning.collect_dead_band {
            return false;
        }

        set_lateral(craft, if dx > 0.0 { Side::Right } else { Side::Left });
        true
    }

    /// Drive the craft back toward the preferred line, keeping off the edges.
    fn center<C: CraftControl + ?Sized>(&self, craft: &mut C) {
        let y = craft.position().y;
        let half_height = craft.extent().half_height;
        let pref = self.tuning.preferred_y;
        if (y - pref).abs() <= self.tuning.config.preferred_y_tolerance {
            return;
        }

        let intents = craft.intents_mut();
        if y > pref {
            if y - half_height > CENTERING_EDGE_MARGIN {
                intents.move_forward = true;
            }
        } else if y + half_height < self.tuning.config.arena_height - CENTERING_EDGE_MARGIN {
            intents.move_backward = true;
        }
    }
}

/// Raise the shoot intent unless the attempt cooldown is still running.
fn try_shoot<C: CraftControl + ?Sized>(
    craft: &mut C,
    last_attempt: &mut Option<f64>,
    cooldown: f64,
    now: f64,
) -> bool {
    if last_attempt.map_or(true, |at| now - at > cooldown) {
        craft.intents_mut().shoot = true;
        *last_attempt = Some(now);
    }
    craft.intents().shoot
}

fn set_lateral<C: CraftControl + ?Sized>(craft: &mut C, side: Side) {
    let intents = craft.intents_mut();
    match side {
        Side::Left => intents.move_left = true,
        Side::Right => intents.move_right = true,
    }
}

/// Write a planner maneuver into the craft and the report.
fn apply<C: CraftControl + ?Sized>(craft: &mut C, maneuver: Maneuver, report: &mut TickReport) {
    match maneuver {
        Maneuver::Lateral { side, .. } => set_lateral(craft, side),
        Maneuver::Teleport(to) => {
            craft.teleport_to(to);
            report.teleported_to = Some(to);
        }
        Maneuver::Hold => {}
    }
    if let Some(tier) = maneuver.tier() {
        report.dodge = Some(tier);
    }
}
