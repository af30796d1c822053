//! Pilot tuning.
//!
//! `PilotConfig` is the serializable policy: every threshold the pilot uses
//! lives here so it can be tuned from a JSON file. `Tuning` is the config
//! resolved against a concrete craft hitbox once, at construction.

use serde::{Deserialize, Serialize};

use starpilot_core::constants::*;
use starpilot_core::types::Extent;

use crate::error::PilotError;

/// Tunable pilot policy. Missing fields in JSON fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    /// Playfield width.
    pub arena_width: f64,
    /// Playfield height.
    pub arena_height: f64,

    /// Projectiles landing within this window (s) are threats; also the strategic horizon.
    pub reaction_window_secs: f64,
    /// TTI (s) under which a dodge is an emergency.
    pub immediate_dodge_threshold_secs: f64,
    /// Horizontal margin around the craft footprint for threat detection.
    pub threat_detection_buffer: f64,
    /// Safety oracle sampling step (s).
    pub oracle_sample_step_secs: f64,
    /// Radius that must stay free of projectiles around a candidate position.
    pub safe_zone_radius: f64,
    /// Short horizon (s) for idle repositioning.
    pub idle_safe_horizon_secs: f64,
    /// Margin beyond combined half-extents for hostile body proximity.
    pub body_proximity_margin: f64,

    pub preferred_y_factor: f64,
    pub preferred_y_tolerance: f64,
    pub dodge_distance_factor: f64,
    pub idle_shift_factor: f64,
    /// Per-tick probability of an idle shift, in [0, 1].
    pub idle_shift_chance: f64,
    pub teleport_step_factor: f64,
    pub teleport_radius_divisor: f64,

    pub alignment_tolerance_factor: f64,
    pub post_shot_pause_secs: f64,
    pub shot_attempt_cooldown_secs: f64,
    pub firing_safety_buffer_secs: f64,
    pub firing_position_safe_radius: f64,
    pub engagement_expiry_secs: f64,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            arena_width: SCREEN_WIDTH,
            arena_height: SCREEN_HEIGHT,
            reaction_window_secs: REACTION_WINDOW_SECS,
            immediate_dodge_threshold_secs: IMMEDIATE_DODGE_THRESHOLD_SECS,
            threat_detection_buffer: THREAT_DETECTION_BUFFER,
            oracle_sample_step_secs: ORACLE_SAMPLE_STEP_SECS,
            safe_zone_radius: SAFE_ZONE_RADIUS,
            idle_safe_horizon_secs: IDLE_SAFE_HORIZON_SECS,
            body_proximity_margin: BODY_PROXIMITY_MARGIN,
            preferred_y_factor: PREFERRED_Y_FACTOR,
            preferred_y_tolerance: PREFERRED_Y_TOLERANCE,
            dodge_distance_factor: DODGE_DISTANCE_FACTOR,
            idle_shift_factor: IDLE_SHIFT_FACTOR,
            idle_shift_chance: IDLE_SHIFT_CHANCE,
            teleport_step_factor: TELEPORT_STEP_FACTOR,
            teleport_radius_divisor: TELEPORT_RADIUS_DIVISOR,
            alignment_tolerance_factor: ALIGNMENT_TOLERANCE_FACTOR,
            post_shot_pause_secs: POST_SHOT_PAUSE_SECS,
            shot_attempt_cooldown_secs: SHOT_ATTEMPT_COOLDOWN_SECS,
            firing_safety_buffer_secs: FIRING_SAFETY_BUFFER_SECS,
            firing_position_safe_radius: FIRING_POSITION_SAFE_RADIUS,
            engagement_expiry_secs: ENGAGEMENT_EXPIRY_SECS,
        }
    }
}

impl PilotConfig {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), PilotError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("reaction_window_secs", self.reaction_window_secs),
            ("oracle_sample_step_secs", self.oracle_sample_step_secs),
            ("safe_zone_radius", self.safe_zone_radius),
            ("dodge_distance_factor", self.dodge_distance_factor),
            ("teleport_step_factor", self.teleport_step_factor),
            ("teleport_radius_divisor", self.teleport_radius_divisor),
            ("alignment_tolerance_factor", self.alignment_tolerance_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PilotError::InvalidConfig {
                    field,
                    requirement: "finite and > 0",
                    value,
                });
            }
        }

        let non_negative = [
            ("immediate_dodge_threshold_secs", self.immediate_dodge_threshold_secs),
            ("threat_detection_buffer", self.threat_detection_buffer),
            ("idle_safe_horizon_secs", self.idle_safe_horizon_secs),
            ("body_proximity_margin", self.body_proximity_margin),
            ("preferred_y_tolerance", self.preferred_y_tolerance),
            ("idle_shift_factor", self.idle_shift_factor),
            ("post_shot_pause_secs", self.post_shot_pause_secs),
            ("shot_attempt_cooldown_secs", self.shot_attempt_cooldown_secs),
            ("firing_safety_buffer_secs", self.firing_safety_buffer_secs),
            ("firing_position_safe_radius", self.firing_position_safe_radius),
            ("engagement_expiry_secs", self.engagement_expiry_secs),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PilotError::InvalidConfig {
                    field,
                    requirement: "finite and >= 0",
                    value,
                });
            }
        }

        let unit = [
            ("preferred_y_factor", self.preferred_y_factor),
            ("idle_shift_chance", self.idle_shift_chance),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(PilotError::InvalidConfig {
                    field,
                    requirement: "within [0, 1]",
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Config resolved against the craft hitbox. All distances in screen units.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub config: PilotConfig,
    pub craft_extent: Extent,
    /// Resting line the craft is driven toward.
    pub preferred_y: f64,
    /// Full lateral dodge offset.
    pub dodge_distance: f64,
    /// Lateral step used to test whether an alignment move is safe.
    pub align_step: f64,
    /// Below this horizontal offset no alignment move is made.
    pub align_dead_band: f64,
    /// Horizontal offset within which a target counts as lined up.
    pub alignment_tolerance: f64,
    /// Below this horizontal offset no item-collection move is made.
    pub collect_dead_band: f64,
    pub idle_shift_distance: f64,
    pub teleport_step: f64,
    pub teleport_max_radius: f64,
    /// Vertical band above the craft in which an imminent contact counts.
    pub safe_distance_above: f64,
    /// Vertical band below the craft in which an imminent contact counts.
    pub safe_distance_below: f64,
}

impl Tuning {
    pub fn new(config: PilotConfig, craft_extent: Extent) -> Result<Self, PilotError> {
        config.validate()?;
        if !(craft_extent.half_width > 0.0 && craft_extent.half_height > 0.0) {
            return Err(PilotError::InvalidCraft {
                half_width: craft_extent.half_width,
                half_height: craft_extent.half_height,
            });
        }

        let width = craft_extent.width();
        let height = craft_extent.height();
        if config.arena_width < width {
            return Err(PilotError::InvalidConfig {
                field: "arena_width",
                requirement: "at least the craft width",
                value: config.arena_width,
            });
        }
        if config.arena_height < height {
            return Err(PilotError::InvalidConfig {
                field: "arena_height",
                requirement: "at least the craft height",
                value: config.arena_height,
            });
        }
        let alignment_tolerance = width * config.alignment_tolerance_factor;

        Ok(Self {
            preferred_y: config.arena_height * config.preferred_y_factor
                - craft_extent.half_height,
            dodge_distance: width * config.dodge_distance_factor,
            align_step: width * 0.35,
            align_dead_band: alignment_tolerance * 0.05,
            alignment_tolerance,
            collect_dead_band: width * 0.08,
            idle_shift_distance: width * config.idle_shift_factor,
            teleport_step: width * config.teleport_step_factor,
            teleport_max_radius: config.arena_width / config.teleport_radius_divisor,
            safe_distance_above: height * 1.2,
            safe_distance_below: height * 0.8,
            craft_extent,
            config,
        })
    }

    /// Whether the craft has room to move left without touching the edge.
    pub fn can_move_left(&self, x: f64) -> bool {
        x - self.craft_extent.half_width > 1.0
    }

    /// Whether the craft has room to move right without touching the edge.
    pub fn can_move_right(&self, x: f64) -> bool {
        x + self.craft_extent.half_width < self.config.arena_width - 1.0
    }

    /// Whether the craft, centered at `x`, lies fully inside the arena.
    pub fn fits_horizontally(&self, x: f64) -> bool {
        x - self.craft_extent.half_width >= 0.0
            && x + self.craft_extent.half_width <= self.config.arena_width
    }
}
