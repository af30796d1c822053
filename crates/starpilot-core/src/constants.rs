//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Playfield width in screen units.
pub const SCREEN_WIDTH: f64 = 512.0;

/// Playfield height in screen units.
pub const SCREEN_HEIGHT: f64 = 800.0;

/// Lives the craft starts a run with.
pub const STARTING_LIVES: u32 = 3;

// --- Entity dimensions and speeds ---

/// Controlled craft hitbox half-extent (40x40 box).
pub const CRAFT_HALF_EXTENT: f64 = 20.0;

/// Controlled craft speed on both axes (units/s).
pub const CRAFT_SPEED: f64 = 300.0;

/// Normal hostile hitbox half-extent.
pub const HOSTILE_HALF_EXTENT: f64 = 15.0;

/// Normal hostile descent speed (units/s).
pub const HOSTILE_SPEED: f64 = 60.0;

/// Boss hitbox half-extent.
pub const BOSS_HALF_EXTENT: f64 = 25.0;

/// Boss lateral sweep speed (units/s).
pub const BOSS_SPEED: f64 = 90.0;

/// Hostile projectile half-extent (8 unit diameter).
pub const PROJECTILE_HALF_EXTENT: f64 = 4.0;

/// Boss projectile half-extent (10 unit diameter).
pub const BOSS_PROJECTILE_HALF_EXTENT: f64 = 5.0;

/// Hostile projectile speed (units/s).
pub const PROJECTILE_SPEED: f64 = 240.0;

/// Collectible item half-extent.
pub const ITEM_HALF_EXTENT: f64 = 10.0;

/// Collectible item fall speed (units/s).
pub const ITEM_FALL_SPEED: f64 = 120.0;

// --- Pilot: prediction ---

/// Time window (s) within which a projectile counts as a threat.
/// Also the strategic horizon every tactical move must stay clear for.
pub const REACTION_WINDOW_SECS: f64 = 1.5;

/// TTI (s) below which a dodge becomes an emergency.
pub const IMMEDIATE_DODGE_THRESHOLD_SECS: f64 = 0.028;

/// Extra horizontal margin around the craft footprint when detecting threats.
pub const THREAT_DETECTION_BUFFER: f64 = 10.0;

/// Safety oracle sampling step (s).
pub const ORACLE_SAMPLE_STEP_SECS: f64 = 0.025;

/// Radius of the disc that must stay free of projectiles around a candidate position.
pub const SAFE_ZONE_RADIUS: f64 = 80.0;

/// Short horizon (s) used for idle repositioning checks.
pub const IDLE_SAFE_HORIZON_SECS: f64 = 0.4;

/// Margin added to combined half-extents for hostile body proximity.
pub const BODY_PROXIMITY_MARGIN: f64 = 22.0;

// --- Pilot: positioning ---

/// Preferred resting line as a fraction of screen height (before the craft's half-height).
pub const PREFERRED_Y_FACTOR: f64 = 0.92;

/// Dead-band around the preferred line.
pub const PREFERRED_Y_TOLERANCE: f64 = 5.0;

/// Lateral dodge distance as a fraction of craft width.
pub const DODGE_DISTANCE_FACTOR: f64 = 0.85;

/// Idle shift distance as a fraction of craft width.
pub const IDLE_SHIFT_FACTOR: f64 = 0.24;

/// Per-tick probability of an idle exploratory shift.
pub const IDLE_SHIFT_CHANCE: f64 = 1.0 / 280.0;

/// Teleport search step as a fraction of craft width.
pub const TELEPORT_STEP_FACTOR: f64 = 0.20;

/// Teleport search gives up beyond screen width divided by this.
pub const TELEPORT_RADIUS_DIVISOR: f64 = 2.5;

// --- Pilot: firing ---

/// Alignment tolerance as a fraction of craft width.
pub const ALIGNMENT_TOLERANCE_FACTOR: f64 = 0.75;

/// Pause (s) after a shot decision during which no new shot is fired.
pub const POST_SHOT_PAUSE_SECS: f64 = 0.001;

/// Minimum interval (s) between shot attempts.
pub const SHOT_ATTEMPT_COOLDOWN_SECS: f64 = 0.02;

/// Extra buffer (s) the firing time budget must leave before the primary threat lands.
pub const FIRING_SAFETY_BUFFER_SECS: f64 = 0.12;

/// Radius of the disc that must stay clear around the firing position.
pub const FIRING_POSITION_SAFE_RADIUS: f64 = 80.0;

/// How long (s) a normal hostile is ignored after being fired upon.
pub const ENGAGEMENT_EXPIRY_SECS: f64 = 0.15;

// --- Harness: craft weapons ---

/// Ticks between craft shots.
pub const CRAFT_FIRE_INTERVAL_TICKS: u64 = 8;

/// Craft shot half-extent.
pub const SHOT_HALF_EXTENT: f64 = 3.0;

/// Craft shot speed (units/s, upward).
pub const SHOT_SPEED: f64 = 600.0;

/// Lateral speed (units/s) of the outer shots of a multi-shot volley.
pub const MULTI_SHOT_SPREAD_SPEED: f64 = 120.0;

/// How long a multi-shot pickup lasts (ticks).
pub const MULTI_SHOT_DURATION_TICKS: u64 = 600;

/// Lives cap for health pickups.
pub const MAX_LIVES: u32 = 5;

// --- Harness: hostiles ---

/// Hits a boss absorbs before it is destroyed.
pub const BOSS_HIT_POINTS: u32 = 20;

/// Boss descent speed (units/s) until it reaches its hold line.
pub const BOSS_DESCENT_SPEED: f64 = 40.0;

/// Line (y) the boss stops descending at.
pub const BOSS_HOLD_Y: f64 = 120.0;

/// Lateral speed (units/s) of the outer projectiles of a boss volley.
pub const BOSS_VOLLEY_SPREAD_SPEED: f64 = 70.0;

/// Entities this far outside the arena are removed.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 40.0;

// --- Harness: spawn cadence defaults ---

/// Ticks between hostile spawns (1.5 seconds).
pub const HOSTILE_SPAWN_INTERVAL_TICKS: u64 = 90;

/// Live hostile cap.
pub const MAX_HOSTILES: usize = 6;

/// Ticks between hostile volleys (2 seconds).
pub const HOSTILE_FIRE_INTERVAL_TICKS: u64 = 120;

/// Ticks between boss volleys.
pub const BOSS_FIRE_INTERVAL_TICKS: u64 = 45;

/// Ticks between boss appearances (30 seconds).
pub const BOSS_SPAWN_INTERVAL_TICKS: u64 = 1800;

/// Ticks between item drops (10 seconds).
pub const ITEM_SPAWN_INTERVAL_TICKS: u64 = 600;
