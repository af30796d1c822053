//! Autonomous pilot for STARPILOT.
//!
//! Reads one `WorldSnapshot` per tick and drives a single craft: predicts
//! projectile trajectories, scores targets and items, and runs a layered
//! evasion planner. Pure logic over plain data, no ECS dependency.

pub mod config;
pub mod craft;
pub mod error;
pub mod evasion;
pub mod memory;
pub mod oracle;
pub mod pilot;
pub mod targeting;
pub mod threat;

pub use config::{PilotConfig, Tuning};
pub use craft::CraftControl;
pub use error::PilotError;
pub use pilot::Pilot;
pub use starpilot_core as core;
