//! Running score for a harness run.

use serde::{Deserialize, Serialize};

/// Counters tracked by the engine. Stored on the engine, not as ECS entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub hostiles_destroyed: u32,
    pub bosses_destroyed: u32,
    pub shots_fired: u32,
    pub hits_taken: u32,
    pub hits_absorbed: u32,
    pub items_collected: u32,
    /// Ticks on which the pilot chose a lateral dodge.
    pub dodges: u32,
    pub teleports: u32,
}
