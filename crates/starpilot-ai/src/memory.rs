use std::collections::HashMap;

use starpilot_core::state::WorldSnapshot;
use starpilot_core::types::EntityId;

/// Hostiles recently fired upon, keyed by entity id.
///
/// An engaged hostile is skipped by targeting until its entry expires, so the
/// pilot spreads fire instead of emptying every shot into one target.
#[derive(Debug, Clone, Default)]
pub struct EngagementMemory {
    fired_at: HashMap<EntityId, f64>,
    expiry_secs: f64,
}

impl EngagementMemory {
    pub fn new(expiry_secs: f64) -> Self {
        Self {
            fired_at: HashMap::new(),
            expiry_secs,
        }
    }

    /// Remember that `id` was fired upon at `now`.
    pub fn record(&mut self, id: EntityId, now: f64) {
        self.fired_at.insert(id, now);
    }

    pub fn is_engaged(&self, id: EntityId, now: f64) -> bool {
        self.fired_at
            .get(&id)
            .is_some_and(|&at| now - at <= self.expiry_secs)
    }

    /// Drop entries whose hostile is gone or whose window has passed.
    pub fn purge(&mut self, snapshot: &WorldSnapshot, now: f64) {
        let expiry = self.expiry_secs;
        self.fired_at
            .retain(|id, at| now - *at <= expiry && snapshot.is_alive(*id));
    }

    pub fn len(&self) -> usize {
        self.fired_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired_at.is_empty()
    }
}
