//! The seam between the pilot and whatever owns the controlled craft.

use starpilot_core::components::{Craft, Intents};
use starpilot_core::types::{Extent, Position};

/// Access the pilot needs to the controlled craft during one tick.
pub trait CraftControl {
    fn position(&self) -> Position;

    fn extent(&self) -> Extent;

    fn intents(&self) -> Intents;

    fn intents_mut(&mut self) -> &mut Intents;

    /// Instant absolute relocation. Only used as the last evasion tier.
    fn teleport_to(&mut self, position: Position);

    /// Whether a left or right move is already committed this tick.
    fn has_lateral_intent(&self) -> bool {
        let intents = self.intents();
        intents.move_left || intents.move_right
    }
}

impl CraftControl for Craft {
    fn position(&self) -> Position {
        self.position
    }

    fn extent(&self) -> Extent {
        self.extent
    }

    fn intents(&self) -> Intents {
        self.intents
    }

    fn intents_mut(&mut self) -> &mut Intents {
        &mut self.intents
    }

    fn teleport_to(&mut self, position: Position) {
        self.position = position;
    }
}
