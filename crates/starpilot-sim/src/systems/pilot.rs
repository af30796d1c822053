//! Pilot system: lends the craft to the pilot for one decision tick.

use hecs::{Entity, World};
use rand::Rng;

use starpilot_ai::{Pilot, PilotError};
use starpilot_core::components::Craft;
use starpilot_core::state::{TickReport, WorldSnapshot};
use starpilot_core::types::SimTime;

use crate::world_setup::entity_id;

pub fn run<R: Rng + ?Sized>(
    world: &World,
    craft: Entity,
    pilot: &mut Pilot,
    snapshot: &WorldSnapshot,
    time: SimTime,
    rng: &mut R,
) -> Result<TickReport, PilotError> {
    let mut craft_ref = world
        .get::<&mut Craft>(craft)
        .map_err(|_| PilotError::MissingCraft(entity_id(craft)))?;
    Ok(pilot.tick(snapshot, &mut *craft_ref, time, rng))
}
