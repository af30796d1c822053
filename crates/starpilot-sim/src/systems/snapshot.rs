//! Snapshot ingestion: copies the world into the pilot's read-only view.

use hecs::World;

use starpilot_core::components::{Boss, Collectible, Expired, Hostile, Projectile};
use starpilot_core::enums::EntityKind;
use starpilot_core::state::{EntityView, WorldSnapshot};
use starpilot_core::types::{Extent, Position, Velocity};

use crate::world_setup::entity_id;

/// Build the snapshot for this tick. Entities marked `Expired` are included
/// with `alive = false`. Ordered by entity id so ingestion is stable.
pub fn ingest(world: &World, lives: u32) -> WorldSnapshot {
    let mut entities = Vec::new();

    for (entity, (pos, vel, extent, expired)) in world
        .query::<(&Position, &Velocity, &Extent, Option<&Expired>)>()
        .with::<&Projectile>()
        .iter()
    {
        entities.push(EntityView {
            id: entity_id(entity),
            kind: EntityKind::Projectile { velocity: *vel },
            position: *pos,
            extent: *extent,
            alive: expired.is_none(),
        });
    }

    for (entity, (pos, extent, expired)) in world
        .query::<(&Position, &Extent, Option<&Expired>)>()
        .with::<&Hostile>()
        .iter()
    {
        entities.push(EntityView {
            id: entity_id(entity),
            kind: EntityKind::Hostile,
            position: *pos,
            extent: *extent,
            alive: expired.is_none(),
        });
    }

    for (entity, (pos, extent, expired)) in world
        .query::<(&Position, &Extent, Option<&Expired>)>()
        .with::<&Boss>()
        .iter()
    {
        entities.push(EntityView {
            id: entity_id(entity),
            kind: EntityKind::Boss,
            position: *pos,
            extent: *extent,
            alive: expired.is_none(),
        });
    }

    for (entity, (pos, extent, collectible, expired)) in world
        .query::<(&Position, &Extent, &Collectible, Option<&Expired>)>()
        .iter()
    {
        entities.push(EntityView {
            id: entity_id(entity),
            kind: EntityKind::Item {
                power_up: collectible.kind,
            },
            position: *pos,
            extent: *extent,
            alive: expired.is_none(),
        });
    }

    entities.sort_by_key(|e| e.id);
    WorldSnapshot { entities, lives }
}
