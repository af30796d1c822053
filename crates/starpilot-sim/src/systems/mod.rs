//! ECS systems that operate on the harness world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or the engine.

pub mod cleanup;
pub mod contacts;
pub mod movement;
pub mod pilot;
pub mod snapshot;
pub mod wave_spawner;
pub mod weapons;
