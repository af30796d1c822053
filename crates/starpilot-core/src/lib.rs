//! Core types and definitions for STARPILOT.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, entity tags, components, per-tick snapshots and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
