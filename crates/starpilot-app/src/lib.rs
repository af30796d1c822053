//! STARPILOT demo application.
//!
//! Wires the pilot and the headless harness together and runs them from the
//! command line.

pub mod game_loop;

pub use starpilot_core as core;
