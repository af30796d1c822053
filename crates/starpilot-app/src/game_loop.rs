//! Game loop: drives the simulation engine for a fixed number of ticks and
//! tallies what the pilot did.
//!
//! Runs flat out by default. With pacing enabled it sleeps between ticks to
//! hold the nominal tick rate, resetting the schedule when it falls behind.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use starpilot_ai::PilotError;
use starpilot_core::constants::TICK_RATE;
use starpilot_core::enums::PilotAction;
use starpilot_core::types::SimTime;
use starpilot_sim::engine::{SimConfig, SimulationEngine};
use starpilot_sim::score::ScoreState;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks between progress log lines.
const PROGRESS_INTERVAL_TICKS: u64 = 600;

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks_run: u64,
    pub time: SimTime,
    pub lives: u32,
    /// The craft ran out of lives before the tick budget was spent.
    pub game_over: bool,
    pub score: ScoreState,
    /// How many ticks ended in each top-level pilot action.
    pub actions: BTreeMap<PilotAction, u64>,
}

/// Run a simulation for up to `ticks` ticks, stopping early if the craft is
/// out of lives.
pub fn run(config: SimConfig, ticks: u64, paced: bool) -> Result<RunSummary, PilotError> {
    let seed = config.seed;
    let mut engine = SimulationEngine::new(config)?;
    let mut actions = BTreeMap::new();
    let mut ticks_run = 0;
    let mut next_tick_time = Instant::now();

    info!(seed, ticks, paced, "run started");
    while ticks_run < ticks && !engine.is_over() {
        let report = engine.tick()?;
        *actions.entry(report.action).or_insert(0) += 1;
        ticks_run += 1;

        if ticks_run % PROGRESS_INTERVAL_TICKS == 0 {
            let score = engine.score();
            debug!(
                tick = ticks_run,
                lives = engine.lives(),
                destroyed = score.hostiles_destroyed,
                hits = score.hits_taken,
                "progress"
            );
        }

        if paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; drop the backlog instead of catching up.
                next_tick_time = now;
            }
        }
    }

    let summary = RunSummary {
        seed,
        ticks_run,
        time: engine.time(),
        lives: engine.lives(),
        game_over: engine.is_over(),
        score: engine.score().clone(),
        actions,
    };
    info!(
        ticks = summary.ticks_run,
        lives = summary.lives,
        game_over = summary.game_over,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_run_counts_every_tick() {
        let summary = run(SimConfig::default(), 300, false).unwrap();
        assert_eq!(summary.ticks_run, 300);
        assert_eq!(summary.time.tick, 300);
        assert_eq!(summary.actions.values().sum::<u64>(), 300);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = SimConfig {
            seed: 9,
            ..Default::default()
        };
        let a = run(config.clone(), 1200, false).unwrap();
        let b = run(config, 1200, false).unwrap();
        assert_eq!(a, b, "same seed should produce the same summary");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut config = SimConfig::default();
        config.pilot.arena_width = 0.0;
        assert!(run(config, 10, false).is_err());
    }

    #[test]
    fn test_summary_serializes_action_names() {
        let summary = run(SimConfig::default(), 60, false).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        let actions = json["actions"].as_object().unwrap();
        assert!(!actions.is_empty());
        for key in actions.keys() {
            let parsed: PilotAction = serde_json::from_value(serde_json::Value::String(key.clone()))
                .expect("action keys are variant names");
            assert!(summary.actions.contains_key(&parsed));
        }
    }

    #[test]
    fn test_paced_run_holds_tick_rate() {
        let start = Instant::now();
        let summary = run(SimConfig::default(), 6, true).unwrap();
        assert_eq!(summary.ticks_run, 6);
        assert!(
            start.elapsed() >= TICK_DURATION * 5,
            "paced run should sleep between ticks, took {:?}",
            start.elapsed()
        );
    }
}
