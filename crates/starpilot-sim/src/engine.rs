//! Simulation engine: the harness around the pilot.
//!
//! `SimulationEngine` owns the hecs ECS world, runs all systems at a fixed
//! tick rate and lets the pilot drive the craft. Completely headless and
//! deterministic for a given seed.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use starpilot_ai::{Pilot, PilotConfig, PilotError};
use starpilot_core::components::Craft;
use starpilot_core::constants::{BOSS_HALF_EXTENT, STARTING_LIVES};
use starpilot_core::enums::DodgeTier;
use starpilot_core::state::TickReport;
use starpilot_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems;
use crate::systems::wave_spawner::SpawnConfig;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub pilot: PilotConfig,
    pub spawn: SpawnConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pilot: PilotConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    pilot: Pilot,
    craft: Entity,
    lives: u32,
    spawn: SpawnConfig,
    arena: (f64, f64),
    despawn_buffer: Vec<Entity>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new engine with the craft spawned and the pilot validated.
    pub fn new(config: SimConfig) -> Result<Self, PilotError> {
        let arena = (config.pilot.arena_width, config.pilot.arena_height);
        // Spawn x ranges are `half..width - half`; the boss is the widest body.
        if arena.0 <= BOSS_HALF_EXTENT * 2.0 {
            return Err(PilotError::InvalidConfig {
                field: "arena_width",
                requirement: "wider than a boss",
                value: arena.0,
            });
        }
        let mut world = World::new();
        let craft = world_setup::spawn_craft(&mut world, arena.0, arena.1);

        let craft_ref = world
            .get::<&Craft>(craft)
            .map_err(|_| PilotError::MissingCraft(world_setup::entity_id(craft)))?;
        let pilot = Pilot::new(config.pilot, &*craft_ref)?;
        drop(craft_ref);

        info!(seed = config.seed, "simulation ready");
        Ok(Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            pilot,
            craft,
            lives: STARTING_LIVES,
            spawn: config.spawn,
            arena,
            despawn_buffer: Vec::new(),
            score: ScoreState::default(),
        })
    }

    /// Advance the simulation by one tick and return the pilot's report.
    ///
    /// Fails only if the craft has been removed from the world.
    pub fn tick(&mut self) -> Result<TickReport, PilotError> {
        let report = self.run_systems()?;
        match report.dodge {
            Some(DodgeTier::Teleport) => self.score.teleports += 1,
            Some(_) => self.score.dodges += 1,
            None => {}
        }
        self.time.advance();
        Ok(report)
    }

    /// Whether the craft is out of lives.
    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn pilot(&self) -> &Pilot {
        &self.pilot
    }

    /// The controlled craft entity.
    pub fn craft(&self) -> Entity {
        self.craft
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted test scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> Result<TickReport, PilotError> {
        let (width, height) = self.arena;
        let tick = self.time.tick;

        // 1. Spawning
        systems::wave_spawner::run(&mut self.world, &mut self.rng, &self.spawn, tick, width);
        // 2. Snapshot (expired entities still visible, flagged dead)
        let snapshot = systems::snapshot::ingest(&self.world, self.lives);
        // 3. Despawn what the snapshot just reported dead
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 4. Pilot decision
        let report = systems::pilot::run(
            &self.world,
            self.craft,
            &mut self.pilot,
            &snapshot,
            self.time,
            &mut self.rng,
        )?;
        // 5. Weapons
        systems::weapons::run_craft(&mut self.world, self.craft, tick, &mut self.score);
        systems::weapons::run_gunners(&mut self.world, self.craft, tick);
        // 6. Movement
        systems::movement::run_craft(&mut self.world, width, height);
        systems::movement::steer_bosses(&mut self.world, width);
        systems::movement::run(&mut self.world);
        // 7. Contacts
        systems::contacts::run_shots(&mut self.world, &mut self.score);
        self.lives = systems::contacts::run_craft(
            &mut self.world,
            self.craft,
            self.lives,
            tick,
            &mut self.score,
        );
        // 8. Out-of-bounds
        systems::cleanup::expire_out_of_bounds(
            &mut self.world,
            width,
            height,
            &mut self.despawn_buffer,
        );

        Ok(report)
    }
}
