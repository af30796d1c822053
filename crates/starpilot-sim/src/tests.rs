//! Tests for the harness engine, its systems and the pilot running inside it.

use hecs::World;

use starpilot_ai::PilotError;
use starpilot_core::components::*;
use starpilot_core::constants::*;
use starpilot_core::enums::{DodgeTier, PilotAction, PowerUpKind};
use starpilot_core::types::{Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::score::ScoreState;
use crate::systems::wave_spawner::SpawnConfig;
use crate::systems::{cleanup, contacts, movement, snapshot, weapons};
use crate::world_setup;

fn quiet_engine() -> SimulationEngine {
    let mut config = SimConfig {
        spawn: SpawnConfig::disabled(),
        ..Default::default()
    };
    config.pilot.idle_shift_chance = 0.0;
    SimulationEngine::new(config).unwrap()
}

fn craft_position(engine: &SimulationEngine) -> Position {
    engine
        .world()
        .get::<&Craft>(engine.craft())
        .unwrap()
        .position
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone()).unwrap();
    let mut engine_b = SimulationEngine::new(config).unwrap();

    for _ in 0..900 {
        let report_a = engine_a.tick().unwrap();
        let report_b = engine_b.tick().unwrap();
        let json_a = serde_json::to_string(&report_a).unwrap();
        let json_b = serde_json::to_string(&report_b).unwrap();
        assert_eq!(json_a, json_b, "Reports diverged with same seed");
    }
    assert_eq!(engine_a.score(), engine_b.score());
    assert_eq!(craft_position(&engine_a), craft_position(&engine_b));
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    // The first hostile spawns at tick 90 at a seeded x.
    for _ in 0..120 {
        engine_a.tick().unwrap();
        engine_b.tick().unwrap();
    }
    let snap_a = snapshot::ingest(engine_a.world(), engine_a.lives());
    let snap_b = snapshot::ingest(engine_b.world(), engine_b.lives());
    assert_ne!(
        serde_json::to_string(&snap_a).unwrap(),
        serde_json::to_string(&snap_b).unwrap(),
        "different seeds should place hostiles differently"
    );
}

// ---- Construction ----

#[test]
fn test_invalid_pilot_config_rejected() {
    let mut config = SimConfig::default();
    config.pilot.reaction_window_secs = -1.0;
    let result = SimulationEngine::new(config);
    assert!(matches!(result, Err(PilotError::InvalidConfig { .. })));
}

#[test]
fn test_narrow_arena_rejected_instead_of_panicking() {
    // Narrower than the craft: motion clamping would have no valid range.
    let mut config = SimConfig::default();
    config.pilot.arena_width = 30.0;
    assert!(config.pilot.validate().is_ok(), "field ranges alone allow it");
    let result = SimulationEngine::new(config);
    assert!(matches!(
        result,
        Err(PilotError::InvalidConfig { field: "arena_width", .. })
    ));

    // Fits the craft but not a boss: the spawn range would be empty.
    let mut config = SimConfig::default();
    config.pilot.arena_width = BOSS_HALF_EXTENT * 2.0;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(PilotError::InvalidConfig { field: "arena_width", .. })
    ));

    // Smallest accepted arena ticks with every spawn stream due.
    let mut config = SimConfig {
        spawn: SpawnConfig {
            hostile_interval_ticks: 1,
            boss_interval_ticks: 1,
            item_interval_ticks: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    config.pilot.arena_width = BOSS_HALF_EXTENT * 2.0 + 1.0;
    let mut engine = SimulationEngine::new(config).unwrap();
    for _ in 0..5 {
        engine.tick().unwrap();
    }
}

#[test]
fn test_missing_craft_reported() {
    let mut engine = quiet_engine();
    let craft = engine.craft();
    engine.world_mut().despawn(craft).unwrap();
    let err = engine.tick().unwrap_err();
    assert!(matches!(err, PilotError::MissingCraft(_)), "got {err}");
}

#[test]
fn test_craft_spawns_on_preferred_line() {
    let engine = quiet_engine();
    let pos = craft_position(&engine);
    assert_eq!(pos.x, SCREEN_WIDTH / 2.0);
    assert!((pos.y - engine.pilot().tuning().preferred_y).abs() < 1e-9);
}

// ---- Movement ----

#[test]
fn test_craft_motion_consumes_intents() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let start = world.get::<&Craft>(craft).unwrap().position;
    {
        let mut c = world.get::<&mut Craft>(craft).unwrap();
        c.intents.move_left = true;
        c.intents.move_forward = true;
    }

    movement::run_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);

    let c = world.get::<&Craft>(craft).unwrap();
    let step = CRAFT_SPEED * DT;
    assert!((c.position.x - (start.x - step)).abs() < 1e-9);
    assert!((c.position.y - (start.y - step)).abs() < 1e-9);
    assert_eq!(c.intents, Intents::default(), "intents reset after motion");
}

#[test]
fn test_craft_motion_clamped_to_arena() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    {
        let mut c = world.get::<&mut Craft>(craft).unwrap();
        c.position.x = CRAFT_HALF_EXTENT + 1.0;
        c.intents.move_left = true;
    }
    movement::run_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let c = world.get::<&Craft>(craft).unwrap();
    assert_eq!(c.position.x, CRAFT_HALF_EXTENT);
}

#[test]
fn test_kinematics() {
    let mut world = World::new();
    let e = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, 100.0),
        Velocity::new(60.0, 120.0),
        PROJECTILE_HALF_EXTENT,
    );
    movement::run(&mut world);
    let pos = *world.get::<&Position>(e).unwrap();
    assert!((pos.x - 101.0).abs() < 1e-9);
    assert!((pos.y - 102.0).abs() < 1e-9);
}

#[test]
fn test_boss_stops_at_hold_line_and_bounces() {
    let mut world = World::new();
    let boss = world_setup::spawn_boss(&mut world, SCREEN_WIDTH - BOSS_HALF_EXTENT, 1000, 0);
    world.get::<&mut Position>(boss).unwrap().y = BOSS_HOLD_Y;

    movement::steer_bosses(&mut world, SCREEN_WIDTH);
    let vel = *world.get::<&Velocity>(boss).unwrap();
    assert_eq!(vel.y, 0.0);
    assert!(vel.x < 0.0, "bounced off the right wall");
}

// ---- Snapshot and cleanup ----

#[test]
fn test_snapshot_flags_expired_then_cleanup_despawns() {
    let mut world = World::new();
    let live = world_setup::spawn_hostile(&mut world, 100.0, 1000, 0);
    let dead = world_setup::spawn_item(&mut world, PowerUpKind::Shield, 200.0);
    world.insert_one(dead, Expired).unwrap();

    let snap = snapshot::ingest(&world, 2);
    assert_eq!(snap.entities.len(), 2);
    assert_eq!(snap.lives, 2);
    assert!(snap.is_alive(world_setup::entity_id(live)));
    assert!(!snap.is_alive(world_setup::entity_id(dead)));

    let mut buffer = Vec::new();
    cleanup::run(&mut world, &mut buffer);
    assert!(world.contains(live));
    assert!(!world.contains(dead));
}

#[test]
fn test_out_of_bounds_expired() {
    let mut world = World::new();
    let gone = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, SCREEN_HEIGHT + OUT_OF_BOUNDS_MARGIN + 1.0),
        Velocity::new(0.0, 100.0),
        PROJECTILE_HALF_EXTENT,
    );
    let kept = world_setup::spawn_projectile(
        &mut world,
        Position::new(100.0, 100.0),
        Velocity::new(0.0, 100.0),
        PROJECTILE_HALF_EXTENT,
    );
    let mut buffer = Vec::new();
    cleanup::expire_out_of_bounds(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT, &mut buffer);
    assert!(world.get::<&Expired>(gone).is_ok());
    assert!(world.get::<&Expired>(kept).is_err());
}

// ---- Weapons ----

#[test]
fn test_gunner_fires_aimed_volley() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let craft_pos = world.get::<&Craft>(craft).unwrap().position;
    let hostile = world_setup::spawn_hostile(&mut world, 100.0, 10, 0);

    weapons::run_gunners(&mut world, craft, 5);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0, "not due yet");

    weapons::run_gunners(&mut world, craft, 10);
    let origin = *world.get::<&Position>(hostile).unwrap();
    let velocities: Vec<Velocity> = world
        .query::<&Velocity>()
        .with::<&Projectile>()
        .iter()
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(velocities.len(), 1);
    let v = velocities[0];
    assert!((v.speed() - PROJECTILE_SPEED).abs() < 1e-6);
    let to_craft = craft_pos.to_dvec2() - origin.to_dvec2();
    let cross = to_craft.x * v.y - to_craft.y * v.x;
    assert!(cross.abs() < 1e-6, "volley aimed at the craft");
}

#[test]
fn test_craft_gun_respects_fire_interval() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut score = ScoreState::default();

    for tick in 0..CRAFT_FIRE_INTERVAL_TICKS {
        world.get::<&mut Craft>(craft).unwrap().intents.shoot = true;
        weapons::run_craft(&mut world, craft, tick, &mut score);
    }
    assert_eq!(score.shots_fired, 1);
    assert_eq!(world.query::<&Shot>().iter().count(), 1);

    world.get::<&mut Loadout>(craft).unwrap().multi_shot_until_tick = 100;
    weapons::run_craft(&mut world, craft, CRAFT_FIRE_INTERVAL_TICKS, &mut score);
    assert_eq!(score.shots_fired, 2);
    assert_eq!(world.query::<&Shot>().iter().count(), 4, "multi-shot volley of three");
}

// ---- Contacts ----

#[test]
fn test_shot_destroys_hostile() {
    let mut world = World::new();
    let hostile = world_setup::spawn_hostile(&mut world, 200.0, 1000, 0);
    world.get::<&mut Position>(hostile).unwrap().y = 300.0;
    let shot = world_setup::spawn_shot(
        &mut world,
        Position::new(205.0, 310.0),
        Velocity::new(0.0, -SHOT_SPEED),
    );
    let mut score = ScoreState::default();

    contacts::run_shots(&mut world, &mut score);
    assert_eq!(score.hostiles_destroyed, 1);
    assert!(world.get::<&Expired>(hostile).is_ok());
    assert!(world.get::<&Expired>(shot).is_ok());
}

#[test]
fn test_boss_absorbs_hits() {
    let mut world = World::new();
    let boss = world_setup::spawn_boss(&mut world, 200.0, 1000, 0);
    world.get::<&mut Position>(boss).unwrap().y = 100.0;
    world_setup::spawn_shot(&mut world, Position::new(200.0, 100.0), Velocity::new(0.0, 0.0));
    let mut score = ScoreState::default();

    contacts::run_shots(&mut world, &mut score);
    assert_eq!(score.bosses_destroyed, 0);
    assert_eq!(
        world.get::<&Hull>(boss).unwrap().hit_points,
        BOSS_HIT_POINTS - 1
    );
}

#[test]
fn test_shield_absorbs_hit_then_lives_drop() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let at = world.get::<&Craft>(craft).unwrap().position;
    world.get::<&mut Loadout>(craft).unwrap().shield_charges = 1;
    let mut score = ScoreState::default();

    world_setup::spawn_projectile(&mut world, at, Velocity::new(0.0, 0.0), PROJECTILE_HALF_EXTENT);
    let lives = contacts::run_craft(&mut world, craft, 3, 0, &mut score);
    assert_eq!(lives, 3);
    assert_eq!(score.hits_absorbed, 1);

    world_setup::spawn_projectile(&mut world, at, Velocity::new(0.0, 0.0), PROJECTILE_HALF_EXTENT);
    let lives = contacts::run_craft(&mut world, craft, lives, 1, &mut score);
    assert_eq!(lives, 2);
    assert_eq!(score.hits_taken, 1);
}

#[test]
fn test_items_apply_effects() {
    let mut world = World::new();
    let craft = world_setup::spawn_craft(&mut world, SCREEN_WIDTH, SCREEN_HEIGHT);
    let at = world.get::<&Craft>(craft).unwrap().position;
    for kind in [PowerUpKind::HealthPack, PowerUpKind::Shield, PowerUpKind::MultiShot] {
        let item = world_setup::spawn_item(&mut world, kind, at.x);
        *world.get::<&mut Position>(item).unwrap() = at;
    }
    let mut score = ScoreState::default();

    let lives = contacts::run_craft(&mut world, craft, MAX_LIVES, 10, &mut score);
    assert_eq!(lives, MAX_LIVES, "health is capped");
    assert_eq!(score.items_collected, 3);
    let loadout = *world.get::<&Loadout>(craft).unwrap();
    assert_eq!(loadout.shield_charges, 1);
    assert_eq!(loadout.multi_shot_until_tick, 10 + MULTI_SHOT_DURATION_TICKS);
}

// ---- Spawning ----

#[test]
fn test_single_boss_at_a_time() {
    let mut config = SimConfig {
        spawn: SpawnConfig {
            boss_interval_ticks: 10,
            ..SpawnConfig::disabled()
        },
        ..Default::default()
    };
    config.pilot.idle_shift_chance = 0.0;
    let mut engine = SimulationEngine::new(config).unwrap();

    for _ in 0..35 {
        engine.tick().unwrap();
    }
    let bosses = engine.world().query::<&Boss>().iter().count();
    assert_eq!(bosses, 1);
}

// ---- Pilot in the loop ----

#[test]
fn test_pilot_evades_incoming_projectile() {
    let mut engine = quiet_engine();
    let pos = craft_position(&engine);
    world_setup::spawn_projectile(
        engine.world_mut(),
        Position::new(pos.x, pos.y - 66.0),
        Velocity::new(0.0, 200.0),
        PROJECTILE_HALF_EXTENT,
    );

    let report = engine.tick().unwrap();
    assert_eq!(report.action, PilotAction::Evade);
    assert_eq!(report.dodge, Some(DodgeTier::Teleport));
    assert!(!report.fired);

    for _ in 0..300 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.lives(), STARTING_LIVES);
    assert_eq!(engine.score().hits_taken, 0);
    assert!(engine.score().teleports >= 1);
}

#[test]
fn test_pilot_destroys_stationary_hostile() {
    let mut engine = quiet_engine();
    let x = craft_position(&engine).x;
    let world = engine.world_mut();
    let hostile = world_setup::spawn_hostile(world, x, 1000, 0);
    *world.get::<&mut Position>(hostile).unwrap() = Position::new(x, 100.0);
    *world.get::<&mut Velocity>(hostile).unwrap() = Velocity::new(0.0, 0.0);
    world.remove_one::<Gunner>(hostile).unwrap();

    let report = engine.tick().unwrap();
    assert_eq!(report.action, PilotAction::Fire);

    for _ in 0..120 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.score().hostiles_destroyed, 1);
    assert!(!engine.world().contains(hostile), "destroyed hostile is despawned");
}

#[test]
fn test_long_run_stays_consistent() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    for _ in 0..3600 {
        if engine.is_over() {
            break;
        }
        let report = engine.tick().unwrap();
        if let Some(to) = report.teleported_to {
            assert!(to.x >= CRAFT_HALF_EXTENT && to.x <= SCREEN_WIDTH - CRAFT_HALF_EXTENT);
        }
    }
    let pos = craft_position(&engine);
    assert!(pos.x >= CRAFT_HALF_EXTENT && pos.x <= SCREEN_WIDTH - CRAFT_HALF_EXTENT);
    assert!(engine.score().shots_fired > 0, "the pilot engages over a minute of play");
}
