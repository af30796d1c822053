#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::enums::*;
    use crate::state::{EntityView, TickReport, WorldSnapshot};
    use crate::types::{EntityId, Extent, Position, SimTime, Velocity};

    fn view(id: u64, kind: EntityKind, x: f64, y: f64, alive: bool) -> EntityView {
        EntityView {
            id: EntityId(id),
            kind,
            position: Position::new(x, y),
            extent: Extent::square(PROJECTILE_HALF_EXTENT),
            alive,
        }
    }

    #[test]
    fn test_entity_kind_serde_is_tagged() {
        let kind = EntityKind::Projectile {
            velocity: Velocity::new(0.0, 200.0),
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"type\":\"Projectile\""), "got {json}");
        let back: EntityKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, back);

        let item = EntityKind::Item {
            power_up: PowerUpKind::Shield,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: EntityKind = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }

    #[test]
    fn test_tick_report_serde() {
        let report = TickReport {
            time: SimTime::at_secs(1.0),
            action: PilotAction::Evade,
            dodge: Some(DodgeTier::Teleport),
            teleported_to: Some(Position::new(344.0, 716.0)),
            ..Default::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: TickReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn test_position_extrapolate() {
        let p = Position::new(256.0, 100.0);
        let v = Velocity::new(10.0, 200.0);
        let q = p.extrapolate(&v, 0.5);
        assert!((q.x - 261.0).abs() < 1e-9);
        assert!((q.y - 200.0).abs() < 1e-9);
        assert!((p.distance_to(&Position::new(259.0, 104.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_extent_dimensions() {
        let e = Extent::new(20.0, 15.0);
        assert_eq!(e.width(), 40.0);
        assert_eq!(e.height(), 30.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance();
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9, "got {}", t.elapsed_secs);
    }

    #[test]
    fn test_snapshot_filters_dead_and_kinds() {
        let entities = vec![
            view(1, EntityKind::Projectile { velocity: Velocity::new(0.0, 1.0) }, 0.0, 0.0, true),
            view(2, EntityKind::Projectile { velocity: Velocity::new(0.0, 1.0) }, 0.0, 0.0, false),
            view(3, EntityKind::Hostile, 0.0, 0.0, true),
            view(4, EntityKind::Boss, 0.0, 0.0, true),
            view(5, EntityKind::Hostile, 0.0, 0.0, false),
            view(6, EntityKind::Item { power_up: PowerUpKind::HealthPack }, 0.0, 0.0, true),
        ];
        let snapshot = WorldSnapshot::capture(&entities, 2);

        let projectiles: Vec<u64> = snapshot.live_projectiles().map(|(e, _)| e.id.0).collect();
        assert_eq!(projectiles, vec![1]);

        let hostiles: Vec<u64> = snapshot.live_hostiles().map(|e| e.id.0).collect();
        assert_eq!(hostiles, vec![3, 4]);

        assert!(snapshot.is_alive(EntityId(6)));
        assert!(!snapshot.is_alive(EntityId(5)));
        assert!(!snapshot.is_alive(EntityId(99)));
        assert_eq!(snapshot.lives, 2);
    }

    #[test]
    fn test_snapshot_capture_is_a_copy() {
        let mut entities = vec![view(1, EntityKind::Hostile, 10.0, 10.0, true)];
        let snapshot = WorldSnapshot::capture(&entities, 3);
        entities[0].position.x = 500.0;
        assert_eq!(snapshot.entities[0].position.x, 10.0);
    }
}
