//! Safety oracle: forward-simulates every live projectile along its linear
//! trajectory and reports whether a disc stays clear for a horizon.
//!
//! Every movement decision in the pilot is gated through `is_zone_clear`.
//! Cost is O(projectiles x samples), so shorter horizons are cheaper.

use glam::DVec2;

use starpilot_core::state::WorldSnapshot;

/// One projectile as the oracle sees it.
#[derive(Debug, Clone, Copy)]
struct Track {
    position: DVec2,
    velocity: DVec2,
    half_width: f64,
}

/// Trajectory predictor over the projectiles of one snapshot.
#[derive(Debug, Clone)]
pub struct SafetyOracle {
    tracks: Vec<Track>,
    sample_step: f64,
}

impl SafetyOracle {
    /// Collect the live projectiles of `snapshot`. `sample_step` must be > 0.
    pub fn new(snapshot: &WorldSnapshot, sample_step: f64) -> Self {
        let tracks = snapshot
            .live_projectiles()
            .map(|(entity, velocity)| Track {
                position: entity.position.to_dvec2(),
                velocity: velocity.to_dvec2(),
                half_width: entity.extent.half_width,
            })
            .collect();
        Self {
            tracks,
            sample_step,
        }
    }

    /// Number of projectiles being predicted.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the disc of `radius` around (`x`, `y`) stays free of every
    /// projectile for `horizon` seconds.
    ///
    /// Samples are taken at whole multiples of the sample step, starting at
    /// t = 0, so the sample set for a shorter horizon is always a prefix of
    /// the set for a longer one.
    pub fn is_zone_clear(&self, x: f64, y: f64, radius: f64, horizon: f64) -> bool {
        let center = DVec2::new(x, y);
        let samples = (horizon.max(0.0) / self.sample_step).floor() as usize;

        for track in &self.tracks {
            let combined = radius + track.half_width;
            let limit_sq = combined * combined;
            for i in 0..=samples {
                let t = i as f64 * self.sample_step;
                let predicted = track.position + track.velocity * t;
                if predicted.distance_squared(center) < limit_sq {
                    return false;
                }
            }
        }
        true
    }
}
