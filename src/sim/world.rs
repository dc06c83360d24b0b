//! World population: scatters rocks, logs and trees over the terrain
//!
//! Placement is seeded, so the same tuning always yields the same world.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Obstacle, ObstacleKind};
use crate::tuning::{ScatterTuning, WorldTuning};

/// Builds the obstacle list for a new world
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    tuning: WorldTuning,
    /// Where the vehicle will start; kept clear of obstacles
    spawn: Vec2,
}

impl WorldBuilder {
    pub fn new(tuning: WorldTuning) -> Self {
        Self {
            tuning,
            spawn: Vec2::ZERO,
        }
    }

    /// Keep a different spawn point clear
    pub fn with_spawn(mut self, x: f32, z: f32) -> Self {
        self.spawn = Vec2::new(x, z);
        self
    }

    /// Scatter every obstacle kind. Rocks first, then logs, then trees.
    pub fn build(&self) -> Vec<Obstacle> {
        let mut rng = Pcg32::seed_from_u64(self.tuning.seed);
        let mut obstacles = Vec::new();

        self.scatter(&mut rng, ObstacleKind::Rock, self.tuning.rocks, &mut obstacles);
        self.scatter(&mut rng, ObstacleKind::Log, self.tuning.logs, &mut obstacles);
        self.scatter(&mut rng, ObstacleKind::Tree, self.tuning.trees, &mut obstacles);

        log::info!(
            "World built (seed {}): {} obstacles",
            self.tuning.seed,
            obstacles.len()
        );
        obstacles
    }

    fn scatter(
        &self,
        rng: &mut Pcg32,
        kind: ObstacleKind,
        scatter: ScatterTuning,
        out: &mut Vec<Obstacle>,
    ) {
        let half = scatter.extent / 2.0;
        let attempts = self.tuning.max_placement_attempts.max(1);
        let mut skipped = 0u32;

        for _ in 0..scatter.count {
            let size = match kind {
                ObstacleKind::Rock => {
                    rng.random_range(self.tuning.rock_size_min..self.tuning.rock_size_max)
                }
                _ => 0.0,
            };
            let radius = kind.collision_radius(size);

            let placed = (0..attempts).find_map(|_| {
                let x = rng.random_range(-half..half);
                let z = rng.random_range(-half..half);
                let clear = Vec2::new(x, z).distance(self.spawn) >= self.tuning.spawn_clearance + radius;
                clear.then(|| Obstacle::new(x, z, radius, kind))
            });

            match placed {
                Some(obstacle) => out.push(obstacle),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {} {} placements that kept landing on the spawn point",
                skipped,
                kind.as_str()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LOG_RADIUS, ROCK_BUFFER, TREE_RADIUS};

    #[test]
    fn test_default_counts_and_kinds() {
        let obstacles = WorldBuilder::new(WorldTuning::default()).build();
        let count = |k| obstacles.iter().filter(|o| o.kind == k).count();
        assert_eq!(count(ObstacleKind::Rock), 20);
        assert_eq!(count(ObstacleKind::Log), 15);
        assert_eq!(count(ObstacleKind::Tree), 30);
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = WorldBuilder::new(WorldTuning::default()).build();
        let b = WorldBuilder::new(WorldTuning::default()).build();
        assert_eq!(a, b);

        let other = WorldTuning {
            seed: 7,
            ..Default::default()
        };
        assert_ne!(a, WorldBuilder::new(other).build());
    }

    #[test]
    fn test_extents_and_radii() {
        let tuning = WorldTuning::default();
        for o in WorldBuilder::new(tuning.clone()).build() {
            let (half, radius_ok) = match o.kind {
                ObstacleKind::Rock => (
                    tuning.rocks.extent / 2.0,
                    o.radius >= tuning.rock_size_min + ROCK_BUFFER
                        && o.radius < tuning.rock_size_max + ROCK_BUFFER,
                ),
                ObstacleKind::Log => (tuning.logs.extent / 2.0, o.radius == LOG_RADIUS),
                ObstacleKind::Tree => (tuning.trees.extent / 2.0, o.radius == TREE_RADIUS),
            };
            assert!(o.position.x.abs() <= half && o.position.y.abs() <= half);
            assert!(radius_ok, "{:?}", o);
        }
    }

    #[test]
    fn test_spawn_point_is_clear() {
        let tuning = WorldTuning {
            // Crowd a tiny area so the clearance actually has to reject samples
            rocks: ScatterTuning {
                count: 40,
                extent: 30.0,
            },
            spawn_clearance: 4.0,
            max_placement_attempts: 64,
            ..Default::default()
        };
        let obstacles = WorldBuilder::new(tuning.clone()).with_spawn(2.0, -3.0).build();
        for o in &obstacles {
            assert!(o.position.distance(Vec2::new(2.0, -3.0)) >= tuning.spawn_clearance + o.radius);
        }
    }

    #[test]
    fn test_impossible_clearance_skips() {
        let tuning = WorldTuning {
            trees: ScatterTuning {
                count: 5,
                extent: 4.0,
            },
            rocks: ScatterTuning {
                count: 0,
                extent: 10.0,
            },
            logs: ScatterTuning {
                count: 0,
                extent: 10.0,
            },
            spawn_clearance: 50.0,
            ..Default::default()
        };
        assert!(WorldBuilder::new(tuning).build().is_empty());
    }
}
