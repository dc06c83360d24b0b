//! Static circular obstacles and the vehicle footprint test against them
//!
//! Obstacle counts are in the dozens, so a linear scan is all that is needed.
//! The test is a pure existential predicate: scan order never matters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LOG_RADIUS, ROCK_BUFFER, TREE_RADIUS};

/// What an obstacle looks like to the renderer; collision only cares about radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Log,
    Tree,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Rock => "rock",
            ObstacleKind::Log => "log",
            ObstacleKind::Tree => "tree",
        }
    }

    /// Collision radius for this kind. Only rocks vary with their generated size.
    pub fn collision_radius(&self, generated_size: f32) -> f32 {
        match self {
            ObstacleKind::Rock => generated_size + ROCK_BUFFER,
            ObstacleKind::Log => LOG_RADIUS,
            ObstacleKind::Tree => TREE_RADIUS,
        }
    }
}

/// A static circle on the ground plane. `position` is world (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(x: f32, z: f32, radius: f32, kind: ObstacleKind) -> Self {
        Self {
            position: Vec2::new(x, z),
            radius,
            kind,
        }
    }

    /// True if a circle of `radius` at (x, z) overlaps this obstacle.
    ///
    /// Touching exactly (distance == sum of radii) does not count.
    #[inline]
    pub fn overlaps(&self, x: f32, z: f32, radius: f32) -> bool {
        Vec2::new(x, z).distance(self.position) < radius + self.radius
    }
}

/// Every obstacle in the world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionIndex {
    obstacles: Vec<Obstacle>,
}

impl CollisionIndex {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Would a vehicle of `vehicle_radius` centred at (x, z) hit anything?
    pub fn intersects(&self, x: f32, z: f32, vehicle_radius: f32) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.overlaps(x, z, vehicle_radius))
    }

    /// The first obstacle (in storage order) a vehicle at (x, z) would hit
    pub fn first_hit(&self, x: f32, z: f32, vehicle_radius: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.overlaps(x, z, vehicle_radius))
    }
}
