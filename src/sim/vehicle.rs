//! Vehicle pose and per-tick driving dynamics
//!
//! Order of operations within a step matters: slope bias is added after
//! throttle/drag integration and before the speed clamp. Reordering changes
//! terminal velocity on hills.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionIndex, Obstacle};
use super::slope::SlopeSampler;
use super::terrain::Elevation;
use super::tick::TickInput;
use crate::{heading_to_direction, normalize_angle};
use crate::tuning::VehicleTuning;

/// Where the vehicle is and how fast it is going.
///
/// `position.y` is always terrain height plus ground clearance; there is no
/// way to set it directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    position: Vec3,
    /// Radians, 0 faces -Z, wrapped to [-π, π)
    heading: f32,
    /// Signed: positive forward, negative reverse
    speed: f32,
}

impl VehicleState {
    /// Place a vehicle on the terrain at (x, z)
    pub fn spawn<E: Elevation + ?Sized>(
        terrain: &E,
        x: f32,
        z: f32,
        heading: f32,
        ground_clearance: f32,
    ) -> Self {
        Self {
            position: Vec3::new(x, terrain.height(x, z) + ground_clearance, z),
            heading: normalize_angle(heading),
            speed: 0.0,
        }
    }

    /// Same pose, different speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// HUD speed readout: `round(|speed| * scale)`
    pub fn display_speed(&self, scale: f32) -> u32 {
        (self.speed.abs() * scale).round() as u32
    }
}

/// What happened during one dynamics step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// The obstacle that blocked the move, if any
    pub collided: Option<Obstacle>,
    /// Slope along the heading used for this step
    pub slope: f32,
    /// Speed cap that was applied
    pub max_speed: f32,
}

/// Integrates throttle, steering, drag and slope into the vehicle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDynamics {
    tuning: VehicleTuning,
    sampler: SlopeSampler,
}

impl Default for VehicleDynamics {
    fn default() -> Self {
        Self::new(VehicleTuning::default())
    }
}

impl VehicleDynamics {
    pub fn new(tuning: VehicleTuning) -> Self {
        let sampler = SlopeSampler::new(tuning.slope_sample_distance);
        Self { tuning, sampler }
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    pub fn sampler(&self) -> &SlopeSampler {
        &self.sampler
    }

    /// Throttle -> acceleration. Forward wins when both pedals are held.
    pub fn acceleration(&self, input: &TickInput) -> f32 {
        if input.throttle_forward {
            self.tuning.forward_accel
        } else if input.throttle_reverse {
            -self.tuning.reverse_accel
        } else {
            0.0
        }
    }

    /// Steering -> yaw rate. Left wins when both are held.
    pub fn turning(&self, input: &TickInput) -> f32 {
        if input.steer_left {
            self.tuning.turn_rate
        } else if input.steer_right {
            -self.tuning.turn_rate
        } else {
            0.0
        }
    }

    /// Speed cap for the given slope: boosted downhill, reduced uphill
    pub fn max_speed_for_slope(&self, slope: f32) -> f32 {
        let t = &self.tuning;
        if slope < -t.slope_threshold {
            t.max_speed * t.downhill_multiplier
        } else if slope > t.slope_threshold {
            t.max_speed * t.uphill_multiplier
        } else {
            t.max_speed
        }
    }

    /// Advance `state` by `dt` seconds.
    ///
    /// `dt <= 0` leaves the state untouched.
    pub fn step<E: Elevation + ?Sized>(
        &self,
        state: &mut VehicleState,
        input: &TickInput,
        dt: f32,
        terrain: &E,
        obstacles: &CollisionIndex,
    ) -> StepOutcome {
        let t = &self.tuning;
        if dt <= 0.0 || !dt.is_finite() {
            return StepOutcome {
                collided: None,
                slope: 0.0,
                max_speed: t.max_speed,
            };
        }

        let acceleration = self.acceleration(input);
        let turning = self.turning(input);

        if input.brake {
            state.speed *= t.brake_factor;
        }

        state.speed += acceleration * dt;
        state.speed *= t.drag_factor;
        state.heading = normalize_angle(state.heading + turning * dt);

        let slope = self
            .sampler
            .slope(terrain, state.position.x, state.position.z, state.heading);
        // Positive slope is uphill: climbing bleeds speed, descending adds it
        state.speed -= slope * t.slope_gain * dt;

        let max_speed = self.max_speed_for_slope(slope);
        state.speed = state.speed.clamp(-max_speed * t.reverse_factor, max_speed);

        let travel = heading_to_direction(state.heading) * state.speed * dt;
        let new_x = state.position.x + travel.x;
        let new_z = state.position.z + travel.y;

        let collided = obstacles
            .first_hit(new_x, new_z, t.vehicle_radius)
            .copied();
        match collided {
            None => {
                state.position.x = new_x;
                state.position.z = new_z;
            }
            Some(obstacle) => {
                state.speed *= t.collision_speed_factor;
                log::debug!(
                    "Blocked by {} at ({:.1}, {:.1})",
                    obstacle.kind.as_str(),
                    obstacle.position.x,
                    obstacle.position.y
                );
            }
        }

        state.position.y = terrain.height(state.position.x, state.position.z) + t.ground_clearance;

        StepOutcome {
            collided,
            slope,
            max_speed,
        }
    }
}
