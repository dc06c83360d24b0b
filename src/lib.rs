//! Prairie Drive - terrain, vehicle and damage simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, slope, collisions, damage)
//! - `platform`: Input/clock/render boundaries the host implements
//! - `game`: Cooperative frame loop driving the simulation
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{DriveLoop, LoopControl};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Nominal frame timestep for fixed clocks (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta the loop feeds into a tick (tab switch, debugger pause)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Terrain extent (square, world units) and vertices per side
    pub const TERRAIN_SIZE: f32 = 200.0;
    pub const TERRAIN_RESOLUTION: u32 = 64;
    /// Rolling hills: sin(x * FREQ_X) * AMP_X + cos(z * FREQ_Z) * AMP_Z
    pub const TERRAIN_FREQ_X: f32 = 0.05;
    pub const TERRAIN_AMP_X: f32 = 3.0;
    pub const TERRAIN_FREQ_Z: f32 = 0.03;
    pub const TERRAIN_AMP_Z: f32 = 2.0;

    /// Throttle accelerations (units/s²)
    pub const FORWARD_ACCEL: f32 = 150.0;
    pub const REVERSE_ACCEL: f32 = 100.0;
    /// Steering rate (radians/s)
    pub const TURN_RATE: f32 = 2.0;
    /// Per-tick speed multiplier while braking
    pub const BRAKE_FACTOR: f32 = 0.9;
    /// Per-tick speed multiplier (rolling drag)
    pub const DRAG_FACTOR: f32 = 0.98;

    /// Slope sampling offset and how strongly slope feeds into speed
    pub const SLOPE_SAMPLE_DISTANCE: f32 = 1.0;
    pub const SLOPE_GAIN: f32 = 30.0;
    /// Slope magnitude beyond which the speed cap changes
    pub const SLOPE_THRESHOLD: f32 = 0.1;

    /// Base speed cap, and its downhill/uphill multipliers
    pub const MAX_SPEED: f32 = 8.0;
    pub const DOWNHILL_SPEED_MULTIPLIER: f32 = 1.5;
    pub const UPHILL_SPEED_MULTIPLIER: f32 = 0.75;
    /// Reverse is limited to this fraction of the forward cap
    pub const REVERSE_SPEED_FACTOR: f32 = 0.7;

    /// Speed multiplier applied when a move is blocked
    pub const COLLISION_SPEED_FACTOR: f32 = 0.1;
    /// Vehicle footprint radius for collisions
    pub const VEHICLE_RADIUS: f32 = 2.0;
    /// Body height above the terrain surface
    pub const GROUND_CLEARANCE: f32 = 0.75;
    /// HUD speed = round(|speed| * SPEED_DISPLAY_SCALE)
    pub const SPEED_DISPLAY_SCALE: f32 = 2.0;

    /// Minimum time between damage-causing collisions (ms)
    pub const COLLISION_COOLDOWN_MS: u64 = 2000;

    /// Collision buffer added around a rock's generated size
    pub const ROCK_BUFFER: f32 = 0.5;
    /// Half a 6-unit log plus buffer
    pub const LOG_RADIUS: f32 = 3.2;
    /// Canopy radius plus buffer
    pub const TREE_RADIUS: f32 = 2.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit travel direction on the ground plane for a heading.
///
/// Heading 0 faces -Z; positive headings turn toward -X.
#[inline]
pub fn heading_to_direction(heading: f32) -> glam::Vec2 {
    glam::Vec2::new(-heading.sin(), -heading.cos())
}
