//! Data-driven game balance
//!
//! Every constant the simulation uses can be overridden from a JSON file.
//! Missing sections and fields fall back to the defaults in `crate::consts`,
//! so a tuning file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Terrain extent and hill shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// World extent of the square terrain
    pub size: f32,
    /// Grid vertices per side
    pub resolution: u32,
    pub freq_x: f32,
    pub amp_x: f32,
    pub freq_z: f32,
    pub amp_z: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            size: TERRAIN_SIZE,
            resolution: TERRAIN_RESOLUTION,
            freq_x: TERRAIN_FREQ_X,
            amp_x: TERRAIN_AMP_X,
            freq_z: TERRAIN_FREQ_Z,
            amp_z: TERRAIN_AMP_Z,
        }
    }
}

/// Vehicle handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub forward_accel: f32,
    /// Magnitude of reverse acceleration (applied as negative)
    pub reverse_accel: f32,
    pub turn_rate: f32,
    pub brake_factor: f32,
    pub drag_factor: f32,
    pub slope_sample_distance: f32,
    pub slope_gain: f32,
    pub slope_threshold: f32,
    pub max_speed: f32,
    pub downhill_multiplier: f32,
    pub uphill_multiplier: f32,
    pub reverse_factor: f32,
    pub collision_speed_factor: f32,
    pub vehicle_radius: f32,
    pub ground_clearance: f32,
    pub speed_display_scale: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            forward_accel: FORWARD_ACCEL,
            reverse_accel: REVERSE_ACCEL,
            turn_rate: TURN_RATE,
            brake_factor: BRAKE_FACTOR,
            drag_factor: DRAG_FACTOR,
            slope_sample_distance: SLOPE_SAMPLE_DISTANCE,
            slope_gain: SLOPE_GAIN,
            slope_threshold: SLOPE_THRESHOLD,
            max_speed: MAX_SPEED,
            downhill_multiplier: DOWNHILL_SPEED_MULTIPLIER,
            uphill_multiplier: UPHILL_SPEED_MULTIPLIER,
            reverse_factor: REVERSE_SPEED_FACTOR,
            collision_speed_factor: COLLISION_SPEED_FACTOR,
            vehicle_radius: VEHICLE_RADIUS,
            ground_clearance: GROUND_CLEARANCE,
            speed_display_scale: SPEED_DISPLAY_SCALE,
        }
    }
}

/// Damage pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTuning {
    pub cooldown_ms: u64,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self {
            cooldown_ms: COLLISION_COOLDOWN_MS,
        }
    }
}

/// How many of one obstacle kind to scatter, and over what centred square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterTuning {
    pub count: u32,
    /// Side length of the square region (centred on the origin)
    pub extent: f32,
}

/// Obstacle population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Seed for obstacle placement
    pub seed: u64,
    pub rocks: ScatterTuning,
    pub logs: ScatterTuning,
    pub trees: ScatterTuning,
    /// Rock generated size range [min, max)
    pub rock_size_min: f32,
    pub rock_size_max: f32,
    /// Obstacles may not overlap this disc around the spawn point
    pub spawn_clearance: f32,
    /// Placement re-rolls before an obstacle is skipped
    pub max_placement_attempts: u32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed_d21e,
            rocks: ScatterTuning {
                count: 20,
                extent: 180.0,
            },
            logs: ScatterTuning {
                count: 15,
                extent: 160.0,
            },
            trees: ScatterTuning {
                count: 30,
                extent: 200.0,
            },
            rock_size_min: 1.0,
            rock_size_max: 3.0,
            spawn_clearance: 2.0 * VEHICLE_RADIUS,
            max_placement_attempts: 16,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub terrain: TerrainTuning,
    pub vehicle: VehicleTuning,
    pub damage: DamageTuning,
    pub world: WorldTuning,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn require_unit_factor(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults if it is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!(
                    "Using default tuning ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        let t = &self.terrain;
        require_positive("terrain.size", t.size)?;
        if t.resolution < 2 {
            return Err(invalid(
                "terrain.resolution",
                format!("must be at least 2, got {}", t.resolution),
            ));
        }
        for (field, value) in [
            ("terrain.freq_x", t.freq_x),
            ("terrain.amp_x", t.amp_x),
            ("terrain.freq_z", t.freq_z),
            ("terrain.amp_z", t.amp_z),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        let v = &self.vehicle;
        require_positive("vehicle.max_speed", v.max_speed)?;
        require_positive("vehicle.vehicle_radius", v.vehicle_radius)?;
        require_positive("vehicle.slope_sample_distance", v.slope_sample_distance)?;
        require_positive("vehicle.downhill_multiplier", v.downhill_multiplier)?;
        require_positive("vehicle.uphill_multiplier", v.uphill_multiplier)?;
        require_unit_factor("vehicle.brake_factor", v.brake_factor)?;
        require_unit_factor("vehicle.drag_factor", v.drag_factor)?;
        require_unit_factor("vehicle.reverse_factor", v.reverse_factor)?;
        require_unit_factor("vehicle.collision_speed_factor", v.collision_speed_factor)?;
        for (field, value) in [
            ("vehicle.forward_accel", v.forward_accel),
            ("vehicle.reverse_accel", v.reverse_accel),
            ("vehicle.turn_rate", v.turn_rate),
            ("vehicle.slope_gain", v.slope_gain),
            ("vehicle.slope_threshold", v.slope_threshold),
            ("vehicle.ground_clearance", v.ground_clearance),
            ("vehicle.speed_display_scale", v.speed_display_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        let w = &self.world;
        if !(w.rock_size_min > 0.0 && w.rock_size_min < w.rock_size_max) {
            return Err(invalid(
                "world.rock_size_min",
                format!(
                    "rock size range [{}, {}) is empty or non-positive",
                    w.rock_size_min, w.rock_size_max
                ),
            ));
        }
        for (field, scatter) in [
            ("world.rocks.extent", w.rocks),
            ("world.logs.extent", w.logs),
            ("world.trees.extent", w.trees),
        ] {
            require_positive(field, scatter.extent)?;
        }
        if !w.spawn_clearance.is_finite() || w.spawn_clearance < 0.0 {
            return Err(invalid("world.spawn_clearance", "must be non-negative"));
        }

        Ok(())
    }
}
