//! Deterministic simulation module
//!
//! All driving logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `tick` arguments
//! - Seeded RNG only (world generation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod damage;
pub mod slope;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;
pub mod world;

pub use collision::{CollisionIndex, Obstacle, ObstacleKind};
pub use damage::{
    CrackOverlay, DamageLevel, DamageModel, DamageTransition, DoorSide, VisualEffect,
    WRECKED_BODY_COLOR,
};
pub use slope::SlopeSampler;
pub use state::{DrivePhase, Simulation};
pub use terrain::{Elevation, Heightfield, TerrainProfile};
pub use tick::{FrameReport, SimEvent, TickInput, tick};
pub use vehicle::{StepOutcome, VehicleDynamics, VehicleState};
pub use world::WorldBuilder;
