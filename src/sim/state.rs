//! Simulation state
//!
//! One `Simulation` owns the terrain, the obstacles, the vehicle and its
//! damage. Presentation only ever gets shared references or copies.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionIndex, Obstacle};
use super::damage::DamageModel;
use super::terrain::Heightfield;
use super::vehicle::{VehicleDynamics, VehicleState};
use super::world::WorldBuilder;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivePhase {
    /// Vehicle responds to input
    Driving,
    /// Vehicle destroyed, run ended
    Wrecked,
}

/// The whole simulated world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub(crate) heightfield: Heightfield,
    pub(crate) collisions: CollisionIndex,
    pub(crate) dynamics: VehicleDynamics,
    pub(crate) vehicle: VehicleState,
    pub(crate) damage: DamageModel,
    pub(crate) phase: DrivePhase,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    speed_display_scale: f32,
}

impl Simulation {
    /// Generate terrain and obstacles from `tuning` and spawn the vehicle at the origin.
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn new(tuning: &Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let heightfield = Heightfield::from_tuning(&tuning.terrain);
        let obstacles = WorldBuilder::new(tuning.world.clone()).build();
        Ok(Self::with_world(tuning, heightfield, obstacles))
    }

    /// Use a caller-supplied terrain and obstacle set
    pub fn with_world(tuning: &Tuning, heightfield: Heightfield, obstacles: Vec<Obstacle>) -> Self {
        let dynamics = VehicleDynamics::new(tuning.vehicle.clone());
        let vehicle = Self::spawn_vehicle(&heightfield, &dynamics);
        Self {
            heightfield,
            collisions: CollisionIndex::new(obstacles),
            dynamics,
            vehicle,
            damage: DamageModel::new(tuning.damage.cooldown_ms),
            phase: DrivePhase::Driving,
            time_ticks: 0,
            speed_display_scale: tuning.vehicle.speed_display_scale,
        }
    }

    fn spawn_vehicle(heightfield: &Heightfield, dynamics: &VehicleDynamics) -> VehicleState {
        VehicleState::spawn(heightfield, 0.0, 0.0, 0.0, dynamics.tuning().ground_clearance)
    }

    /// Put the vehicle at a specific pose (scenario setup)
    pub fn place_vehicle(&mut self, x: f32, z: f32, heading: f32, speed: f32) {
        let clearance = self.dynamics.tuning().ground_clearance;
        self.vehicle = VehicleState::spawn(&self.heightfield, x, z, heading, clearance).with_speed(speed);
    }

    /// Full game restart: pristine vehicle back at the spawn, same world
    pub fn restart(&mut self) {
        self.vehicle = Self::spawn_vehicle(&self.heightfield, &self.dynamics);
        self.damage.reset();
        self.phase = DrivePhase::Driving;
        self.time_ticks = 0;
        log::info!("Simulation restarted");
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    pub fn collisions(&self) -> &CollisionIndex {
        &self.collisions
    }

    pub fn damage(&self) -> &DamageModel {
        &self.damage
    }

    pub fn dynamics(&self) -> &VehicleDynamics {
        &self.dynamics
    }

    pub fn phase(&self) -> DrivePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// HUD speed readout for the current vehicle speed
    pub fn display_speed(&self) -> u32 {
        self.vehicle.display_speed(self.speed_display_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::damage::DamageLevel;
    use crate::sim::terrain::TerrainProfile;

    #[test]
    fn test_new_spawns_on_terrain() {
        let tuning = Tuning::default();
        let sim = Simulation::new(&tuning).unwrap();
        let pos = sim.vehicle().position();
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.z, 0.0);
        let ground = sim.heightfield().height(0.0, 0.0);
        assert!((pos.y - (ground + tuning.vehicle.ground_clearance)).abs() < 1e-6);
        assert_eq!(sim.vehicle().speed(), 0.0);
        assert_eq!(sim.phase(), DrivePhase::Driving);
        assert_eq!(sim.collisions().len(), 65);
        // The spawn point is kept clear
        assert!(!sim.collisions().intersects(0.0, 0.0, tuning.vehicle.vehicle_radius));
    }

    #[test]
    fn test_new_rejects_bad_world_tuning() {
        let mut tuning = Tuning::default();
        tuning.world.rock_size_min = 3.0;
        tuning.world.rock_size_max = 1.0;
        assert!(matches!(
            Simulation::new(&tuning),
            Err(TuningError::Invalid { field: "world.rock_size_min", .. })
        ));

        let mut tuning = Tuning::default();
        tuning.world.logs.extent = 0.0;
        assert!(matches!(
            Simulation::new(&tuning),
            Err(TuningError::Invalid { field: "world.logs.extent", .. })
        ));
    }

    #[test]
    fn test_restart_resets_vehicle_and_damage() {
        let tuning = Tuning::default();
        let field = Heightfield::generate(100.0, 16, TerrainProfile::FLAT);
        let mut sim = Simulation::with_world(&tuning, field, Vec::new());
        sim.place_vehicle(10.0, -4.0, 1.0, 6.0);
        sim.damage.on_collision(0);
        sim.phase = DrivePhase::Wrecked;

        sim.restart();
        assert_eq!(sim.vehicle().position().x, 0.0);
        assert_eq!(sim.vehicle().speed(), 0.0);
        assert_eq!(sim.damage().level(), DamageLevel::Pristine);
        assert_eq!(sim.phase(), DrivePhase::Driving);
    }

    #[test]
    fn test_display_speed_uses_scale() {
        let field = Heightfield::generate(100.0, 16, TerrainProfile::FLAT);
        let mut sim = Simulation::with_world(&Tuning::default(), field, Vec::new());
        sim.place_vehicle(0.0, 0.0, 0.0, -4.2);
        assert_eq!(sim.display_speed(), 8);
    }
}
