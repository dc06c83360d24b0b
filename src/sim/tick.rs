//! Per-frame simulation tick
//!
//! Advances the vehicle, feeds collisions into the damage model and reports
//! everything the renderer needs for this frame.

use serde::{Deserialize, Serialize};

use super::collision::Obstacle;
use super::damage::{DamageLevel, DamageTransition};
use super::state::{DrivePhase, Simulation};
use super::vehicle::VehicleState;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub throttle_forward: bool,
    pub throttle_reverse: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub brake: bool,
}

impl TickInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Something the renderer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A move was blocked by this obstacle
    Collision(Obstacle),
    /// Damage advanced a level
    Damage(DamageTransition),
    /// The vehicle is wrecked; emitted once per run
    GameOver,
}

/// What a tick hands to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub vehicle: VehicleState,
    /// `round(|speed| * speed_display_scale)`
    pub display_speed: u32,
    pub damage: DamageLevel,
    pub phase: DrivePhase,
    pub events: Vec<SimEvent>,
}

impl FrameReport {
    fn snapshot(sim: &Simulation, events: Vec<SimEvent>) -> Self {
        Self {
            vehicle: sim.vehicle,
            display_speed: sim.display_speed(),
            damage: sim.damage.level(),
            phase: sim.phase,
            events,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.events.iter().any(|e| matches!(e, SimEvent::GameOver))
    }
}

/// Advance the simulation by `dt` seconds at clock time `now_ms`.
///
/// Negative `dt` is treated as zero. A wrecked simulation does not move.
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32, now_ms: u64) -> FrameReport {
    if sim.phase == DrivePhase::Wrecked {
        return FrameReport::snapshot(sim, Vec::new());
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    sim.time_ticks += 1;

    let outcome = sim
        .dynamics
        .step(&mut sim.vehicle, input, dt, &sim.heightfield, &sim.collisions);

    let mut events = Vec::new();
    if let Some(obstacle) = outcome.collided {
        events.push(SimEvent::Collision(obstacle));
        if let Some(transition) = sim.damage.on_collision(now_ms) {
            let game_over = transition.game_over;
            events.push(SimEvent::Damage(transition));
            if game_over {
                sim.phase = DrivePhase::Wrecked;
                events.push(SimEvent::GameOver);
            }
        }
    }

    let pos = sim.vehicle.position();
    log::debug!(
        "tick {}: pos ({:.2}, {:.2}, {:.2}) heading {:.2} speed {:.2} slope {:.3}",
        sim.time_ticks,
        pos.x,
        pos.y,
        pos.z,
        sim.vehicle.heading(),
        sim.vehicle.speed(),
        outcome.slope
    );

    FrameReport::snapshot(sim, events)
}
