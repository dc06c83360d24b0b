//! Prairie Drive entry point
//!
//! Headless native run: builds a world, drives a scripted lap and logs what a
//! renderer would draw. Pass a tuning JSON path as the first argument to
//! override the defaults.
//!
//! `RUST_LOG=debug` shows every tick.

use prairie_drive::consts::FRAME_DT;
use prairie_drive::platform::{FixedClock, RenderTarget, ScriptedInput};
use prairie_drive::sim::{FrameReport, SimEvent, Simulation, TickInput, VisualEffect};
use prairie_drive::{DriveLoop, Tuning};

/// Stands in for the 3D scene: logs the HUD and every model change
#[derive(Default)]
struct LogRenderer {
    frames: u64,
    last_speed: Option<u32>,
}

impl RenderTarget for LogRenderer {
    fn present(&mut self, frame: &FrameReport) {
        self.frames += 1;

        if self.last_speed != Some(frame.display_speed) && self.frames % 30 == 0 {
            let pos = frame.vehicle.position();
            log::info!(
                "speed {:>3} | pos ({:>7.2}, {:>5.2}, {:>7.2}) | damage {}",
                frame.display_speed,
                pos.x,
                pos.y,
                pos.z,
                frame.damage.as_str()
            );
            self.last_speed = Some(frame.display_speed);
        }

        for event in &frame.events {
            match event {
                SimEvent::Collision(obstacle) => {
                    log::info!("Hit a {}", obstacle.kind.as_str());
                }
                SimEvent::Damage(transition) => {
                    for effect in &transition.effects {
                        log::info!("  apply {}", describe(effect));
                    }
                }
                SimEvent::GameOver => {
                    log::info!("VEHICLE DESTROYED! Your jeep is completely wrecked.");
                }
            }
        }
    }
}

fn describe(effect: &VisualEffect) -> String {
    match effect {
        VisualEffect::BendAntenna => "bent antenna".to_string(),
        VisualEffect::RemoveAntenna => "antenna removed".to_string(),
        VisualEffect::RevealCrack(overlay) => format!("{:?} windshield crack", overlay),
        VisualEffect::HideCracks => "crack overlays hidden".to_string(),
        VisualEffect::HideWindshield => "windshield gone".to_string(),
        VisualEffect::DetachDoor(side) => format!("{:?} door fell off", side),
        VisualEffect::RecolorBody(color) => format!("body recolored #{:06x}", color),
        VisualEffect::RemoveExhaust => "exhaust pipe removed".to_string(),
    }
}

/// A drive that wanders across the prairie: straights, turns, a brake, a reverse
fn demo_script() -> ScriptedInput {
    let forward = TickInput {
        throttle_forward: true,
        ..Default::default()
    };
    let forward_left = TickInput {
        steer_left: true,
        ..forward
    };
    let forward_right = TickInput {
        steer_right: true,
        ..forward
    };
    let brake = TickInput {
        brake: true,
        ..Default::default()
    };
    let reverse = TickInput {
        throttle_reverse: true,
        ..Default::default()
    };

    ScriptedInput::new(vec![
        (240, forward),
        (90, forward_left),
        (300, forward),
        (60, brake),
        (90, reverse),
        (120, forward_right),
        (600, forward),
        (120, TickInput::default()),
    ])
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Prairie Drive (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    let sim = match Simulation::new(&tuning) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Cannot build world: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Terrain {}x{} over {} units, {} obstacles",
        sim.heightfield().resolution(),
        sim.heightfield().resolution(),
        sim.heightfield().size(),
        sim.collisions().len()
    );

    let mut game = DriveLoop::new(sim, FixedClock::new(FRAME_DT), demo_script(), LogRenderer::default());
    let frames = game.run(Some(1800));

    let sim = game.simulation();
    let pos = sim.vehicle().position();
    log::info!(
        "Finished after {} frames: pos ({:.1}, {:.1}, {:.1}), damage {}, phase {:?}",
        frames,
        pos.x,
        pos.y,
        pos.z,
        sim.damage().level().as_str(),
        sim.phase()
    );
}
