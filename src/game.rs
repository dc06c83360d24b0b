//! Cooperative frame loop
//!
//! One `step` is one displayed frame: read the clock, sample input, tick the
//! simulation once, hand the report to the renderer. Stopping is just not
//! calling `step` again; nothing needs tearing down.

use crate::consts::MAX_FRAME_DT;
use crate::platform::{Clock, InputSource, RenderTarget};
use crate::sim::{DrivePhase, Simulation, tick};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Drives a `Simulation` from a clock, an input source and a render target
pub struct DriveLoop<C, I, R> {
    sim: Simulation,
    clock: C,
    input: I,
    target: R,
    /// Frame deltas above this are cut down (spiral-of-death guard)
    max_frame_dt: f32,
    stop_requested: bool,
    frames: u64,
}

impl<C: Clock, I: InputSource, R: RenderTarget> DriveLoop<C, I, R> {
    pub fn new(sim: Simulation, clock: C, input: I, target: R) -> Self {
        Self {
            sim,
            clock,
            input,
            target,
            max_frame_dt: MAX_FRAME_DT,
            stop_requested: false,
            frames: 0,
        }
    }

    pub fn with_max_frame_dt(mut self, max_frame_dt: f32) -> Self {
        self.max_frame_dt = max_frame_dt.max(0.0);
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ask the loop not to schedule another frame
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    /// Restart the run on the same world and resume scheduling
    pub fn restart(&mut self) {
        self.sim.restart();
        self.stop_requested = false;
    }

    fn should_stop(&self) -> bool {
        self.stop_requested || self.sim.phase() == DrivePhase::Wrecked
    }

    /// Run one frame
    pub fn step(&mut self) -> LoopControl {
        if self.should_stop() {
            return LoopControl::Stop;
        }

        let dt = self.clock.advance().min(self.max_frame_dt);
        let now_ms = self.clock.now_ms();
        let input = self.input.sample();

        let report = tick(&mut self.sim, &input, dt, now_ms);
        self.target.present(&report);
        self.frames += 1;

        if report.is_game_over() {
            log::info!("Game over after {} frames", self.frames);
        }

        if self.should_stop() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Step until stopped, wrecked, or `max_frames` frames have run.
    /// Returns the number of frames run by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let start = self.frames;
        while max_frames.is_none_or(|max| self.frames - start < max) {
            if self.step() == LoopControl::Stop {
                break;
            }
        }
        self.frames - start
    }
}
