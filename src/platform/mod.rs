//! Platform abstraction layer
//!
//! The boundaries between the simulation and its host:
//! - Time/ticks (`Clock`)
//! - Input events (`InputSource`)
//! - Drawing (`RenderTarget`)

pub mod input;
pub mod time;

pub use input::{KeyBindings, KeyState, ScriptedInput};
pub use time::{FixedClock, SystemClock};

use crate::sim::{FrameReport, TickInput};

/// Supplies one input snapshot per tick
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
}

/// Supplies frame deltas and a monotonic millisecond timestamp
pub trait Clock {
    /// Seconds elapsed since the previous call (never negative)
    fn advance(&mut self) -> f32;
    /// Monotonic time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Consumes the per-frame report; never mutates simulation state
pub trait RenderTarget {
    fn present(&mut self, frame: &FrameReport);
}

impl<F: FnMut(&FrameReport)> RenderTarget for F {
    fn present(&mut self, frame: &FrameReport) {
        self(frame)
    }
}
