//! Clock sources

use std::time::{Duration, Instant};

use super::Clock;

/// Wall clock backed by `Instant`
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last_frame: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
        }
    }
}

impl Clock for SystemClock {
    fn advance(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        delta.as_secs_f32()
    }

    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that advances a fixed step per frame
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    elapsed: Duration,
}

impl FixedClock {
    pub fn new(step_secs: f32) -> Self {
        Self {
            step: Duration::try_from_secs_f32(step_secs.max(0.0)).unwrap_or_default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }
}

impl Clock for FixedClock {
    fn advance(&mut self) -> f32 {
        self.elapsed += self.step;
        self.step.as_secs_f32()
    }

    fn now_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let mut clock = FixedClock::new(0.25);
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.advance(), 0.25);
        assert_eq!(clock.advance(), 0.25);
        assert_eq!(clock.now_ms(), 500);
    }

    #[test]
    fn test_negative_step_is_zero() {
        let mut clock = FixedClock::new(-1.0);
        assert_eq!(clock.advance(), 0.0);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_non_finite_step_is_zero() {
        let mut clock = FixedClock::new(f32::INFINITY);
        assert_eq!(clock.advance(), 0.0);
        let mut clock = FixedClock::new(f32::NAN);
        assert_eq!(clock.advance(), 0.0);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now_ms();
        assert!(clock.advance() >= 0.0);
        assert!(clock.now_ms() >= a);
    }
}
