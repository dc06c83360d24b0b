//! Input sources: keyboard state snapshotting and scripted playback
//!
//! Key codes follow the browser `KeyboardEvent.code` naming ("KeyW",
//! "ArrowUp", "Space") so a host can forward events unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::InputSource;
use crate::sim::TickInput;

/// Which key codes drive each logical signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub reverse: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub brake: Vec<String>,
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: codes(&["KeyW", "ArrowUp"]),
            reverse: codes(&["KeyS", "ArrowDown"]),
            left: codes(&["KeyA", "ArrowLeft"]),
            right: codes(&["KeyD", "ArrowRight"]),
            brake: codes(&["Space"]),
        }
    }
}

/// Currently held keys, updated from key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    bindings: KeyBindings,
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, code: &str) {
        self.pressed.insert(code.to_owned());
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    /// Drop every held key (focus loss)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    fn any_held(&self, codes: &[String]) -> bool {
        codes.iter().any(|c| self.pressed.contains(c))
    }

    /// Freeze the held keys into a tick input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            throttle_forward: self.any_held(&self.bindings.forward),
            throttle_reverse: self.any_held(&self.bindings.reverse),
            steer_left: self.any_held(&self.bindings.left),
            steer_right: self.any_held(&self.bindings.right),
            brake: self.any_held(&self.bindings.brake),
        }
    }
}

impl InputSource for KeyState {
    fn sample(&mut self) -> TickInput {
        self.snapshot()
    }
}

/// Replays fixed inputs for a number of frames each, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    segments: Vec<(u32, TickInput)>,
    index: usize,
    frames_into_segment: u32,
}

impl ScriptedInput {
    pub fn new(segments: Vec<(u32, TickInput)>) -> Self {
        Self {
            segments,
            index: 0,
            frames_into_segment: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> TickInput {
        while let Some(&(frames, input)) = self.segments.get(self.index) {
            if self.frames_into_segment < frames {
                self.frames_into_segment += 1;
                return input;
            }
            self.index += 1;
            self.frames_into_segment = 0;
        }
        TickInput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let mut keys = KeyState::default();
        keys.key_down("ArrowUp");
        keys.key_down("KeyA");
        keys.key_down("Space");
        let input = keys.snapshot();
        assert!(input.throttle_forward);
        assert!(input.steer_left);
        assert!(input.brake);
        assert!(!input.throttle_reverse);
        assert!(!input.steer_right);

        keys.key_up("ArrowUp");
        assert!(!keys.snapshot().throttle_forward);
        keys.release_all();
        assert!(keys.snapshot().is_idle());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut keys = KeyState::default();
        keys.key_down("KeyQ");
        keys.key_down("Escape");
        assert!(keys.sample().is_idle());
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            brake: vec!["ShiftLeft".into()],
            ..Default::default()
        };
        let mut keys = KeyState::new(bindings);
        keys.key_down("Space");
        assert!(!keys.snapshot().brake);
        keys.key_down("ShiftLeft");
        assert!(keys.snapshot().brake);
    }

    #[test]
    fn test_scripted_playback() {
        let fwd = TickInput {
            throttle_forward: true,
            ..Default::default()
        };
        let left = TickInput {
            steer_left: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::new(vec![(2, fwd), (0, left), (1, left)]);
        assert_eq!(script.sample(), fwd);
        assert_eq!(script.sample(), fwd);
        assert_eq!(script.sample(), left);
        assert!(!script.is_finished());
        assert!(script.sample().is_idle());
        assert!(script.is_finished());
    }
}
