//! Vehicle damage state machine
//!
//! Pristine -> Minor -> Major -> Wrecked, one step per collision, never back
//! except through `reset`. Each transition carries the visual effects the
//! renderer should apply; effects stack since damage never heals.

use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_COOLDOWN_MS;

/// Body color of a wrecked vehicle (dark gray)
pub const WRECKED_BODY_COLOR: u32 = 0x44_4444;

/// Discrete damage severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum DamageLevel {
    #[default]
    Pristine,
    Minor,
    Major,
    Wrecked,
}

/// Which windshield crack overlay to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrackOverlay {
    /// One jagged crack
    Single,
    /// Several dense cracks
    Dense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorSide {
    Left,
    Right,
}

/// A change the renderer applies to the vehicle model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualEffect {
    BendAntenna,
    RemoveAntenna,
    RevealCrack(CrackOverlay),
    HideCracks,
    HideWindshield,
    DetachDoor(DoorSide),
    /// Recolor the body panels (0xRRGGBB)
    RecolorBody(u32),
    RemoveExhaust,
}

const MINOR_EFFECTS: &[VisualEffect] = &[
    VisualEffect::BendAntenna,
    VisualEffect::RevealCrack(CrackOverlay::Single),
];

const MAJOR_EFFECTS: &[VisualEffect] = &[
    VisualEffect::RemoveAntenna,
    VisualEffect::RevealCrack(CrackOverlay::Dense),
    VisualEffect::DetachDoor(DoorSide::Left),
];

const WRECKED_EFFECTS: &[VisualEffect] = &[
    VisualEffect::HideCracks,
    VisualEffect::HideWindshield,
    VisualEffect::DetachDoor(DoorSide::Right),
    VisualEffect::RecolorBody(WRECKED_BODY_COLOR),
    VisualEffect::RemoveExhaust,
];

impl DamageLevel {
    pub fn as_u8(&self) -> u8 {
        match self {
            DamageLevel::Pristine => 0,
            DamageLevel::Minor => 1,
            DamageLevel::Major => 2,
            DamageLevel::Wrecked => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageLevel::Pristine => "pristine",
            DamageLevel::Minor => "minor",
            DamageLevel::Major => "major",
            DamageLevel::Wrecked => "wrecked",
        }
    }

    /// The next level up, `None` once wrecked
    pub fn next(&self) -> Option<Self> {
        match self {
            DamageLevel::Pristine => Some(DamageLevel::Minor),
            DamageLevel::Minor => Some(DamageLevel::Major),
            DamageLevel::Major => Some(DamageLevel::Wrecked),
            DamageLevel::Wrecked => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == DamageLevel::Wrecked
    }

    /// Effects applied when entering this level
    pub fn effects_on_entry(&self) -> &'static [VisualEffect] {
        match self {
            DamageLevel::Pristine => &[],
            DamageLevel::Minor => MINOR_EFFECTS,
            DamageLevel::Major => MAJOR_EFFECTS,
            DamageLevel::Wrecked => WRECKED_EFFECTS,
        }
    }
}

/// One accepted damage step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageTransition {
    pub from: DamageLevel,
    pub to: DamageLevel,
    pub effects: Vec<VisualEffect>,
    /// The vehicle is now wrecked and the run is over
    pub game_over: bool,
}

/// Damage level plus collision cooldown bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageModel {
    level: DamageLevel,
    /// Timestamp (ms) of the last collision that caused damage
    last_collision_ms: Option<u64>,
    cooldown_ms: u64,
}

impl Default for DamageModel {
    fn default() -> Self {
        Self::new(COLLISION_COOLDOWN_MS)
    }
}

impl DamageModel {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            level: DamageLevel::Pristine,
            last_collision_ms: None,
            cooldown_ms,
        }
    }

    #[inline]
    pub fn level(&self) -> DamageLevel {
        self.level
    }

    #[inline]
    pub fn last_collision_ms(&self) -> Option<u64> {
        self.last_collision_ms
    }

    #[inline]
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    #[inline]
    pub fn is_wrecked(&self) -> bool {
        self.level.is_terminal()
    }

    /// Whether a collision at `now_ms` falls inside the cooldown window
    pub fn in_cooldown(&self, now_ms: u64) -> bool {
        self.last_collision_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.cooldown_ms)
    }

    /// Register a collision. Returns the transition if damage was applied.
    ///
    /// Ignored once wrecked or while the cooldown from the previous damaging
    /// collision is still running.
    pub fn on_collision(&mut self, now_ms: u64) -> Option<DamageTransition> {
        let next = self.level.next()?;
        if self.in_cooldown(now_ms) {
            return None;
        }

        let from = self.level;
        self.level = next;
        self.last_collision_ms = Some(now_ms);

        log::info!("Vehicle damage level: {} ({})", next.as_u8(), next.as_str());
        if next.is_terminal() {
            log::info!("Vehicle destroyed");
        }

        Some(DamageTransition {
            from,
            to: next,
            effects: next.effects_on_entry().to_vec(),
            game_over: next.is_terminal(),
        })
    }

    /// Back to pristine with no collision history (new game)
    pub fn reset(&mut self) {
        self.level = DamageLevel::Pristine;
        self.last_collision_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_collision_applies_immediately() {
        let mut damage = DamageModel::default();
        let t = damage.on_collision(0).unwrap();
        assert_eq!(t.from, DamageLevel::Pristine);
        assert_eq!(t.to, DamageLevel::Minor);
        assert!(!t.game_over);
        assert_eq!(
            t.effects,
            vec![
                VisualEffect::BendAntenna,
                VisualEffect::RevealCrack(CrackOverlay::Single)
            ]
        );
        assert_eq!(damage.last_collision_ms(), Some(0));
    }

    #[test]
    fn test_cooldown_blocks_second_hit() {
        let mut damage = DamageModel::new(2000);
        assert!(damage.on_collision(1000).is_some());
        assert!(damage.on_collision(2999).is_none());
        assert_eq!(damage.level(), DamageLevel::Minor);
        // Exactly one cooldown later is allowed
        assert!(damage.on_collision(3000).is_some());
        assert_eq!(damage.level(), DamageLevel::Major);
    }

    #[test]
    fn test_blocked_hit_does_not_extend_cooldown() {
        let mut damage = DamageModel::new(2000);
        damage.on_collision(0);
        assert!(damage.on_collision(1500).is_none());
        assert_eq!(damage.last_collision_ms(), Some(0));
        assert!(damage.on_collision(2000).is_some());
    }

    #[test]
    fn test_full_progression_and_terminal_lock() {
        let mut damage = DamageModel::new(2000);
        let levels: Vec<_> = [0, 2000, 4000]
            .into_iter()
            .filter_map(|now| damage.on_collision(now))
            .collect();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[1].effects, MAJOR_EFFECTS.to_vec());

        let wreck = &levels[2];
        assert_eq!(wreck.to, DamageLevel::Wrecked);
        assert!(wreck.game_over);
        assert!(
            wreck
                .effects
                .contains(&VisualEffect::RecolorBody(WRECKED_BODY_COLOR))
        );
        assert!(damage.is_wrecked());

        // No further transitions, no further game over
        for now in [6000, 10_000, 1_000_000] {
            assert!(damage.on_collision(now).is_none());
        }
        assert_eq!(damage.level(), DamageLevel::Wrecked);
        assert_eq!(damage.last_collision_ms(), Some(4000));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut damage = DamageModel::new(2000);
        damage.on_collision(100);
        damage.on_collision(5000);
        damage.reset();
        assert_eq!(damage.level(), DamageLevel::Pristine);
        assert_eq!(damage.last_collision_ms(), None);
        // No cooldown carried over from before the reset
        assert!(damage.on_collision(5001).is_some());
    }

    #[test]
    fn test_level_ordering() {
        assert!(DamageLevel::Pristine < DamageLevel::Minor);
        assert!(DamageLevel::Major < DamageLevel::Wrecked);
        assert_eq!(DamageLevel::Wrecked.next(), None);
        assert_eq!(DamageLevel::Major.as_u8(), 2);
        assert!(DamageLevel::Pristine.effects_on_entry().is_empty());
    }

    proptest! {
        #[test]
        fn level_never_decreases(mut times in proptest::collection::vec(0u64..20_000, 1..40)) {
            times.sort_unstable();
            let mut damage = DamageModel::new(2000);
            let mut prev = damage.level();
            let mut game_overs = 0;
            for now in times {
                if let Some(t) = damage.on_collision(now) {
                    prop_assert_eq!(Some(t.to), t.from.next());
                    if t.game_over {
                        game_overs += 1;
                    }
                }
                prop_assert!(damage.level() >= prev);
                prev = damage.level();
            }
            prop_assert!(game_overs <= 1);
        }
    }
}
