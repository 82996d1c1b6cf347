//! Deterministic random number generation for combat rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical battles
//! - **Injected**: Formulas never draw; callers pass the roll in
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use rust_skirmish::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll(5);
//! assert!((0..=5).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backing every draw a battle makes.
///
/// Uses ChaCha8 for speed while keeping the stream reproducible from a seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a roll uniformly from `[0, max]` inclusive.
    ///
    /// A negative `max` is treated as zero.
    pub fn roll(&mut self, max: i64) -> i64 {
        self.inner.gen_range(0..=max.max(0))
    }

    /// Pick a uniform index in `0..len`.
    ///
    /// Returns `None` for an empty range.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.gen_range(0..len))
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of
/// how many rolls have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{ActionSource, Battle, RandomActionSource, Sources};
    use crate::combatants::{Combatant, CombatantRecord, Roster};
    use crate::core::{BattleConfig, SideMap};

    fn fighter(name: &str, strength: i64, defence: i64, endurance: i64) -> Combatant {
        Combatant::new(CombatantRecord::new(name, "Fighter", 100, 100, strength, defence, endurance)).unwrap()
    }

    fn random_sources() -> Sources<'static> {
        SideMap::new(
            Box::new(RandomActionSource) as Box<dyn ActionSource>,
            Box::new(RandomActionSource) as Box<dyn ActionSource>,
        )
    }

    #[test]
    fn test_same_seed_same_rolls_within_default_range() {
        let max = BattleConfig::default().max_roll;
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let seq1: Vec<_> = (0..100).map(|_| rng1.roll(max)).collect();
        let seq2: Vec<_> = (0..100).map(|_| rng2.roll(max)).collect();

        assert_eq!(seq1, seq2);
        assert!(seq1.iter().all(|r| (0..=max).contains(r)));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll(1000)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..500 {
            let roll = rng.roll(5);
            assert!((0..=5).contains(&roll));
            seen[roll as usize] = true;
        }

        // Both ends of the inclusive range are reachable
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_roll_zero_and_negative_max() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.roll(0), 0);
        assert_eq!(rng.roll(-3), 0);
    }

    #[test]
    fn test_pick() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.pick(0), None);
        assert_eq!(rng.pick(1), Some(0));

        for _ in 0..50 {
            let idx = rng.pick(4).unwrap();
            assert!(idx < 4);
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_checkpoint_replays_rest_of_battle() {
        let mut battle = Battle::new(
            Roster::new("Red").with_member(fighter("A", 15, 10, 12)),
            Roster::new("Blue").with_member(fighter("B", 10, 10, 10)),
            BattleConfig::default(),
        )
        .unwrap();
        let mut sources = random_sources();
        let mut rng = GameRng::new(42);
        for _ in 0..6 {
            assert!(battle.step(&mut sources, &mut rng).unwrap().is_none());
        }

        let checkpoint = rng.state();
        let mut resumed = battle.clone();
        let outcome = battle.run(&mut sources, &mut rng).unwrap();

        let mut restored = GameRng::from_state(&checkpoint);
        let replayed = resumed.run(&mut random_sources(), &mut restored).unwrap();

        assert_eq!(replayed, outcome);
        assert_eq!(resumed.log(), battle.log());
        assert_eq!(restored.seed(), 42);
    }

    #[test]
    fn test_state_json_resumes_roll_stream() {
        let mut rng = GameRng::new(7);
        for _ in 0..25 {
            rng.roll(5);
        }
        let state = rng.state();
        assert!(state.word_pos > 0);

        let json = serde_json::to_string(&state).unwrap();
        let loaded: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, state);

        let mut resumed = GameRng::from_state(&loaded);
        let expected: Vec<_> = (0..10).map(|_| rng.roll(5)).collect();
        let actual: Vec<_> = (0..10).map(|_| resumed.roll(5)).collect();
        assert_eq!(actual, expected);
    }
}
