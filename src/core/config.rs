//! Battle configuration.
//!
//! The numeric rules of combat are fixed contracts, not tuning knobs, but
//! they live in one place so drivers and tests can name them.

use serde::{Deserialize, Serialize};

/// Resource cost of a basic attack.
pub const DEFAULT_ATTACK_COST: i64 = 10;

/// Rolls are drawn uniformly from `[0, DEFAULT_MAX_ROLL]`.
pub const DEFAULT_MAX_ROLL: i64 = 5;

/// Turn-order slots per roster per round.
pub const DEFAULT_ACTIVE_SLOTS: usize = 2;

/// Illegal actions tolerated from one action source in a single turn.
pub const DEFAULT_MAX_REJECTIONS: u32 = 16;

/// Configuration for a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Resource spent by a basic attack.
    pub attack_cost: i64,

    /// Upper bound (inclusive) of the per-action roll.
    pub max_roll: i64,

    /// Number of roster slots that take turns each round.
    pub active_slots: usize,

    /// Rejections allowed per turn before the battle is aborted.
    pub max_rejections: u32,

    /// Optional hard cap on rounds. `None` runs to completion.
    pub max_rounds: Option<u32>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            attack_cost: DEFAULT_ATTACK_COST,
            max_roll: DEFAULT_MAX_ROLL,
            active_slots: DEFAULT_ACTIVE_SLOTS,
            max_rejections: DEFAULT_MAX_REJECTIONS,
            max_rounds: None,
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the basic attack cost.
    #[must_use]
    pub fn with_attack_cost(mut self, cost: i64) -> Self {
        self.attack_cost = cost;
        self
    }

    /// Set the inclusive upper bound of rolls.
    #[must_use]
    pub fn with_max_roll(mut self, max_roll: i64) -> Self {
        self.max_roll = max_roll;
        self
    }

    /// Set the number of active turn-order slots per roster.
    #[must_use]
    pub fn with_active_slots(mut self, slots: usize) -> Self {
        self.active_slots = slots;
        self
    }

    /// Set the per-turn rejection limit.
    #[must_use]
    pub fn with_max_rejections(mut self, limit: u32) -> Self {
        self.max_rejections = limit;
        self
    }

    /// Cap the battle at `rounds` rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }
}
