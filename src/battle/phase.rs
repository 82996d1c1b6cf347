//! Scheduler states and turn order.
//!
//! A round walks `RoundStart`, then one `ActorTurn` per turn slot, then
//! `RoundEnd`. Slot order interleaves the sides: slot 0 of A, slot 0 of B,
//! slot 1 of A, slot 1 of B, and so on up to the configured slot count.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::core::{CombatantRef, Side};

/// One position in the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnSlot {
    pub side: Side,
    pub slot: usize,
}

impl TurnSlot {
    #[must_use]
    pub const fn new(side: Side, slot: usize) -> Self {
        Self { side, slot }
    }

    /// The roster member this slot belongs to.
    #[must_use]
    pub const fn actor(self) -> CombatantRef {
        CombatantRef::new(self.side, self.slot)
    }

    /// The first slot of every round.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(Side::A, 0)
    }

    /// The slot after this one, or `None` once every slot has had its turn.
    #[must_use]
    pub fn next(self, active_slots: usize) -> Option<Self> {
        match self.side {
            Side::A => Some(Self::new(Side::B, self.slot)),
            Side::B if self.slot + 1 < active_slots => Some(Self::new(Side::A, self.slot + 1)),
            Side::B => None,
        }
    }
}

impl std::fmt::Display for TurnSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot {}", self.side, self.slot)
    }
}

/// Where the scheduler is in the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    RoundStart,
    ActorTurn(TurnSlot),
    RoundEnd,
    Terminal(Outcome),
}

impl BattlePhase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::Terminal(_))
    }
}
