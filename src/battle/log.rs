//! Battle event log.
//!
//! Events are kept in an `im::Vector`, so cloning a `Battle` to explore a
//! line of play shares the history instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::phase::TurnSlot;
use crate::combatants::Effect;
use crate::core::{Action, CombatantRef};

/// One resolved action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub round: u32,
    pub actor: CombatantRef,
    pub action: Action,
    /// Roll drawn for the action. `None` for defend.
    pub roll: Option<i64>,
    pub effect: Effect,
    /// Target health after the effect landed.
    pub target_health: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    RoundStarted { round: u32 },
    /// The slot's occupant was absent or defeated.
    TurnSkipped { round: u32, slot: TurnSlot },
    ActionResolved(ActionRecord),
    RoundEnded { round: u32 },
    BattleEnded(Outcome),
}

/// Append-only record of everything a battle did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    events: Vector<BattleEvent>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push_back(event);
    }

    #[must_use]
    pub fn events(&self) -> &Vector<BattleEvent> {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Resolved actions only, in order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionRecord> {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::ActionResolved(record) => Some(record),
            _ => None,
        })
    }

    /// The most recently resolved action.
    #[must_use]
    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.events.iter().rev().find_map(|event| match event {
            BattleEvent::ActionResolved(record) => Some(record),
            _ => None,
        })
    }

    /// The outcome, once the battle has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match self.events.back() {
            Some(BattleEvent::BattleEnded(outcome)) => Some(outcome),
            _ => None,
        }
    }
}
