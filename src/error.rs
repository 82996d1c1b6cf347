//! Error types for battle setup, action resolution, and battle driving.
//!
//! - `SetupError`: malformed rosters, combatants, or ability pools. Raised
//!   at construction time, before any combat state exists.
//! - `ActionError`: an action that is not legal right now. Never fatal; the
//!   scheduler reports it to the action source and asks again.
//! - `BattleError`: the battle could not run to an outcome.

use thiserror::Error;

use crate::abilities::AbilityId;
use crate::core::{CombatantRef, Side};

pub type Result<T> = std::result::Result<T, BattleError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("roster {name:?} has no members")]
    EmptyRoster { name: String },

    #[error("combatant {name:?} has non-positive max health {value}")]
    NonPositiveMaxHealth { name: String, value: i64 },

    #[error("combatant {name:?} has non-positive max resource {value}")]
    NonPositiveMaxResource { name: String, value: i64 },

    #[error("battle needs at least one active slot per roster")]
    NoActiveSlots,

    #[error("ability {0} is already registered")]
    DuplicateAbility(AbilityId),

    #[error("ability {0} is not registered")]
    UnknownAbility(AbilityId),

    #[error("prerequisite cycle: {}", format_path(.path))]
    PrerequisiteCycle { path: Vec<AbilityId> },
}

fn format_path(path: &[AbilityId]) -> String {
    path.iter()
        .map(AbilityId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0} is absent or defeated and cannot act")]
    ActorUnavailable(CombatantRef),

    #[error("no ability at index {index}")]
    UnknownAbility { index: usize },

    #[error("ability {ability} is not ready (cooldown {cooldown_remaining}, resource {resource}/{cost})")]
    AbilityNotReady {
        ability: AbilityId,
        cooldown_remaining: u32,
        resource: i64,
        cost: i64,
    },

    #[error("attack needs {cost} resource, actor has {resource}")]
    InsufficientResource { resource: i64, cost: i64 },

    #[error("target {0} does not exist")]
    TargetAbsent(CombatantRef),

    #[error("target {0} is already defeated")]
    TargetDefeated(CombatantRef),

    #[error("target {target} must be on {expected}")]
    WrongSide { target: CombatantRef, expected: Side },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("action source for {side} stopped supplying actions in round {round}")]
    Abandoned { side: Side, round: u32 },

    #[error("{actor} submitted {attempts} illegal actions in one turn")]
    RejectionLimit { actor: CombatantRef, attempts: u32 },

    #[error("no slot could act in round {round} while both rosters still stand")]
    Stalemate { round: u32 },

    #[error("battle exceeded the round limit of {limit}")]
    RoundLimit { limit: u32 },

    #[error("battle is already over")]
    Finished,
}
