//! Action representation: a closed set of verbs plus a target.
//!
//! Every turn, the acting combatant performs exactly one `Action`:
//! - `Attack` a living member of the opposing roster
//! - `Defend`, which needs no target and is always legal
//! - `UseAbility` by index into the actor's ability list, on a target
//!   from the side the ability's potency implies
//!
//! `ActionKind` is the target-free part, used for the legal-action set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::side::CombatantRef;

/// The verb of an action, without a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Basic attack, costs the configured attack cost.
    Attack,
    /// Enter the defensive stance until the end of the round.
    Defend,
    /// Use the ability at this index in the actor's ability list.
    UseAbility(usize),
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Attack => write!(f, "attack"),
            ActionKind::Defend => write!(f, "defend"),
            ActionKind::UseAbility(index) => write!(f, "ability #{}", index),
        }
    }
}

/// Legal action kinds for one actor.
///
/// SmallVec keeps the common case (attack, defend, a handful of abilities)
/// off the heap.
pub type LegalActions = SmallVec<[ActionKind; 8]>;

/// A complete action: verb plus target where one is needed.
///
/// ## Example
///
/// ```
/// use rust_skirmish::core::{Action, ActionKind, CombatantRef, Side};
///
/// let strike = Action::Attack { target: CombatantRef::new(Side::B, 0) };
/// assert_eq!(strike.kind(), ActionKind::Attack);
///
/// let guard = Action::Defend;
/// assert_eq!(guard.target(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Attack { target: CombatantRef },
    Defend,
    UseAbility { index: usize, target: CombatantRef },
}

impl Action {
    /// Build an action of the given kind aimed at `target`.
    ///
    /// `Defend` ignores the target.
    #[must_use]
    pub fn from_kind(kind: ActionKind, target: CombatantRef) -> Self {
        match kind {
            ActionKind::Attack => Action::Attack { target },
            ActionKind::Defend => Action::Defend,
            ActionKind::UseAbility(index) => Action::UseAbility { index, target },
        }
    }

    /// The target-free verb of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack { .. } => ActionKind::Attack,
            Action::Defend => ActionKind::Defend,
            Action::UseAbility { index, .. } => ActionKind::UseAbility(*index),
        }
    }

    /// The target, if this action has one.
    #[must_use]
    pub fn target(&self) -> Option<CombatantRef> {
        match self {
            Action::Attack { target } | Action::UseAbility { target, .. } => Some(*target),
            Action::Defend => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::side::Side;

    #[test]
    fn test_kind_round_trip() {
        let target = CombatantRef::new(Side::B, 1);

        for kind in [ActionKind::Attack, ActionKind::Defend, ActionKind::UseAbility(2)] {
            assert_eq!(Action::from_kind(kind, target).kind(), kind);
        }
    }

    #[test]
    fn test_defend_has_no_target() {
        let action = Action::from_kind(ActionKind::Defend, CombatantRef::new(Side::A, 0));
        assert_eq!(action, Action::Defend);
        assert_eq!(action.target(), None);
    }

    #[test]
    fn test_ability_target() {
        let target = CombatantRef::new(Side::A, 1);
        let action = Action::UseAbility { index: 3, target };

        assert_eq!(action.target(), Some(target));
        assert_eq!(action.kind(), ActionKind::UseAbility(3));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ActionKind::Attack.to_string(), "attack");
        assert_eq!(ActionKind::UseAbility(1).to_string(), "ability #1");
    }

    #[test]
    fn test_legal_actions_inline() {
        let mut legal = LegalActions::new();
        legal.push(ActionKind::Defend);
        legal.push(ActionKind::Attack);

        assert!(!legal.spilled());
        assert!(legal.contains(&ActionKind::Defend));
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::UseAbility {
            index: 0,
            target: CombatantRef::new(Side::B, 0),
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
