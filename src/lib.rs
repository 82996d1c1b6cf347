//! # rust-skirmish
//!
//! A two-team, turn-based combat resolution engine.
//!
//! Two rosters of combatants take turns in a fixed slot order. Each turn
//! the acting combatant attacks, defends, or uses an ability; the battle
//! ends the moment either roster has no one left standing.
//!
//! ## Design Principles
//!
//! 1. **Injected Randomness**: Combat formulas take rolls as plain integers.
//!    Only the scheduler draws from a seeded `GameRng`, so a seed replays a
//!    battle exactly.
//!
//! 2. **Per-Owner State**: Abilities are values. Every combatant owns its
//!    copies, so cooldowns never leak between owners.
//!
//! 3. **Closed Actions**: `Action` is an enum. The scheduler matches it
//!    exhaustively and validates before mutating anything.
//!
//! ## Modules
//!
//! - `core`: Sides, addressing, actions, RNG, configuration
//! - `abilities`: Abilities, cooldowns, prerequisite graph, template pool
//! - `combatants`: Combatants and rosters
//! - `battle`: Scheduler, action sources, event log, outcome
//! - `error`: Setup, action, and battle errors

pub mod core;
pub mod abilities;
pub mod combatants;
pub mod battle;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, BattleConfig, CombatantRef, GameRng, GameRngState, LegalActions, Side, SideMap,
};

pub use crate::abilities::{Ability, AbilityDefinition, AbilityId, AbilityRegistry};

pub use crate::combatants::{AbilityCast, Combatant, CombatantRecord, Effect, Roster};

pub use crate::battle::{
    run_battle, ActionRecord, ActionSource, Battle, BattleEvent, BattleLog, BattlePhase, Outcome,
    RandomActionSource, ScriptedActionSource, Sources, TurnContext, TurnSlot,
};

pub use crate::error::{ActionError, BattleError, SetupError};
