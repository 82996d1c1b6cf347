//! Core engine types: sides, actions, RNG, configuration.
//!
//! These are the building blocks every other module addresses combatants
//! and actions with. They carry no combat rules of their own.

pub mod side;
pub mod rng;
pub mod config;
pub mod action;

pub use side::{CombatantRef, Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use config::BattleConfig;
pub use action::{Action, ActionKind, LegalActions};
