//! Combatants and rosters.
//!
//! ## Key Types
//!
//! - `CombatantRecord`: Flat stat block a combatant is built from
//! - `Combatant`: Pools, stance, owned abilities, combat formulas
//! - `AbilityCast`: A paid-for ability awaiting its target
//! - `Effect`: What an action did to its target
//! - `Roster`: One side's ordered team

pub mod combatant;
pub mod roster;

pub use combatant::{AbilityCast, Combatant, CombatantRecord, Effect};
pub use roster::Roster;
