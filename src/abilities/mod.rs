//! Ability system: templates, cooldown state, and the prerequisite graph.
//!
//! ## Key Types
//!
//! - `AbilityId`: Stable string identifier
//! - `Ability`: Template data, per-owner cooldown, owned prerequisites
//! - `AbilityDefinition`: Flat record with prerequisites by id
//! - `AbilityRegistry`: Template pool that links definitions into trees

pub mod ability;
pub mod registry;

pub use ability::{Ability, AbilityId};
pub use registry::{AbilityDefinition, AbilityRegistry};
