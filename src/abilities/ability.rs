//! Abilities: immutable template data plus per-owner cooldown state.
//!
//! An `Ability` owns its prerequisites by value, so cloning one deep-copies
//! the whole prerequisite tree. Two combatants holding "the same" ability
//! therefore never share cooldown state.
//!
//! ## Cooldown lifecycle
//!
//! - `cooldown_remaining` starts at 0
//! - `activate` sets it to `cooldown_length`, whatever it was before
//! - `decay_cooldown` lowers it by 1 at each round end, never below 0

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Stable string identifier of an ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityId(String);

impl AbilityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AbilityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A combat ability.
///
/// `potency` is signed: positive values deal damage, negative values heal
/// by their magnitude.
///
/// ## Example
///
/// ```
/// use rust_skirmish::abilities::Ability;
///
/// let leaf = Ability::new("spark", "Spark", 6, 5, 1);
/// let mid = Ability::new("flare", "Flare", 12, 8, 2).with_prerequisite(leaf);
///
/// assert_eq!(mid.total_cost(), 13);
/// assert_eq!(mid.depth(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    id: AbilityId,
    name: String,
    potency: i64,
    resource_cost: u32,
    cooldown_length: u32,
    cooldown_remaining: u32,
    prerequisites: Vec<Ability>,
}

impl Ability {
    /// Create an ability with no prerequisites and no active cooldown.
    #[must_use]
    pub fn new(
        id: impl Into<AbilityId>,
        name: impl Into<String>,
        potency: i64,
        resource_cost: u32,
        cooldown_length: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            potency,
            resource_cost,
            cooldown_length,
            cooldown_remaining: 0,
            prerequisites: Vec::new(),
        }
    }

    /// Add a prerequisite (builder pattern).
    #[must_use]
    pub fn with_prerequisite(mut self, prerequisite: Ability) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    /// Add a prerequisite in place.
    pub fn add_prerequisite(&mut self, prerequisite: Ability) {
        self.prerequisites.push(prerequisite);
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &AbilityId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn potency(&self) -> i64 {
        self.potency
    }

    /// Resource cost as the signed type pools are kept in.
    #[must_use]
    pub fn resource_cost(&self) -> i64 {
        i64::from(self.resource_cost)
    }

    #[must_use]
    pub fn cooldown_length(&self) -> u32 {
        self.cooldown_length
    }

    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    #[must_use]
    pub fn prerequisites(&self) -> &[Ability] {
        &self.prerequisites
    }

    /// True when the cooldown has fully decayed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// True when a negative potency makes this a heal.
    #[must_use]
    pub fn is_healing(&self) -> bool {
        self.potency < 0
    }

    // === Cooldown state ===

    /// Can the owner fire this ability with `owner_resource` available?
    ///
    /// Prerequisites are not consulted here; they only gate unlocking.
    #[must_use]
    pub fn can_activate(&self, owner_resource: i64) -> bool {
        owner_resource >= self.resource_cost() && self.is_ready()
    }

    /// Start the cooldown and yield the potency for the caller to resolve.
    ///
    /// Does not touch any health or resource pool.
    pub fn activate(&mut self) -> i64 {
        self.cooldown_remaining = self.cooldown_length;
        self.potency
    }

    /// Lower the remaining cooldown by one round, floored at 0.
    pub fn decay_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    // === Prerequisite graph ===

    /// Try to unlock this ability given the already `unlocked` set.
    ///
    /// A prerequisite is satisfied when it is unlocked, when it has no
    /// prerequisites of its own, or when its own prerequisites are satisfied
    /// by the same rule. On success the id is inserted into `unlocked`. On
    /// failure `unlocked` is left untouched.
    pub fn resolve_prerequisites(&self, unlocked: &mut FxHashSet<AbilityId>) -> bool {
        if unlocked.contains(&self.id) {
            return true;
        }
        if !self.prerequisites_met(unlocked) {
            return false;
        }
        unlocked.insert(self.id.clone());
        true
    }

    fn prerequisites_met(&self, unlocked: &FxHashSet<AbilityId>) -> bool {
        self.prerequisites.iter().all(|p| {
            unlocked.contains(&p.id) || p.prerequisites.is_empty() || p.prerequisites_met(unlocked)
        })
    }

    /// Cost of this ability plus every prerequisite, counted once per edge.
    ///
    /// A prerequisite reachable through two branches is counted twice.
    #[must_use]
    pub fn total_cost(&self) -> u64 {
        u64::from(self.resource_cost)
            + self
                .prerequisites
                .iter()
                .map(Ability::total_cost)
                .sum::<u64>()
    }

    /// Length of the longest prerequisite chain; 0 for a leaf.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.prerequisites
            .iter()
            .map(|p| p.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
