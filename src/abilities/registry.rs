//! Ability registry: the shared template pool.
//!
//! Ability data arrives as flat `AbilityDefinition` records that name their
//! prerequisites by id. The registry links those ids into owned
//! prerequisite trees on demand, so every combatant gets an independent
//! copy. Linking walks the graph with an explicit path, which rejects
//! cycles and dangling ids instead of recursing forever.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ability::{Ability, AbilityId};
use crate::error::SetupError;

/// Flat ability record, prerequisites referenced by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub potency: i64,
    pub resource_cost: u32,
    pub cooldown: u32,
    #[serde(default)]
    pub prerequisites: Vec<AbilityId>,
}

impl AbilityDefinition {
    #[must_use]
    pub fn new(
        id: impl Into<AbilityId>,
        name: impl Into<String>,
        potency: i64,
        resource_cost: u32,
        cooldown: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            potency,
            resource_cost,
            cooldown,
            prerequisites: Vec::new(),
        }
    }

    /// Require another ability by id (builder pattern).
    #[must_use]
    pub fn requires(mut self, id: impl Into<AbilityId>) -> Self {
        self.prerequisites.push(id.into());
        self
    }
}

/// Registry of ability definitions.
///
/// ## Example
///
/// ```
/// use rust_skirmish::abilities::{AbilityDefinition, AbilityRegistry};
///
/// let mut registry = AbilityRegistry::new();
/// registry.register(AbilityDefinition::new("spark", "Spark", 6, 5, 1)).unwrap();
/// registry
///     .register(AbilityDefinition::new("flare", "Flare", 12, 8, 2).requires("spark"))
///     .unwrap();
///
/// let flare = registry.instantiate(&"flare".into()).unwrap();
/// assert_eq!(flare.total_cost(), 13);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    definitions: FxHashMap<AbilityId, AbilityDefinition>,
    order: Vec<AbilityId>,
}

impl AbilityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Prerequisites may name abilities registered later; they are resolved
    /// when instantiating.
    pub fn register(&mut self, definition: AbilityDefinition) -> Result<(), SetupError> {
        if self.definitions.contains_key(&definition.id) {
            return Err(SetupError::DuplicateAbility(definition.id));
        }
        self.order.push(definition.id.clone());
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Get a definition by id.
    #[must_use]
    pub fn get(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.definitions.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &AbilityId) -> bool {
        self.definitions.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.order.iter().filter_map(|id| self.definitions.get(id))
    }

    /// Build a fresh ability with its full prerequisite tree.
    ///
    /// Every call returns an independent deep copy with no active cooldown.
    pub fn instantiate(&self, id: &AbilityId) -> Result<Ability, SetupError> {
        let mut path = Vec::new();
        self.link(id, &mut path)
    }

    /// Instantiate several abilities, preserving order.
    pub fn instantiate_all<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a AbilityId>,
    ) -> Result<Vec<Ability>, SetupError> {
        ids.into_iter().map(|id| self.instantiate(id)).collect()
    }

    /// Check that every registered definition links without cycles or
    /// dangling prerequisite ids.
    pub fn validate(&self) -> Result<(), SetupError> {
        for id in &self.order {
            self.instantiate(id)?;
        }
        debug!(abilities = self.order.len(), "ability registry validated");
        Ok(())
    }

    fn link(&self, id: &AbilityId, path: &mut Vec<AbilityId>) -> Result<Ability, SetupError> {
        if let Some(start) = path.iter().position(|p| p == id) {
            let mut cycle = path[start..].to_vec();
            cycle.push(id.clone());
            return Err(SetupError::PrerequisiteCycle { path: cycle });
        }

        let definition = self
            .definitions
            .get(id)
            .ok_or_else(|| SetupError::UnknownAbility(id.clone()))?;

        path.push(id.clone());
        let mut ability = Ability::new(
            definition.id.clone(),
            definition.name.clone(),
            definition.potency,
            definition.resource_cost,
            definition.cooldown,
        );
        for prerequisite in &definition.prerequisites {
            ability.add_prerequisite(self.link(prerequisite, path)?);
        }
        path.pop();

        Ok(ability)
    }
}
