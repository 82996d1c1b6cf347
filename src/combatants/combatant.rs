//! Combatants: stat block, health/resource pools, stance, and abilities.
//!
//! Every pool mutation clamps into `[0, max]`. None of them fail: legality
//! is the caller's job (`can_attack`, `can_use_ability`) before spending.
//!
//! ## Formulas
//!
//! - Resource regeneration per round: `max(1, endurance / 2)`
//! - Basic attack: `max(1, strength + roll - target.defence)`
//! - Damaging ability: `max(1, potency + roll)`
//! - A defending target takes `max(1, damage / 2)`

use serde::{Deserialize, Serialize};

use crate::abilities::{Ability, AbilityId};
use crate::error::{ActionError, SetupError};

/// Flat stat record a combatant is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantRecord {
    pub name: String,
    /// Type/class label, presentational only.
    pub class: String,
    pub max_health: i64,
    pub max_resource: i64,
    pub strength: i64,
    pub defence: i64,
    pub endurance: i64,
}

impl CombatantRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        max_health: i64,
        max_resource: i64,
        strength: i64,
        defence: i64,
        endurance: i64,
    ) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            max_health,
            max_resource,
            strength,
            defence,
            endurance,
        }
    }
}

/// What an action did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Health removed from the target.
    Damage { amount: i64 },
    /// Healing magnitude applied to the target.
    Heal { amount: i64 },
    /// The actor entered the defensive stance.
    Stance,
    /// Zero-potency ability: cooldown and cost only.
    Nothing,
}

/// Floors damage at 1 and halves it against a defending target.
fn mitigate(raw: i64, defending: bool) -> i64 {
    let damage = raw.max(1);
    if defending {
        (damage / 2).max(1)
    } else {
        damage
    }
}

/// An ability that has been paid for and put on cooldown, waiting to be
/// applied to its target.
///
/// Splitting the cast from its application lets a caster heal itself or an
/// ally without holding two mutable borrows at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityCast {
    pub ability: AbilityId,
    pub potency: i64,
}

impl AbilityCast {
    /// Preview the effect on `target` without applying it.
    #[must_use]
    pub fn effect_on(&self, target: &Combatant, roll: i64) -> Effect {
        match self.potency {
            p if p > 0 => Effect::Damage {
                amount: mitigate(p.saturating_add(roll), target.is_defending()),
            },
            p if p < 0 => Effect::Heal {
                amount: p.saturating_abs(),
            },
            _ => Effect::Nothing,
        }
    }

    /// Apply the cast to `target`.
    ///
    /// Heals use the potency magnitude only; the roll never changes them.
    pub fn apply_to(&self, target: &mut Combatant, roll: i64) -> Effect {
        let effect = self.effect_on(target, roll);
        match effect {
            Effect::Damage { amount } => target.take_damage(amount),
            Effect::Heal { amount } => target.heal(amount),
            Effect::Stance | Effect::Nothing => {}
        }
        effect
    }
}

/// A combatant in a battle.
///
/// Built from a `CombatantRecord` at full health and resource. Abilities
/// are owned, so cloning a combatant clones their cooldown state too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    record: CombatantRecord,
    current_health: i64,
    current_resource: i64,
    defending: bool,
    abilities: Vec<Ability>,
}

impl Combatant {
    /// Create a combatant with no abilities.
    ///
    /// Fails if max health or max resource is not positive.
    pub fn new(record: CombatantRecord) -> Result<Self, SetupError> {
        if record.max_health <= 0 {
            return Err(SetupError::NonPositiveMaxHealth {
                name: record.name,
                value: record.max_health,
            });
        }
        if record.max_resource <= 0 {
            return Err(SetupError::NonPositiveMaxResource {
                name: record.name,
                value: record.max_resource,
            });
        }

        Ok(Self {
            current_health: record.max_health,
            current_resource: record.max_resource,
            defending: false,
            abilities: Vec::new(),
            record,
        })
    }

    /// Create a combatant holding deep copies of `templates`, in order.
    pub fn with_abilities(record: CombatantRecord, templates: &[Ability]) -> Result<Self, SetupError> {
        let mut combatant = Self::new(record)?;
        combatant.abilities = templates.to_vec();
        Ok(combatant)
    }

    /// Append an owned ability.
    pub fn add_ability(&mut self, ability: Ability) {
        self.abilities.push(ability);
    }

    // === Accessors ===

    #[must_use]
    pub fn record(&self) -> &CombatantRecord {
        &self.record
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.record.class
    }

    #[must_use]
    pub fn current_health(&self) -> i64 {
        self.current_health
    }

    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.record.max_health
    }

    #[must_use]
    pub fn current_resource(&self) -> i64 {
        self.current_resource
    }

    #[must_use]
    pub fn max_resource(&self) -> i64 {
        self.record.max_resource
    }

    #[must_use]
    pub fn strength(&self) -> i64 {
        self.record.strength
    }

    #[must_use]
    pub fn defence(&self) -> i64 {
        self.record.defence
    }

    #[must_use]
    pub fn endurance(&self) -> i64 {
        self.record.endurance
    }

    #[must_use]
    pub fn is_defending(&self) -> bool {
        self.defending
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Abilities in menu order.
    #[must_use]
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    #[must_use]
    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    /// Resource regenerated at each round end.
    #[must_use]
    pub fn regeneration(&self) -> i64 {
        (self.record.endurance / 2).max(1)
    }

    // === Pools ===

    /// Lose `amount` health, clamped into `[0, max_health]`.
    pub fn take_damage(&mut self, amount: i64) {
        self.current_health = self
            .current_health
            .saturating_sub(amount)
            .clamp(0, self.record.max_health);
    }

    /// Gain `amount` health, clamped into `[0, max_health]`.
    pub fn heal(&mut self, amount: i64) {
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .clamp(0, self.record.max_health);
    }

    /// Gain `amount` resource, clamped into `[0, max_resource]`.
    pub fn restore_resource(&mut self, amount: i64) {
        self.current_resource = self
            .current_resource
            .saturating_add(amount)
            .clamp(0, self.record.max_resource);
    }

    /// Spend `amount` resource. Overspending floors at 0.
    pub fn spend_resource(&mut self, amount: i64) {
        self.current_resource = self
            .current_resource
            .saturating_sub(amount)
            .clamp(0, self.record.max_resource);
    }

    /// Refill health and resource.
    pub fn restore_full(&mut self) {
        self.heal(self.record.max_health);
        self.restore_resource(self.record.max_resource);
    }

    // === Round lifecycle ===

    /// Defend until the end of the round.
    pub fn enter_defensive_stance(&mut self) {
        self.defending = true;
    }

    /// Per-round upkeep: regenerate resource, decay every cooldown, drop
    /// the stance. Call exactly once per living combatant per round.
    pub fn end_round(&mut self) {
        self.restore_resource(self.regeneration());
        for ability in &mut self.abilities {
            ability.decay_cooldown();
        }
        self.defending = false;
    }

    // === Actions ===

    /// Can this combatant pay for a basic attack costing `cost`?
    #[must_use]
    pub fn can_attack(&self, cost: i64) -> bool {
        self.current_resource >= cost
    }

    /// Can the ability at `index` fire right now?
    #[must_use]
    pub fn can_use_ability(&self, index: usize) -> bool {
        self.abilities
            .get(index)
            .is_some_and(|a| a.can_activate(self.current_resource))
    }

    /// Basic attack damage against `target` for a given roll.
    #[must_use]
    pub fn basic_attack_damage(&self, target: &Combatant, roll: i64) -> i64 {
        let raw = self
            .record
            .strength
            .saturating_add(roll)
            .saturating_sub(target.defence());
        mitigate(raw, target.is_defending())
    }

    /// Pay `cost` and strike `target`. Returns the damage dealt.
    pub fn basic_attack(&mut self, target: &mut Combatant, roll: i64, cost: i64) -> Result<i64, ActionError> {
        if !self.can_attack(cost) {
            return Err(ActionError::InsufficientResource {
                resource: self.current_resource,
                cost,
            });
        }
        self.spend_resource(cost);
        let damage = self.basic_attack_damage(target, roll);
        target.take_damage(damage);
        Ok(damage)
    }

    /// Check, pay for, and start the cooldown of the ability at `index`.
    ///
    /// On error nothing is mutated.
    pub fn begin_ability(&mut self, index: usize) -> Result<AbilityCast, ActionError> {
        let resource = self.current_resource;
        let ability = self
            .abilities
            .get_mut(index)
            .ok_or(ActionError::UnknownAbility { index })?;

        if !ability.can_activate(resource) {
            return Err(ActionError::AbilityNotReady {
                ability: ability.id().clone(),
                cooldown_remaining: ability.cooldown_remaining(),
                resource,
                cost: ability.resource_cost(),
            });
        }

        let cost = ability.resource_cost();
        let potency = ability.activate();
        let cast = AbilityCast {
            ability: ability.id().clone(),
            potency,
        };
        self.spend_resource(cost);
        Ok(cast)
    }

    /// Use the ability at `index` on another combatant.
    pub fn resolve_ability(&mut self, index: usize, target: &mut Combatant, roll: i64) -> Result<Effect, ActionError> {
        let cast = self.begin_ability(index)?;
        Ok(cast.apply_to(target, roll))
    }

    /// Use the ability at `index` on this combatant.
    pub fn resolve_ability_on_self(&mut self, index: usize, roll: i64) -> Result<Effect, ActionError> {
        let cast = self.begin_ability(index)?;
        Ok(cast.apply_to(self, roll))
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) HP: {}/{}, RES: {}/{}",
            self.name(),
            self.class(),
            self.current_health,
            self.record.max_health,
            self.current_resource,
            self.record.max_resource
        )
    }
}
