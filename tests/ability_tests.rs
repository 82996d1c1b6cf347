//! Ability system integration tests.
//!
//! Registry linking, prerequisite unlocking, and per-owner cooldown state.

use rustc_hash::FxHashSet;

use rust_skirmish::abilities::{Ability, AbilityDefinition, AbilityId, AbilityRegistry};
use rust_skirmish::combatants::{Combatant, CombatantRecord};
use rust_skirmish::error::SetupError;

fn id(s: &str) -> AbilityId {
    AbilityId::new(s)
}

/// leaf (5) <- mid (8) <- top (4)
fn chain_registry() -> AbilityRegistry {
    let mut registry = AbilityRegistry::new();
    registry.register(AbilityDefinition::new("leaf", "Leaf", 6, 5, 1)).unwrap();
    registry
        .register(AbilityDefinition::new("mid", "Mid", 12, 8, 2).requires("leaf"))
        .unwrap();
    registry
        .register(AbilityDefinition::new("top", "Top", 20, 4, 3).requires("mid"))
        .unwrap();
    registry
}

// =============================================================================
// Registry Linking
// =============================================================================

#[test]
fn test_chain_costs_and_depths() {
    let registry = chain_registry();

    let leaf = registry.instantiate(&id("leaf")).unwrap();
    let mid = registry.instantiate(&id("mid")).unwrap();
    let top = registry.instantiate(&id("top")).unwrap();

    assert_eq!(leaf.total_cost(), 5);
    assert_eq!(leaf.depth(), 0);
    assert_eq!(mid.total_cost(), 13);
    assert_eq!(mid.depth(), 1);
    assert_eq!(top.total_cost(), 17);
    assert_eq!(top.depth(), 2);
}

#[test]
fn test_diamond_counts_shared_prerequisite_per_edge() {
    let mut registry = AbilityRegistry::new();
    registry.register(AbilityDefinition::new("base", "Base", 1, 5, 0)).unwrap();
    registry
        .register(AbilityDefinition::new("left", "Left", 1, 2, 0).requires("base"))
        .unwrap();
    registry
        .register(AbilityDefinition::new("right", "Right", 1, 3, 0).requires("base"))
        .unwrap();
    registry
        .register(
            AbilityDefinition::new("apex", "Apex", 1, 1, 0)
                .requires("left")
                .requires("right"),
        )
        .unwrap();

    let apex = registry.instantiate(&id("apex")).unwrap();

    // 1 + (2 + 5) + (3 + 5)
    assert_eq!(apex.total_cost(), 16);
    assert_eq!(apex.depth(), 2);
}

#[test]
fn test_cycle_rejected() {
    let mut registry = AbilityRegistry::new();
    registry
        .register(AbilityDefinition::new("yin", "Yin", 1, 1, 0).requires("yang"))
        .unwrap();
    registry
        .register(AbilityDefinition::new("yang", "Yang", 1, 1, 0).requires("yin"))
        .unwrap();

    let err = registry.validate().unwrap_err();
    assert_eq!(
        err,
        SetupError::PrerequisiteCycle {
            path: vec![id("yin"), id("yang"), id("yin")]
        }
    );
}

#[test]
fn test_dangling_prerequisite_rejected() {
    let mut registry = AbilityRegistry::new();
    registry
        .register(AbilityDefinition::new("orphan", "Orphan", 1, 1, 0).requires("ghost"))
        .unwrap();

    assert_eq!(registry.validate(), Err(SetupError::UnknownAbility(id("ghost"))));
}

#[test]
fn test_definitions_load_from_json() {
    let json = r#"[
        {"id": "spark", "name": "Spark", "potency": 6, "resource_cost": 5, "cooldown": 1},
        {"id": "flare", "name": "Flare", "potency": 12, "resource_cost": 8, "cooldown": 2, "prerequisites": ["spark"]}
    ]"#;
    let definitions: Vec<AbilityDefinition> = serde_json::from_str(json).unwrap();

    let mut registry = AbilityRegistry::new();
    for definition in definitions {
        registry.register(definition).unwrap();
    }

    let flare = registry.instantiate(&id("flare")).unwrap();
    assert_eq!(flare.prerequisites()[0].id(), &id("spark"));
    assert_eq!(flare.total_cost(), 13);
}

// =============================================================================
// Unlocking
// =============================================================================

#[test]
fn test_unlock_chain_in_order() {
    let registry = chain_registry();
    let leaf = registry.instantiate(&id("leaf")).unwrap();
    let mid = registry.instantiate(&id("mid")).unwrap();
    let top = registry.instantiate(&id("top")).unwrap();
    let mut unlocked = FxHashSet::default();

    assert!(leaf.resolve_prerequisites(&mut unlocked));
    assert!(mid.resolve_prerequisites(&mut unlocked));
    assert!(top.resolve_prerequisites(&mut unlocked));
    assert_eq!(unlocked.len(), 3);
}

#[test]
fn test_unlock_reaches_through_leaf_prerequisite() {
    let registry = chain_registry();
    let mid = registry.instantiate(&id("mid")).unwrap();
    let mut unlocked = FxHashSet::default();

    assert!(mid.resolve_prerequisites(&mut unlocked));
    assert_eq!(unlocked.len(), 1);
    assert!(unlocked.contains(&id("mid")));
    assert!(!unlocked.contains(&id("leaf")));
}

#[test]
fn test_unlock_skips_intermediate_tiers() {
    let registry = chain_registry();
    let top = registry.instantiate(&id("top")).unwrap();
    let mut unlocked = FxHashSet::default();

    assert!(top.resolve_prerequisites(&mut unlocked));
    assert_eq!(unlocked.len(), 1);
    assert!(unlocked.contains(&id("top")));
}

// =============================================================================
// Per-Owner State
// =============================================================================

#[test]
fn test_owners_do_not_share_cooldowns() {
    let registry = chain_registry();
    let templates = registry.instantiate_all([&id("leaf"), &id("mid")]).unwrap();

    let mut first = Combatant::with_abilities(
        CombatantRecord::new("First", "Fighter", 50, 50, 5, 5, 5),
        &templates,
    )
    .unwrap();
    let second = Combatant::with_abilities(
        CombatantRecord::new("Second", "Fighter", 50, 50, 5, 5, 5),
        &templates,
    )
    .unwrap();

    first.begin_ability(1).unwrap();

    assert_eq!(first.abilities()[1].cooldown_remaining(), 2);
    assert_eq!(second.abilities()[1].cooldown_remaining(), 0);
    assert_eq!(templates[1].cooldown_remaining(), 0);
}

#[test]
fn test_cloned_ability_cooldown_independent() {
    let original = Ability::new("bash", "Bash", 10, 5, 3);
    let mut copy = original.clone();

    copy.activate();

    assert_eq!(copy.cooldown_remaining(), 3);
    assert!(original.is_ready());
}
