//! Action sources: who decides what each actor does.
//!
//! The scheduler asks the source for its side once per actor turn, passing
//! a `TurnContext` with the legal action kinds already computed. A source
//! that returns an illegal action hears about it through `on_rejected` and
//! is asked again.
//!
//! ## Implementations
//!
//! - `RandomActionSource`: uniform over legal kinds, then uniform over targets
//! - `ScriptedActionSource`: replays queued actions, for tests and replays
//! - Any `FnMut(&TurnContext<'_>, &mut GameRng) -> Option<Action>` closure

use std::collections::VecDeque;

use super::scheduler::Battle;
use crate::combatants::Combatant;
use crate::core::{Action, ActionKind, CombatantRef, GameRng, LegalActions};
use crate::error::ActionError;

/// Everything a source may look at when choosing an action.
pub struct TurnContext<'a> {
    battle: &'a Battle,
    actor: CombatantRef,
    legal: LegalActions,
}

impl<'a> TurnContext<'a> {
    #[must_use]
    pub fn new(battle: &'a Battle, actor: CombatantRef) -> Self {
        Self {
            battle,
            actor,
            legal: battle.legal_actions(actor),
        }
    }

    #[must_use]
    pub fn battle(&self) -> &'a Battle {
        self.battle
    }

    #[must_use]
    pub fn actor(&self) -> CombatantRef {
        self.actor
    }

    /// The acting combatant.
    #[must_use]
    pub fn combatant(&self) -> Option<&'a Combatant> {
        self.battle.combatant(self.actor)
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.battle.round()
    }

    /// Legal action kinds. Always contains `Defend` for a living actor.
    #[must_use]
    pub fn legal_actions(&self) -> &[ActionKind] {
        &self.legal
    }

    /// Legal targets for an action kind.
    #[must_use]
    pub fn targets_for(&self, kind: ActionKind) -> Vec<CombatantRef> {
        self.battle.legal_targets(self.actor, kind)
    }
}

/// Chooses actions for one side.
pub trait ActionSource {
    /// Pick the next action for `ctx.actor()`.
    ///
    /// Returning `None` abandons the battle.
    fn choose_action(&mut self, ctx: &TurnContext<'_>, rng: &mut GameRng) -> Option<Action>;

    /// Called when the previous choice was illegal. The scheduler will ask
    /// again.
    fn on_rejected(&mut self, _action: &Action, _error: &ActionError) {}
}

impl<F> ActionSource for F
where
    F: FnMut(&TurnContext<'_>, &mut GameRng) -> Option<Action>,
{
    fn choose_action(&mut self, ctx: &TurnContext<'_>, rng: &mut GameRng) -> Option<Action> {
        self(ctx, rng)
    }
}

/// Uniformly random over legal actions, then over legal targets.
#[derive(Clone, Debug, Default)]
pub struct RandomActionSource;

impl RandomActionSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ActionSource for RandomActionSource {
    fn choose_action(&mut self, ctx: &TurnContext<'_>, rng: &mut GameRng) -> Option<Action> {
        let kinds = ctx.legal_actions();
        let kind = kinds[rng.pick(kinds.len())?];
        if kind == ActionKind::Defend {
            return Some(Action::Defend);
        }
        let targets = ctx.targets_for(kind);
        let target = *rng.choose(&targets)?;
        Some(Action::from_kind(kind, target))
    }
}

/// Replays a fixed queue of actions.
///
/// Returns `None` once the queue is empty. Rejections are recorded so tests
/// can assert on them.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActionSource {
    queue: VecDeque<Action>,
    rejections: Vec<(Action, ActionError)>,
}

impl ScriptedActionSource {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn rejections(&self) -> &[(Action, ActionError)] {
        &self.rejections
    }
}

impl ActionSource for ScriptedActionSource {
    fn choose_action(&mut self, _ctx: &TurnContext<'_>, _rng: &mut GameRng) -> Option<Action> {
        self.queue.pop_front()
    }

    fn on_rejected(&mut self, action: &Action, error: &ActionError) {
        self.rejections.push((*action, error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::Ability;
    use crate::combatants::{CombatantRecord, Roster};
    use crate::core::{BattleConfig, Side};

    fn battle() -> Battle {
        let hero = Combatant::with_abilities(
            CombatantRecord::new("Cleric", "Priest", 60, 50, 8, 6, 10),
            &[
                Ability::new("mend", "Mend", -12, 15, 2),
                Ability::new("smite", "Smite", 18, 60, 1),
            ],
        )
        .unwrap();
        let goblin = Combatant::new(CombatantRecord::new("Goblin", "Beast", 30, 20, 6, 2, 4)).unwrap();
        let orc = Combatant::new(CombatantRecord::new("Orc", "Beast", 40, 20, 9, 4, 4)).unwrap();

        Battle::new(
            Roster::new("Temple").with_member(hero),
            Roster::new("Horde").with_member(goblin).with_member(orc),
            BattleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_context_exposes_legal_actions() {
        let battle = battle();
        let ctx = TurnContext::new(&battle, CombatantRef::new(Side::A, 0));

        // Smite costs more than the cleric has
        assert_eq!(
            ctx.legal_actions(),
            &[ActionKind::Attack, ActionKind::Defend, ActionKind::UseAbility(0)]
        );
        assert_eq!(ctx.combatant().unwrap().name(), "Cleric");
        assert_eq!(ctx.round(), 1);
    }

    #[test]
    fn test_context_targets() {
        let battle = battle();
        let ctx = TurnContext::new(&battle, CombatantRef::new(Side::A, 0));

        assert_eq!(
            ctx.targets_for(ActionKind::Attack),
            vec![CombatantRef::new(Side::B, 0), CombatantRef::new(Side::B, 1)]
        );
        assert_eq!(
            ctx.targets_for(ActionKind::UseAbility(0)),
            vec![CombatantRef::new(Side::A, 0)]
        );
        assert!(ctx.targets_for(ActionKind::Defend).is_empty());
    }

    #[test]
    fn test_random_source_picks_legal_action() {
        let battle = battle();
        let actor = CombatantRef::new(Side::A, 0);
        let mut source = RandomActionSource::new();
        let mut rng = GameRng::new(42);

        for _ in 0..50 {
            let ctx = TurnContext::new(&battle, actor);
            let action = source.choose_action(&ctx, &mut rng).unwrap();
            assert!(ctx.legal_actions().contains(&action.kind()));
            if let Some(target) = action.target() {
                assert!(ctx.targets_for(action.kind()).contains(&target));
            }
        }
    }

    #[test]
    fn test_random_source_is_deterministic() {
        let battle = battle();
        let actor = CombatantRef::new(Side::B, 1);

        let draw = |seed| {
            let mut rng = GameRng::new(seed);
            let mut source = RandomActionSource::new();
            (0..10)
                .map(|_| source.choose_action(&TurnContext::new(&battle, actor), &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_scripted_source() {
        let battle = battle();
        let ctx = TurnContext::new(&battle, CombatantRef::new(Side::A, 0));
        let mut rng = GameRng::new(0);
        let mut source = ScriptedActionSource::new([Action::Defend]);

        assert_eq!(source.remaining(), 1);
        assert_eq!(source.choose_action(&ctx, &mut rng), Some(Action::Defend));
        assert_eq!(source.choose_action(&ctx, &mut rng), None);

        source.on_rejected(&Action::Defend, &ActionError::UnknownAbility { index: 9 });
        assert_eq!(source.rejections().len(), 1);
    }

    fn as_source<F>(f: F) -> F
    where
        F: FnMut(&TurnContext<'_>, &mut GameRng) -> Option<Action>,
    {
        f
    }

    #[test]
    fn test_closure_source() {
        let battle = battle();
        let ctx = TurnContext::new(&battle, CombatantRef::new(Side::A, 0));
        let mut rng = GameRng::new(0);
        let mut calls = 0;
        let mut source = as_source(|_, _| {
            calls += 1;
            Some(Action::Defend)
        });

        assert_eq!(source.choose_action(&ctx, &mut rng), Some(Action::Defend));
        drop(source);
        assert_eq!(calls, 1);
    }
}
