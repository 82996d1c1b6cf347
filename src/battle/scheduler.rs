//! The battle scheduler.
//!
//! `Battle` owns both rosters and is the only writer to them while a battle
//! runs. Every state-machine transition goes through `step`; `run` loops it
//! until an outcome or an error.
//!
//! ## Turn protocol
//!
//! For each turn slot, in order:
//! 1. Skip the slot if its occupant is absent or defeated.
//! 2. Ask the side's `ActionSource` for an action, with the legal kinds.
//! 3. Validate it. An illegal action changes nothing; the source is told
//!    and asked again, up to `max_rejections` times.
//! 4. Draw the roll and resolve.
//! 5. If either roster is now defeated, the battle is over.
//!
//! After the last slot, every living combatant runs its round-end upkeep
//! and the round counter advances.

use tracing::{debug, info, trace, warn};

use super::log::{ActionRecord, BattleEvent, BattleLog};
use super::outcome::Outcome;
use super::phase::{BattlePhase, TurnSlot};
use super::source::{ActionSource, TurnContext};
use crate::combatants::{Combatant, Effect, Roster};
use crate::core::{Action, ActionKind, BattleConfig, CombatantRef, GameRng, LegalActions, Side, SideMap};
use crate::error::{ActionError, BattleError, Result, SetupError};

/// Action sources for both sides.
pub type Sources<'a> = SideMap<Box<dyn ActionSource + 'a>>;

/// A battle between two rosters.
#[derive(Clone, Debug)]
pub struct Battle {
    rosters: SideMap<Roster>,
    config: BattleConfig,
    /// Current round, starting at 1.
    round: u32,
    phase: BattlePhase,
    /// Whether any slot acted in the current round.
    acted_this_round: bool,
    log: BattleLog,
}

impl Battle {
    /// Set up a battle. Side A takes the first turn of every round.
    ///
    /// Fails on an empty roster or a configuration with no active slots.
    pub fn new(side_a: Roster, side_b: Roster, config: BattleConfig) -> std::result::Result<Self, SetupError> {
        for roster in [&side_a, &side_b] {
            if roster.is_empty() {
                return Err(SetupError::EmptyRoster {
                    name: roster.name().to_string(),
                });
            }
        }
        if config.active_slots == 0 {
            return Err(SetupError::NoActiveSlots);
        }

        Ok(Self {
            rosters: SideMap::new(side_a, side_b),
            config,
            round: 1,
            phase: BattlePhase::RoundStart,
            acted_this_round: false,
            log: BattleLog::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    #[must_use]
    pub fn rosters(&self) -> &SideMap<Roster> {
        &self.rosters
    }

    #[must_use]
    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side]
    }

    /// Hand the rosters back, e.g. to restore them between battles.
    #[must_use]
    pub fn into_rosters(self) -> SideMap<Roster> {
        self.rosters
    }

    /// The combatant at `r`, dead or alive.
    #[must_use]
    pub fn combatant(&self, r: CombatantRef) -> Option<&Combatant> {
        self.rosters[r.side].member(r.index)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            BattlePhase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Both rosters' status lines.
    #[must_use]
    pub fn summary(&self) -> String {
        self.rosters
            .iter()
            .map(|(side, roster)| format!("{} - {}\n{}", side, roster.name(), roster.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // === Legality ===

    /// Legal action kinds for `actor`: attack when affordable, defend always,
    /// and every ability that is ready, affordable, and has a target.
    ///
    /// Empty only when the actor is absent or defeated.
    #[must_use]
    pub fn legal_actions(&self, actor: CombatantRef) -> LegalActions {
        let mut legal = LegalActions::new();
        let Some(combatant) = self.rosters[actor.side].living_at(actor.index) else {
            return legal;
        };

        if combatant.can_attack(self.config.attack_cost) && !self.rosters[actor.side.opponent()].is_defeated() {
            legal.push(ActionKind::Attack);
        }
        legal.push(ActionKind::Defend);

        for (index, ability) in combatant.abilities().iter().enumerate() {
            let kind = ActionKind::UseAbility(index);
            if ability.can_activate(combatant.current_resource()) && !self.legal_targets(actor, kind).is_empty() {
                legal.push(kind);
            }
        }
        legal
    }

    /// Living members an action of `kind` may target.
    ///
    /// Healing abilities target the actor's own side; attacks and every
    /// other ability target the opposing side. Defend takes no target.
    #[must_use]
    pub fn legal_targets(&self, actor: CombatantRef, kind: ActionKind) -> Vec<CombatantRef> {
        let Some(side) = self.target_side(actor, kind) else {
            return Vec::new();
        };
        self.rosters[side]
            .living_indices()
            .into_iter()
            .map(|index| CombatantRef::new(side, index))
            .collect()
    }

    fn target_side(&self, actor: CombatantRef, kind: ActionKind) -> Option<Side> {
        match kind {
            ActionKind::Defend => None,
            ActionKind::Attack => Some(actor.side.opponent()),
            ActionKind::UseAbility(index) => {
                let ability = self.combatant(actor)?.ability(index)?;
                if ability.is_healing() {
                    Some(actor.side)
                } else {
                    Some(actor.side.opponent())
                }
            }
        }
    }

    /// Check an action without performing it.
    pub fn validate(&self, actor: CombatantRef, action: &Action) -> std::result::Result<(), ActionError> {
        let combatant = self.rosters[actor.side]
            .living_at(actor.index)
            .ok_or(ActionError::ActorUnavailable(actor))?;

        match *action {
            Action::Defend => Ok(()),
            Action::Attack { target } => {
                let cost = self.config.attack_cost;
                if !combatant.can_attack(cost) {
                    return Err(ActionError::InsufficientResource {
                        resource: combatant.current_resource(),
                        cost,
                    });
                }
                self.check_target(target, actor.side.opponent())
            }
            Action::UseAbility { index, target } => {
                let ability = combatant.ability(index).ok_or(ActionError::UnknownAbility { index })?;
                if !ability.can_activate(combatant.current_resource()) {
                    return Err(ActionError::AbilityNotReady {
                        ability: ability.id().clone(),
                        cooldown_remaining: ability.cooldown_remaining(),
                        resource: combatant.current_resource(),
                        cost: ability.resource_cost(),
                    });
                }
                let expected = if ability.is_healing() {
                    actor.side
                } else {
                    actor.side.opponent()
                };
                self.check_target(target, expected)
            }
        }
    }

    fn check_target(&self, target: CombatantRef, expected: Side) -> std::result::Result<(), ActionError> {
        if target.side != expected {
            return Err(ActionError::WrongSide { target, expected });
        }
        let member = self
            .rosters[target.side]
            .member(target.index)
            .ok_or(ActionError::TargetAbsent(target))?;
        if !member.is_alive() {
            return Err(ActionError::TargetDefeated(target));
        }
        Ok(())
    }

    // === Resolution ===

    /// Validate, draw a roll, and resolve.
    ///
    /// The roll is only drawn once the action is known to be legal, so a
    /// rejected action leaves the RNG stream untouched.
    pub fn perform(
        &mut self,
        actor: CombatantRef,
        action: Action,
        rng: &mut GameRng,
    ) -> std::result::Result<ActionRecord, ActionError> {
        self.validate(actor, &action)?;
        let roll = match action {
            Action::Defend => None,
            _ => Some(rng.roll(self.config.max_roll)),
        };
        self.resolve(actor, action, roll)
    }

    /// Resolve an action with an injected roll.
    ///
    /// Validates first; on error nothing changes. Does not check for a
    /// finished battle or advance the turn.
    pub fn apply_action(
        &mut self,
        actor: CombatantRef,
        action: Action,
        roll: i64,
    ) -> std::result::Result<ActionRecord, ActionError> {
        self.validate(actor, &action)?;
        let roll = match action {
            Action::Defend => None,
            _ => Some(roll),
        };
        self.resolve(actor, action, roll)
    }

    fn resolve(
        &mut self,
        actor: CombatantRef,
        action: Action,
        roll: Option<i64>,
    ) -> std::result::Result<ActionRecord, ActionError> {
        let value = roll.unwrap_or(0);

        let (effect, target_health) = match action {
            Action::Defend => {
                self.combatant_mut(actor)?.enter_defensive_stance();
                (Effect::Stance, None)
            }
            Action::Attack { target } => {
                let (own, other) = self.rosters.pair_mut(actor.side);
                let attacker = own
                    .living_at_mut(actor.index)
                    .ok_or(ActionError::ActorUnavailable(actor))?;
                let defender = other
                    .living_at_mut(target.index)
                    .ok_or(ActionError::TargetAbsent(target))?;
                let amount = attacker.basic_attack(defender, value, self.config.attack_cost)?;
                (Effect::Damage { amount }, Some(defender.current_health()))
            }
            Action::UseAbility { index, target } => {
                let cast = self.combatant_mut(actor)?.begin_ability(index)?;
                let recipient = self.combatant_mut(target)?;
                let effect = cast.apply_to(recipient, value);
                (effect, Some(recipient.current_health()))
            }
        };

        let record = ActionRecord {
            round: self.round,
            actor,
            action,
            roll,
            effect,
            target_health,
        };
        debug!(
            round = self.round,
            actor = %actor,
            action = %action.kind(),
            roll = ?roll,
            effect = ?effect,
            target_health = ?target_health,
            "action resolved"
        );
        self.log.push(BattleEvent::ActionResolved(record.clone()));
        Ok(record)
    }

    fn combatant_mut(&mut self, r: CombatantRef) -> std::result::Result<&mut Combatant, ActionError> {
        self.rosters[r.side]
            .member_mut(r.index)
            .ok_or(ActionError::TargetAbsent(r))
    }

    // === Driving ===

    /// Advance one state-machine transition.
    ///
    /// Returns the outcome on the step that ends the battle, `None`
    /// otherwise. Stepping a finished battle is an error.
    pub fn step(&mut self, sources: &mut Sources<'_>, rng: &mut GameRng) -> Result<Option<Outcome>> {
        match self.phase.clone() {
            BattlePhase::Terminal(_) => Err(BattleError::Finished),
            BattlePhase::RoundStart => self.start_round(),
            BattlePhase::ActorTurn(slot) => self.take_turn(slot, sources, rng),
            BattlePhase::RoundEnd => self.end_round().map(|()| None),
        }
    }

    /// Step until the battle ends.
    pub fn run(&mut self, sources: &mut Sources<'_>, rng: &mut GameRng) -> Result<Outcome> {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome.clone());
        }
        info!(
            side_a = self.rosters[Side::A].name(),
            side_b = self.rosters[Side::B].name(),
            seed = rng.seed(),
            "battle started"
        );
        loop {
            if let Some(outcome) = self.step(sources, rng)? {
                return Ok(outcome);
            }
        }
    }

    fn start_round(&mut self) -> Result<Option<Outcome>> {
        // Rosters may already be down before the round begins
        if let Some(loser) = Side::ALL.into_iter().find(|&s| self.rosters[s].is_defeated()) {
            return Ok(Some(self.finish(loser.opponent(), self.round.saturating_sub(1))));
        }
        if let Some(limit) = self.config.max_rounds {
            if self.round > limit {
                warn!(limit, "round limit reached");
                return Err(BattleError::RoundLimit { limit });
            }
        }

        debug!(round = self.round, "round started");
        self.log.push(BattleEvent::RoundStarted { round: self.round });
        self.acted_this_round = false;
        self.phase = BattlePhase::ActorTurn(TurnSlot::first());
        Ok(None)
    }

    fn take_turn(&mut self, slot: TurnSlot, sources: &mut Sources<'_>, rng: &mut GameRng) -> Result<Option<Outcome>> {
        let actor = slot.actor();

        if self.rosters[actor.side].living_at(actor.index).is_none() {
            trace!(round = self.round, %slot, "turn skipped");
            self.log.push(BattleEvent::TurnSkipped { round: self.round, slot });
            self.advance(slot);
            return Ok(None);
        }

        self.solicit(actor, sources, rng)?;
        self.acted_this_round = true;

        // The actor's own side is checked first, so a simultaneous wipe
        // goes against the side that acted. The current round is unfinished.
        for side in [actor.side, actor.side.opponent()] {
            if self.rosters[side].is_defeated() {
                return Ok(Some(self.finish(side.opponent(), self.round - 1)));
            }
        }

        self.advance(slot);
        Ok(None)
    }

    fn solicit(&mut self, actor: CombatantRef, sources: &mut Sources<'_>, rng: &mut GameRng) -> Result<ActionRecord> {
        let mut attempts = 0;
        loop {
            let action = {
                let ctx = TurnContext::new(self, actor);
                sources[actor.side].choose_action(&ctx, rng)
            };
            let Some(action) = action else {
                warn!(side = %actor.side, round = self.round, "action source abandoned the battle");
                return Err(BattleError::Abandoned {
                    side: actor.side,
                    round: self.round,
                });
            };

            match self.perform(actor, action, rng) {
                Ok(record) => return Ok(record),
                Err(error) => {
                    attempts += 1;
                    warn!(%actor, ?action, %error, attempts, "action rejected");
                    sources[actor.side].on_rejected(&action, &error);
                    if attempts > self.config.max_rejections {
                        return Err(BattleError::RejectionLimit { actor, attempts });
                    }
                }
            }
        }
    }

    fn advance(&mut self, slot: TurnSlot) {
        self.phase = match slot.next(self.config.active_slots) {
            Some(next) => BattlePhase::ActorTurn(next),
            None => BattlePhase::RoundEnd,
        };
    }

    fn end_round(&mut self) -> Result<()> {
        if !self.acted_this_round {
            warn!(round = self.round, "no slot could act");
            return Err(BattleError::Stalemate { round: self.round });
        }

        for (_, roster) in self.rosters.iter_mut() {
            roster.end_round();
        }
        debug!(round = self.round, "round ended");
        self.log.push(BattleEvent::RoundEnded { round: self.round });

        self.round += 1;
        self.phase = BattlePhase::RoundStart;
        Ok(())
    }

    fn finish(&mut self, winner: Side, rounds_elapsed: u32) -> Outcome {
        let outcome = Outcome {
            winner,
            winning_roster: self.rosters[winner].name().to_string(),
            rounds_elapsed,
        };
        info!(
            winner = %outcome.winner,
            roster = %outcome.winning_roster,
            rounds = outcome.rounds_elapsed,
            "battle ended"
        );
        self.log.push(BattleEvent::BattleEnded(outcome.clone()));
        self.phase = BattlePhase::Terminal(outcome.clone());
        outcome
    }
}

/// Run a battle between two rosters to completion.
pub fn run_battle(
    side_a: Roster,
    side_b: Roster,
    sources: &mut Sources<'_>,
    config: BattleConfig,
    rng: &mut GameRng,
) -> Result<Outcome> {
    let mut battle = Battle::new(side_a, side_b, config)?;
    battle.run(sources, rng)
}
