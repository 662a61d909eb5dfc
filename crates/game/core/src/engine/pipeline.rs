//! Steps 2 to 9 of `perform_action`.
//!
//! Runs only after validation succeeded. Every mutation goes through the
//! [`StateReducer`]; a content defect anywhere in here aborts the run and the
//! engine restores its checkpoint.

use crate::action::{ActionError, ConflictOutcome, GameAction};
use crate::combat::{CombatCommand, CombatError, CombatResult, CombatSession, RoundReport};
use crate::config::GameConfig;
use crate::economy::ResourceDelta;
use crate::env::{
    ChallengeDefinition, Consequences, ContentError, EventTrigger, GameEnv,
};
use crate::event::{challenge_definition, pick_weighted, resolve_choice, select_available_events};
use crate::pressure::PressureRules;
use crate::quest::QuestTracker;
use crate::resolver::{Resolution, ResolveContext, ResolverRegistry};
use crate::state::{
    ChallengePhase, ChallengeRef, EventId, GameEnding, StateChange,
};

use super::ChallengeStatus;
use super::errors::{ExecuteError, PipelineStage, StageExt};
use super::reducer::StateReducer;
use super::validate::ActionPlan;

/// Side results of a run, surfaced in the action outcome.
#[derive(Debug, Default)]
pub(crate) struct PipelineReport {
    pub event: Option<EventId>,
    pub challenge: Option<ChallengeStatus>,
    pub combat_round: Option<RoundReport>,
    pub combat_result: Option<CombatResult>,
    pub ending: Option<GameEnding>,
}

pub(crate) struct Pipeline<'e, 's> {
    pub(super) env: GameEnv<'e>,
    pub(super) rules: &'s dyn PressureRules,
    resolvers: &'s ResolverRegistry,
    pub(super) reducer: StateReducer<'s>,
    combat: &'s mut Option<CombatSession>,
    /// Consequences collected by steps 4 to 6, applied in step 7.
    pending: Vec<&'e Consequences>,
    pub(super) report: PipelineReport,
}

impl<'e, 's> Pipeline<'e, 's> {
    pub(crate) fn new(
        env: GameEnv<'e>,
        rules: &'s dyn PressureRules,
        resolvers: &'s ResolverRegistry,
        reducer: StateReducer<'s>,
        combat: &'s mut Option<CombatSession>,
    ) -> Self {
        Self {
            env,
            rules,
            resolvers,
            reducer,
            combat,
            pending: Vec::new(),
            report: PipelineReport::default(),
        }
    }

    pub(crate) fn run(
        mut self,
        action: &GameAction,
        plan: ActionPlan,
        payment: Vec<ResourceDelta>,
    ) -> Result<(Vec<StateChange>, PipelineReport), ExecuteError> {
        for delta in payment {
            self.reducer.emit(StateChange::ResourceChanged {
                resource: delta.resource,
                from: delta.before,
                to: delta.after,
            });
        }

        self.advance_time(plan.days)?;
        self.perform(action)?;

        let pending = std::mem::take(&mut self.pending);
        for consequences in pending {
            self.apply_consequences(consequences)?;
        }

        self.tick_quests()?;
        self.check_ending();
        Ok((self.reducer.into_changes(), self.report))
    }

    /// Advances the clock one day at a time, running the world tick per day.
    fn advance_time(&mut self, days: u32) -> Result<(), ExecuteError> {
        let mut clock = self.reducer.state().world.clock;
        let mut failure = None;
        clock.advance(days, |day| {
            if failure.is_none() {
                failure = self.world_tick(day).err();
            }
        });
        failure.map_or(Ok(()), Err)
    }

    fn perform(&mut self, action: &GameAction) -> Result<(), ExecuteError> {
        let content = self.env.content();
        match action {
            GameAction::Travel { region } => {
                let visit_count = self
                    .reducer
                    .state()
                    .world
                    .region(region)
                    .map_or(0, |state| state.visit_count)
                    .saturating_add(1);
                self.reducer.emit(StateChange::RegionEntered {
                    region: region.clone(),
                    visit_count,
                });
                self.present_event(EventTrigger::Arrival)
            }
            GameAction::Explore => {
                let current = &self.reducer.state().world.current_region;
                let here = content
                    .region(current)
                    .ok_or_else(|| ContentError::unknown("region", current))
                    .at(PipelineStage::Action)?;
                for neighbor in &here.neighbors {
                    let known = self
                        .reducer
                        .state()
                        .world
                        .region(neighbor)
                        .is_some_and(|state| state.discovered);
                    if !known {
                        self.reducer.emit(StateChange::RegionDiscovered {
                            region: neighbor.clone(),
                        });
                    }
                }
                self.present_event(EventTrigger::Explore)
            }
            GameAction::Rest => {
                self.reducer.adjust_health(self.env.config().world.rest_heal);
                Ok(())
            }
            GameAction::Wait { .. } => Ok(()),
            GameAction::ChooseEventOption { choice } => self.choose(*choice),
            GameAction::StartQuest { quest } => {
                let definition = content
                    .quest(quest)
                    .ok_or_else(|| ActionError::UnknownQuest(quest.clone()))?;
                let transition = QuestTracker::start(definition, self.reducer.state())
                    .map_err(ActionError::from)?;
                self.apply_quest_transition(definition, transition)
            }
            GameAction::StrengthenAnchor { anchor } => {
                let world = &self.reducer.state().world;
                let current = world
                    .anchors
                    .get(anchor)
                    .ok_or_else(|| ContentError::unknown("anchor", anchor))
                    .at(PipelineStage::Action)?;
                let config = &self.env.config().world;
                let integrity = current
                    .integrity
                    .saturating_add(config.anchor_strengthen)
                    .clamp(0, GameConfig::MAX_ANCHOR_INTEGRITY);
                self.reducer.emit(StateChange::AnchorChanged {
                    anchor: anchor.clone(),
                    integrity,
                    active: integrity > 0,
                });
                self.adjust_pressure(-config.anchor_relief)
            }
            GameAction::Combat(command) => self.play_combat(*command),
            GameAction::ResolveChallenge(outcome) => self.resolve_parked(*outcome),
        }
    }

    /// Step 5: selects at most one event for `occasion` and opens it.
    fn present_event(&mut self, occasion: EventTrigger) -> Result<(), ExecuteError> {
        let content = self.env.content();
        let candidates = select_available_events(content, self.reducer.state(), occasion)
            .at(PipelineStage::Event)?;
        let picked = self
            .reducer
            .with_rng(|_, rng| pick_weighted(&candidates, rng));
        let Some(event) = picked else {
            return Ok(());
        };

        self.reducer.emit(StateChange::EventFired {
            event: event.id.clone(),
            one_time: event.one_time,
            cooldown: event.cooldown,
        });
        self.report.event = Some(event.id.clone());

        if event.choices.is_empty() {
            self.reducer.emit(StateChange::EventClosed {
                event: event.id.clone(),
            });
            if let Some(definition) = &event.challenge {
                let challenge = ChallengeRef {
                    event: event.id.clone(),
                    choice: None,
                    kind: definition.kind.clone(),
                    phase: ChallengePhase::AwaitingResolver,
                };
                self.dispatch(challenge, definition)?;
            }
        }
        Ok(())
    }

    fn choose(&mut self, choice: usize) -> Result<(), ExecuteError> {
        let content = self.env.content();
        let state = self.reducer.state();
        let event_id = state
            .events
            .active_event
            .clone()
            .ok_or(ActionError::NoActiveEvent)?;
        let event = content
            .event(&event_id)
            .ok_or_else(|| ContentError::unknown("event", &event_id))
            .at(PipelineStage::Action)?;
        let resolution = resolve_choice(event, choice, state).map_err(ActionError::from)?;

        self.reducer
            .emit(StateChange::EventClosed { event: event_id });
        self.pending.push(resolution.consequences);

        if let (Some(challenge), Some((_, definition))) =
            (resolution.challenge_ref(), resolution.challenge)
        {
            self.dispatch(challenge, definition)?;
        }
        Ok(())
    }

    /// Step 6: routes a challenge to its resolver, or parks it.
    fn dispatch(
        &mut self,
        challenge: ChallengeRef,
        definition: &'e ChallengeDefinition,
    ) -> Result<(), ExecuteError> {
        let resolvers = self.resolvers;
        let Some(resolver) = resolvers.get(&challenge.kind) else {
            self.reducer.emit(StateChange::ChallengeOpened {
                challenge: ChallengeRef {
                    phase: ChallengePhase::AwaitingResolver,
                    ..challenge
                },
            });
            self.report.challenge = Some(ChallengeStatus::AwaitingResolver);
            return Ok(());
        };

        let env = self.env;
        let resolution = self
            .reducer
            .with_rng(|state, rng| {
                let ctx = ResolveContext {
                    content: env.content(),
                    config: env.config(),
                    state,
                    challenge: &challenge,
                    definition,
                };
                resolver.resolve(ctx, rng)
            })
            .at(PipelineStage::Challenge)?;

        match resolution {
            Resolution::Outcome(outcome) => {
                self.report.challenge = Some(ChallengeStatus::Resolved(outcome));
                if let Some(consequences) = outcome_consequences(definition, outcome) {
                    self.pending.push(consequences);
                }
            }
            Resolution::Interactive(session) => {
                let snapshot = session.snapshot();
                self.reducer.emit(StateChange::ChallengeOpened {
                    challenge: snapshot.challenge.clone(),
                });
                self.reducer.emit(StateChange::CombatStarted {
                    enemy: snapshot.enemy.clone(),
                });
                *self.combat = Some(session);
                self.report.challenge = Some(ChallengeStatus::CombatStarted);
            }
        }
        Ok(())
    }

    /// Re-entry point for challenges answered outside the core.
    fn resolve_parked(&mut self, outcome: ConflictOutcome) -> Result<(), ExecuteError> {
        let content = self.env.content();
        let challenge = self
            .reducer
            .state()
            .events
            .active_challenge
            .clone()
            .ok_or(ActionError::NotAwaitingResolver)?;
        let definition = challenge_definition(content, &challenge)
            .ok_or_else(|| ContentError::dangling(&challenge.event, "challenge", &challenge.kind))
            .at(PipelineStage::Challenge)?;

        self.reducer.emit(StateChange::ChallengeClosed);
        self.report.challenge = Some(match outcome {
            ConflictOutcome::Cancelled => ChallengeStatus::Cancelled,
            outcome => ChallengeStatus::Resolved(outcome),
        });
        if let Some(consequences) = outcome_consequences(definition, outcome) {
            self.pending.push(consequences);
        }
        Ok(())
    }

    fn play_combat(&mut self, command: CombatCommand) -> Result<(), ExecuteError> {
        let env = self.env;
        let session = self.combat.as_mut().ok_or(ActionError::NoActiveCombat)?;
        let round = session
            .play(command, env.content(), &env.config().combat)
            .map_err(combat_error)?;
        self.report.combat_round = Some(round);
        if !session.is_finished() {
            return Ok(());
        }

        let result = session
            .finish(env.content(), &env.config().combat)
            .map_err(combat_error)?;
        *self.combat = None;
        self.commit_combat(result)
    }

    /// Folds a finished session back into canonical state.
    fn commit_combat(&mut self, result: CombatResult) -> Result<(), ExecuteError> {
        let content = self.env.content();
        let definition = challenge_definition(content, &result.challenge)
            .ok_or_else(|| {
                ContentError::dangling(&result.challenge.event, "challenge", &result.challenge.kind)
            })
            .at(PipelineStage::Challenge)?;

        self.reducer.set_resource(GameConfig::HEALTH, result.final_health);
        self.reducer.emit(StateChange::CardsCommitted {
            zones: result.cards.clone(),
        });
        self.reducer.adjust_resonance(result.resonance_delta);
        for (resource, amount) in &result.rewards {
            self.reducer.adjust_resource(resource, *amount);
        }
        for card in &result.loot {
            if content.card(card).is_none() {
                return Err(ExecuteError::content(
                    PipelineStage::Challenge,
                    ContentError::dangling(&result.enemy, "card", card),
                ));
            }
            self.reducer
                .emit(StateChange::CardGained { card: card.clone() });
        }
        self.reducer.emit(StateChange::CombatEnded {
            enemy: result.enemy.clone(),
            outcome: result.outcome,
            rounds: result.rounds,
        });
        self.reducer.emit(StateChange::ChallengeClosed);

        let outcome = ConflictOutcome::from(result.outcome);
        self.report.challenge = Some(ChallengeStatus::Resolved(outcome));
        if let Some(consequences) = outcome_consequences(definition, outcome) {
            self.pending.push(consequences);
        }
        self.report.combat_result = Some(result);
        Ok(())
    }
}

/// Consequences attached to `outcome`; none for a cancelled challenge.
fn outcome_consequences(
    definition: &ChallengeDefinition,
    outcome: ConflictOutcome,
) -> Option<&Consequences> {
    match outcome {
        ConflictOutcome::Success => Some(&definition.on_success),
        ConflictOutcome::Partial => Some(&definition.on_partial),
        ConflictOutcome::Failure => Some(&definition.on_failure),
        ConflictOutcome::Cancelled => None,
    }
}

fn combat_error(error: CombatError) -> ExecuteError {
    match error {
        CombatError::Content(error) => ExecuteError::content(PipelineStage::Action, error),
        other => ActionError::Combat(other).into(),
    }
}
