//! Step 1 of the pipeline: legality checks that never mutate state.

use crate::action::{ActionError, GameAction};
use crate::combat::{CombatCommand, CombatError, CombatSession};
use crate::economy::Transaction;
use crate::env::{ContentError, GameEnv};
use crate::event::resolve_choice;
use crate::quest::QuestTracker;
use crate::state::{ChallengePhase, GameRuntimeState};

use super::errors::{ExecuteError, PipelineStage, StageExt};

/// What a validated action will cost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ActionPlan {
    pub cost: Transaction,
    pub days: u32,
}

impl ActionPlan {
    fn instant() -> Self {
        Self::default()
    }

    fn timed(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }
}

pub(crate) fn validate(
    action: &GameAction,
    env: &GameEnv<'_>,
    state: &GameRuntimeState,
    combat: Option<&CombatSession>,
) -> Result<ActionPlan, ExecuteError> {
    let content = env.content();
    let config = env.config();

    if state.is_over() {
        return Err(ActionError::GameOver.into());
    }
    if !state.player.is_alive() {
        return Err(ActionError::Incapacitated.into());
    }
    if state.events.is_busy() && !action.is_encounter_action() {
        return Err(ActionError::Busy.into());
    }

    let plan = match action {
        GameAction::Travel { region } => {
            let current = &state.world.current_region;
            let here = content
                .region(current)
                .ok_or_else(|| ContentError::unknown("region", current))
                .at(PipelineStage::Validate)?;
            let destination = content
                .region(region)
                .ok_or_else(|| ActionError::UnknownRegion(region.clone()))?;
            if !here.neighbors.contains(region) {
                return Err(ActionError::NotAdjacent {
                    from: current.clone(),
                    to: region.clone(),
                }
                .into());
            }
            ActionPlan {
                cost: destination.travel_cost.clone(),
                days: destination.travel_days,
            }
        }
        GameAction::Explore => ActionPlan::timed(config.time.explore_days),
        GameAction::Rest => ActionPlan {
            cost: content.campaign().rest_cost.clone(),
            days: config.time.rest_days,
        },
        GameAction::Wait { days } => {
            if *days == 0 {
                return Err(ActionError::ZeroDays.into());
            }
            ActionPlan::timed(*days)
        }
        GameAction::ChooseEventOption { choice } => {
            let event_id = state
                .events
                .active_event
                .as_ref()
                .ok_or(ActionError::NoActiveEvent)?;
            if state.events.active_challenge.is_some() {
                return Err(ActionError::Busy.into());
            }
            let event = content
                .event(event_id)
                .ok_or_else(|| ContentError::unknown("event", event_id))
                .at(PipelineStage::Validate)?;
            let resolution = resolve_choice(event, *choice, state).map_err(ActionError::from)?;
            ActionPlan {
                cost: resolution.choice.cost.clone(),
                days: 0,
            }
        }
        GameAction::StartQuest { quest } => {
            let definition = content
                .quest(quest)
                .ok_or_else(|| ActionError::UnknownQuest(quest.clone()))?;
            QuestTracker::start(definition, state).map_err(ActionError::from)?;
            ActionPlan::instant()
        }
        GameAction::StrengthenAnchor { anchor } => {
            let definition = content
                .anchor(anchor)
                .filter(|definition| definition.region == state.world.current_region)
                .ok_or_else(|| ActionError::AnchorNotHere(anchor.clone()))?;
            ActionPlan {
                cost: definition.strengthen_cost.clone(),
                days: config.time.strengthen_days,
            }
        }
        GameAction::Combat(command) => {
            let session = combat.ok_or(ActionError::NoActiveCombat)?;
            if session.is_finished() {
                return Err(ActionError::Combat(CombatError::Finished).into());
            }
            let card = match command {
                CombatCommand::Strike { card } | CombatCommand::Influence { card } => *card,
                CombatCommand::Sacrifice { card } => Some(*card),
            };
            if let Some(uid) = card {
                if session.snapshot().cards.in_hand(uid).is_none() {
                    return Err(ActionError::Combat(CombatError::CardNotInHand(uid)).into());
                }
            }
            ActionPlan::instant()
        }
        GameAction::ResolveChallenge(_) => {
            let waiting = state
                .events
                .active_challenge
                .as_ref()
                .is_some_and(|challenge| challenge.phase == ChallengePhase::AwaitingResolver);
            if !waiting {
                return Err(ActionError::NotAwaitingResolver.into());
            }
            ActionPlan::instant()
        }
    };
    Ok(plan)
}
