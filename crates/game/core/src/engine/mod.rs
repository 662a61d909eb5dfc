//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameRuntimeState`]
//! and the only legal entry point into combat. `perform_action` runs the
//! ordered steps:
//!
//! 1. validate (no mutation)
//! 2. economy: reject on shortfall, otherwise pay
//! 3. advance time, running the world tick per day
//! 4. action-specific logic
//! 5. event generation on arrival and exploration
//! 6. challenge dispatch
//! 7. consequences
//! 8. quest tick
//! 9. victory / defeat
//! 10. persist signal in the outcome
//!
//! Only steps 1 and 2 reject. Every later mutation is a [`StateChange`]
//! record applied as it is emitted. A content defect surfacing after step 2
//! restores the state from before the action.

mod consequences;
mod errors;
mod pipeline;
mod quests;
mod reducer;
mod tick;
mod validate;
mod victory;

pub use errors::{ExecuteError, PipelineStage};
pub use reducer::StateReducer;
pub use victory::{HEALTH_DEFEAT, PRESSURE_DEFEAT, predicate_holds};

use crate::action::{ConflictOutcome, GameAction};
use crate::combat::{CombatResult, CombatSession, CombatSnapshot, RoundReport};
use crate::config::GameConfig;
use crate::economy::EconomyManager;
use crate::env::GameEnv;
use crate::pressure::{DefaultPressureRules, PressureRules};
use crate::resolver::{ConflictResolver, ResolverRegistry};
use crate::state::{EventId, GameEnding, GameRuntimeState, StateChange, StateDelta};

use pipeline::Pipeline;

/// What happened to the challenge raised by an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChallengeStatus {
    /// An interactive combat session opened.
    CombatStarted,
    Resolved(ConflictOutcome),
    /// No resolver is registered for the kind; waiting for `ResolveChallenge`.
    AwaitingResolver,
    Cancelled,
}

/// Complete outcome of a committed action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub nonce: u64,
    pub delta: StateDelta,
    /// Event presented by this action.
    pub event: Option<EventId>,
    pub challenge: Option<ChallengeStatus>,
    pub combat_round: Option<RoundReport>,
    pub combat_result: Option<CombatResult>,
    pub ending: Option<GameEnding>,
    /// State should be persisted after this action.
    pub persist: bool,
}

/// Owns the canonical state, the open combat session and the pluggable rules.
pub struct GameEngine {
    state: GameRuntimeState,
    combat: Option<CombatSession>,
    resolvers: ResolverRegistry,
    pressure_rules: Box<dyn PressureRules>,
}

impl GameEngine {
    /// Creates an engine with the built-in resolvers and pressure rules.
    pub fn new(state: GameRuntimeState, config: &GameConfig) -> Self {
        Self {
            state,
            combat: None,
            resolvers: ResolverRegistry::default(),
            pressure_rules: Box::new(DefaultPressureRules::new(config.pressure.clone())),
        }
    }

    /// Restores an engine from persisted state, mid-combat when `combat` is set.
    ///
    /// Thresholds implied by the loaded pressure value are marked triggered.
    pub fn resume(
        state: GameRuntimeState,
        combat: Option<CombatSnapshot>,
        config: &GameConfig,
    ) -> Self {
        let mut engine = Self::new(state, config);
        engine
            .state
            .world
            .pressure
            .sync_triggered_thresholds_from_pressure(engine.pressure_rules.as_ref());
        engine.combat = combat.map(CombatSession::from_snapshot);
        engine
    }

    #[must_use]
    pub fn with_pressure_rules(mut self, rules: impl PressureRules + 'static) -> Self {
        self.pressure_rules = Box::new(rules);
        self
    }

    pub fn register_resolver(
        &mut self,
        kind: impl Into<String>,
        resolver: impl ConflictResolver + 'static,
    ) {
        self.resolvers.register(kind, resolver);
    }

    pub fn resolvers_mut(&mut self) -> &mut ResolverRegistry {
        &mut self.resolvers
    }

    pub fn state(&self) -> &GameRuntimeState {
        &self.state
    }

    pub fn into_state(self) -> GameRuntimeState {
        self.state
    }

    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref()
    }

    pub fn combat_snapshot(&self) -> Option<CombatSnapshot> {
        self.combat.as_ref().map(|session| session.snapshot().clone())
    }

    pub fn pressure_rules(&self) -> &dyn PressureRules {
        self.pressure_rules.as_ref()
    }

    /// Executes one action through the pipeline.
    ///
    /// On `Err` the state and the combat session are exactly as before the
    /// call and the nonce has not moved.
    pub fn perform_action(
        &mut self,
        env: GameEnv<'_>,
        action: GameAction,
    ) -> Result<ActionOutcome, ExecuteError> {
        let plan = validate::validate(&action, &env, &self.state, self.combat.as_ref())?;
        let payment = EconomyManager::plan(&plan.cost, &self.state.player.resources)?;

        let checkpoint = (self.state.clone(), self.combat.clone());
        let Self {
            state,
            combat,
            resolvers,
            pressure_rules,
        } = &mut *self;
        let pipeline = Pipeline::new(
            env,
            pressure_rules.as_ref(),
            resolvers,
            StateReducer::new(state),
            combat,
        );

        let (changes, report) = match pipeline.run(&action, plan, payment) {
            Ok(result) => result,
            Err(error) => {
                (self.state, self.combat) = checkpoint;
                return Err(error);
            }
        };

        self.state.nonce += 1;
        let nonce = self.state.nonce;
        let delta = StateDelta::new(action, nonce, self.state.day(), changes);
        Ok(ActionOutcome {
            nonce,
            delta,
            event: report.event,
            challenge: report.challenge,
            combat_round: report.combat_round,
            combat_result: report.combat_result,
            ending: report.ending,
            persist: true,
        })
    }

    /// Replays `changes` onto the current state without running any rules.
    ///
    /// Used by observers that mirror the engine from its deltas.
    pub fn apply_changes(state: &mut GameRuntimeState, changes: &[StateChange]) {
        for change in changes {
            change.apply(state);
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("nonce", &self.state.nonce)
            .field("day", &self.state.day())
            .field("in_combat", &self.combat.is_some())
            .field("resolvers", &self.resolvers)
            .finish()
    }
}
