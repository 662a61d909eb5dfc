//! Deterministic narrative simulation rules.
//!
//! `saga-core` defines the canonical rules (actions, engine, world state) and
//! exposes pure APIs that can be reused by both the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`]: given the same
//! seed, content and action sequence, every run produces the same states and
//! the same ordered change lists.
pub mod action;
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod pressure;
pub mod quest;
pub mod resolver;
pub mod state;
pub mod time;

pub use action::{ActionError, ActionKind, GameAction};
pub use combat::{
    CombatCommand, CombatError, CombatOutcome, CombatResult, CombatSession, CombatSnapshot,
    Disposition, RoundReport,
};
pub use config::{CombatConfig, GameConfig, PressureConfig, TimeConfig, WorldConfig};
pub use economy::{EconomyManager, ResourceDelta, Shortfall, Transaction};
pub use engine::{
    ActionOutcome, ChallengeStatus, ExecuteError, GameEngine, PipelineStage, StateReducer,
};
pub use env::{
    CampaignDefinition, Consequences, ContentError, ContentOracle, ContentRegistry, Env,
    EventDefinition, EventTrigger, GameEnv, PcgRng, RandomSource,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{pick_weighted, resolve_choice, select_available_events};
pub use pressure::{DefaultPressureRules, PressureRules, PressureState};
pub use quest::{QuestTracker, QuestTransition};
pub use resolver::{
    CombatResolver, ConflictOutcome, ConflictResolver, Resolution, ResolveContext,
    ResolverRegistry, SkillCheckResolver,
};
pub use state::{
    ChangeSections, GameEnding, GameRuntimeState, StateChange, StateDelta, WorldState,
};
pub use time::TimeEngine;
