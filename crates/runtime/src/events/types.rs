//! Event types for different topics.

use serde::{Deserialize, Serialize};

use saga_core::{
    ActionOutcome, CombatResult, ConflictOutcome, GameAction, GameEnding, RoundReport,
    state::EnemyId,
};

/// Events related to game state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An action was committed; carries the full outcome and its delta.
    ActionExecuted { outcome: Box<ActionOutcome> },

    /// The engine refused or rolled back an action.
    ActionFailed {
        action: GameAction,
        error: String,
        code: String,
        /// False when a content defect forced a rollback.
        rejected: bool,
    },

    GameEnded { ending: GameEnding },
}

/// Events about challenges handed to async resolvers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChallengeEvent {
    /// A resolver task started for a parked challenge of `kind`.
    Dispatched { kind: String },

    Resolved {
        kind: String,
        outcome: ConflictOutcome,
    },

    /// The resolver was cancelled by a client.
    Cancelled { kind: String },

    /// The resolver did not answer within the configured timeout.
    TimedOut { kind: String },
}

/// Events related to the open combat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    Started { enemy: EnemyId },
    RoundPlayed(RoundReport),
    Finished(CombatResult),
}
