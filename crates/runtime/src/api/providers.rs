//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the campaign
//! can run with human input, scripted fixtures, or AI policies.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use saga_core::{CombatSnapshot, GameAction, GameRuntimeState};

use super::errors::Result;

/// Trait for providing actions based on the current game state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Next action for the given snapshot, or `None` when the provider is done.
    ///
    /// `combat` is set while a combat session is open.
    async fn provide_action(
        &self,
        state: &GameRuntimeState,
        combat: Option<&CombatSnapshot>,
    ) -> Result<Option<GameAction>>;
}

/// Replays a fixed list of actions in order.
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    script: Mutex<VecDeque<GameAction>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = GameAction>) -> Self {
        Self {
            script: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn push(&self, action: GameAction) {
        self.script.lock().await.push_back(action);
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(
        &self,
        _state: &GameRuntimeState,
        _combat: Option<&CombatSnapshot>,
    ) -> Result<Option<GameAction>> {
        Ok(self.script.lock().await.pop_front())
    }
}
