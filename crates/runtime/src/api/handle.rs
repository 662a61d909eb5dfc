//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! executing actions, querying snapshots, or streaming events from topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use saga_core::{ActionOutcome, CombatSnapshot, ExecuteError, GameAction, GameRuntimeState};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::repository::SaveGame;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute an action through the engine pipeline.
    pub async fn execute_action(&self, action: GameAction) -> Result<ActionOutcome> {
        self.request(|reply| Command::ExecuteAction { action, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameRuntimeState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Snapshot of the open combat session, if any.
    pub async fn query_combat(&self) -> Result<Option<CombatSnapshot>> {
        self.request(|reply| Command::QueryCombat { reply }).await
    }

    /// State plus combat snapshot, as persisted by repositories.
    pub async fn save_game(&self) -> Result<SaveGame> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Waits for the challenge currently handed to an async resolver.
    ///
    /// Returns the outcome of the `ResolveChallenge` action fed back by the
    /// resolver, or `None` when no resolver is running.
    pub async fn settle_challenge(&self) -> Result<Option<ActionOutcome>> {
        let pending = self
            .request(|reply| Command::SettleChallenge { reply })
            .await?;
        Self::await_settled(pending).await
    }

    /// Signals the running async resolver to stop.
    ///
    /// Returns the outcome of the resulting `ResolveChallenge(Cancelled)`
    /// action, or `None` when no resolver was running.
    pub async fn cancel_challenge(&self) -> Result<Option<ActionOutcome>> {
        let pending = self
            .request(|reply| Command::CancelChallenge { reply })
            .await?;
        Self::await_settled(pending).await
    }

    async fn await_settled(
        pending: Option<oneshot::Receiver<std::result::Result<ActionOutcome, ExecuteError>>>,
    ) -> Result<Option<ActionOutcome>> {
        match pending {
            Some(rx) => {
                let outcome = rx.await.map_err(RuntimeError::ReplyChannelClosed)?;
                Ok(Some(outcome?))
            }
            None => Ok(None),
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Committed and rejected actions, endings
    /// - `Topic::Challenge` - Async resolver dispatch and results
    /// - `Topic::Combat` - Combat rounds and results
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use saga_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
