//! Simulation worker that owns the authoritative [`GameEngine`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! actions through the engine pipeline, publishes events to the [`EventBus`],
//! persists save games, and hands parked challenges to async resolvers.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use saga_content::ContentPack;
use saga_core::event::challenge_definition;
use saga_core::state::ChallengePhase;
use saga_core::{
    ActionOutcome, ChallengeStatus, CombatSnapshot, ConflictOutcome, ExecuteError, GameAction,
    GameEngine, GameEnv, GameError, GameRuntimeState, StateChange,
};

use crate::api::Result;
use crate::events::{ChallengeEvent, CombatEvent, Event, EventBus, GameStateEvent};
use crate::repository::{SaveGame, StateRepository};
use crate::resolver::{
    AsyncConflictResolver, ChallengeRequest, Resolution, Verdict, spawn_resolution,
};

type Settled = std::result::Result<ActionOutcome, ExecuteError>;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute an action through the engine pipeline.
    ExecuteAction {
        action: GameAction,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Query the current game state (read-only).
    QueryState {
        reply: oneshot::Sender<GameRuntimeState>,
    },
    QueryCombat {
        reply: oneshot::Sender<Option<CombatSnapshot>>,
    },
    /// State and combat session as one save game.
    Snapshot { reply: oneshot::Sender<SaveGame> },
    /// Register interest in the running resolver's result.
    SettleChallenge {
        reply: oneshot::Sender<Option<oneshot::Receiver<Settled>>>,
    },
    /// Signal the running resolver to stop and wait for the closed challenge.
    CancelChallenge {
        reply: oneshot::Sender<Option<oneshot::Receiver<Settled>>>,
    },
}

/// Optional collaborators of the worker.
#[derive(Default)]
pub struct WorkerOptions {
    pub repository: Option<Arc<dyn StateRepository>>,
    pub async_resolvers: BTreeMap<String, Arc<dyn AsyncConflictResolver>>,
    pub resolver_timeout: Option<Duration>,
}

/// A challenge handed to an async resolver task.
struct PendingChallenge {
    ticket: u64,
    kind: String,
    cancel: Option<oneshot::Sender<()>>,
    waiters: Vec<oneshot::Sender<Settled>>,
}

/// Background task that processes gameplay commands.
///
/// The worker is the only writer of the game state. Resolver tasks never
/// touch the engine; their answers come back as messages and are executed
/// like any other action.
pub struct SimulationWorker {
    engine: GameEngine,
    pack: Arc<ContentPack>,
    command_rx: mpsc::Receiver<Command>,
    resolution_tx: mpsc::Sender<Resolution>,
    resolution_rx: mpsc::Receiver<Resolution>,
    event_bus: EventBus,
    options: WorkerOptions,
    pending: Option<PendingChallenge>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        engine: GameEngine,
        pack: Arc<ContentPack>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        options: WorkerOptions,
    ) -> Self {
        let state = engine.state();
        info!(
            "SimulationWorker initialized for campaign '{}' at nonce {}, day {}, in combat: {}",
            pack.content.campaign.id,
            state.nonce,
            state.day(),
            engine.combat().is_some()
        );

        let (resolution_tx, resolution_rx) = mpsc::channel(8);
        Self {
            engine,
            pack,
            command_rx,
            resolution_tx,
            resolution_rx,
            event_bus,
            options,
            pending: None,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        self.persist_initial();
        self.dispatch_parked();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(resolution) = self.resolution_rx.recv() => {
                    self.handle_resolution(resolution);
                }
            }
        }

        info!(
            "SimulationWorker stopped at nonce {}",
            self.engine.state().nonce
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ExecuteAction { action, reply } => {
                let result = self.execute(action).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("ExecuteAction reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryCombat { reply } => {
                if reply.send(self.engine.combat_snapshot()).is_err() {
                    debug!("QueryCombat reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.save_game()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::SettleChallenge { reply } => {
                if reply.send(self.wait_for_pending()).is_err() {
                    debug!("SettleChallenge reply channel closed (caller dropped)");
                }
            }
            Command::CancelChallenge { reply } => {
                if let Some(pending) = self.pending.as_mut() {
                    if let Some(cancel) = pending.cancel.take() {
                        debug!("Cancelling resolver for '{}'", pending.kind);
                        // The task may already have answered; its message is still queued.
                        let _ = cancel.send(());
                    }
                }
                if reply.send(self.wait_for_pending()).is_err() {
                    debug!("CancelChallenge reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn wait_for_pending(&mut self) -> Option<oneshot::Receiver<Settled>> {
        self.pending.as_mut().map(|pending| {
            let (tx, rx) = oneshot::channel();
            pending.waiters.push(tx);
            rx
        })
    }

    /// Executes one action and publishes the result.
    ///
    /// This is the only method that calls [`GameEngine::perform_action`], so
    /// resolver answers and client actions share the same bookkeeping.
    fn execute(&mut self, action: GameAction) -> std::result::Result<ActionOutcome, ExecuteError> {
        let env = GameEnv::new(&self.pack.content, &self.pack.config);
        let kind = action.kind();

        let outcome = match self.engine.perform_action(env, action.clone()) {
            Ok(outcome) => outcome,
            Err(error) => {
                let rejected = error.is_rejection();
                if rejected {
                    warn!("Action {} rejected: {}", kind, error);
                } else {
                    error!("Action {} rolled back: {}", kind, error);
                }
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionFailed {
                        action,
                        error: error.to_string(),
                        code: error.error_code().to_string(),
                        rejected,
                    }));
                return Err(error);
            }
        };

        debug!(
            "Action {} committed at nonce {} (day {}, {} changes)",
            kind,
            outcome.nonce,
            outcome.delta.day,
            outcome.delta.changes.len()
        );

        self.publish_outcome(&outcome);
        if outcome.persist {
            self.persist();
        }
        self.after_commit(&outcome);

        Ok(outcome)
    }

    fn publish_outcome(&self, outcome: &ActionOutcome) {
        for change in &outcome.delta.changes {
            if let StateChange::CombatStarted { enemy } = change {
                self.event_bus
                    .publish(Event::Combat(CombatEvent::Started {
                        enemy: enemy.clone(),
                    }));
            }
        }
        if let Some(round) = &outcome.combat_round {
            self.event_bus
                .publish(Event::Combat(CombatEvent::RoundPlayed(round.clone())));
        }
        if let Some(result) = &outcome.combat_result {
            info!(
                "Combat against '{}' ended: {} after {} rounds",
                result.enemy, result.outcome, result.rounds
            );
            self.event_bus
                .publish(Event::Combat(CombatEvent::Finished(result.clone())));
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionExecuted {
                outcome: Box::new(outcome.clone()),
            }));

        if let Some(ending) = &outcome.ending {
            info!(
                "Campaign ended on day {}: {} ({})",
                ending.day, ending.kind, ending.reason
            );
            self.event_bus
                .publish(Event::GameState(GameStateEvent::GameEnded {
                    ending: ending.clone(),
                }));
        }
    }

    /// Settles a running resolver made obsolete by a manual resolution, and
    /// dispatches newly parked challenges.
    fn after_commit(&mut self, outcome: &ActionOutcome) {
        if self.pending.is_some() && self.engine.state().events.active_challenge.is_none() {
            if let Some(pending) = self.pending.take() {
                debug!(
                    "Challenge '{}' closed before its resolver answered",
                    pending.kind
                );
                Self::notify(pending.waiters, Ok(outcome.clone()));
            }
        }

        if outcome.challenge == Some(ChallengeStatus::AwaitingResolver) {
            self.dispatch_parked();
        }
    }

    /// Starts the async resolver for the parked challenge, if one is registered.
    fn dispatch_parked(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let state = self.engine.state();
        let Some(challenge) = state.events.active_challenge.clone() else {
            return;
        };
        if challenge.phase != ChallengePhase::AwaitingResolver {
            return;
        }
        let Some(resolver) = self.options.async_resolvers.get(&challenge.kind).cloned() else {
            debug!(
                "No async resolver for '{}'; waiting for ResolveChallenge",
                challenge.kind
            );
            return;
        };
        let Some(definition) = challenge_definition(&self.pack.content, &challenge).cloned() else {
            warn!(
                "Parked challenge of event '{}' has no definition",
                challenge.event
            );
            return;
        };

        let ticket = state.nonce;
        let kind = challenge.kind.clone();
        let request = ChallengeRequest {
            challenge,
            definition,
            state: state.clone(),
        };
        let (cancel_tx, cancel_rx) = oneshot::channel();
        spawn_resolution(
            resolver,
            request,
            ticket,
            cancel_rx,
            self.options.resolver_timeout,
            self.resolution_tx.clone(),
        );

        info!("Dispatched '{}' challenge to async resolver", kind);
        self.event_bus
            .publish(Event::Challenge(ChallengeEvent::Dispatched { kind: kind.clone() }));
        self.pending = Some(PendingChallenge {
            ticket,
            kind,
            cancel: Some(cancel_tx),
            waiters: Vec::new(),
        });
    }

    fn handle_resolution(&mut self, resolution: Resolution) {
        if self
            .pending
            .as_ref()
            .is_none_or(|pending| pending.ticket != resolution.ticket)
        {
            debug!("Dropping stale resolution for ticket {}", resolution.ticket);
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        let kind = pending.kind.clone();
        let event = match resolution.verdict {
            Verdict::Answered(ConflictOutcome::Cancelled) | Verdict::Cancelled => {
                ChallengeEvent::Cancelled { kind }
            }
            Verdict::Answered(outcome) => ChallengeEvent::Resolved { kind, outcome },
            Verdict::TimedOut => {
                warn!("Resolver for '{}' timed out", pending.kind);
                ChallengeEvent::TimedOut { kind }
            }
        };
        self.event_bus.publish(Event::Challenge(event));

        let result = self.execute(GameAction::ResolveChallenge(resolution.verdict.outcome()));
        Self::notify(pending.waiters, result);
    }

    fn notify(waiters: Vec<oneshot::Sender<Settled>>, result: Settled) {
        for waiter in waiters {
            if waiter.send(result.clone()).is_err() {
                debug!("SettleChallenge waiter dropped");
            }
        }
    }

    fn save_game(&self) -> SaveGame {
        SaveGame::new(self.engine.state().clone(), self.engine.combat_snapshot())
    }

    fn persist(&self) {
        let Some(repository) = &self.options.repository else {
            return;
        };
        if let Err(error) = repository.save(&self.save_game()) {
            error!(
                "Failed to persist game at nonce {}: {}",
                self.engine.state().nonce,
                error
            );
        }
    }

    fn persist_initial(&self) {
        let Some(repository) = &self.options.repository else {
            return;
        };
        if !repository.exists(self.engine.state().nonce) {
            self.persist();
        }
    }
}
