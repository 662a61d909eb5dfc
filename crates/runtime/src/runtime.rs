//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a campaign.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use saga_content::ContentPack;
use saga_core::{
    ActionOutcome, ConflictResolver, GameEngine, GameRuntimeState, ResolverRegistry,
};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::{FileStateRepository, SaveGame, StateRepository};
use crate::resolver::AsyncConflictResolver;
use crate::workers::{SimulationWorker, WorkerOptions};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Campaign seed for new games; drawn from the OS when `None`.
    pub seed: Option<u64>,
    /// Directory for a file repository when none is set explicitly.
    pub save_dir: Option<PathBuf>,
    /// Async resolvers that take longer are cancelled.
    pub resolver_timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
            save_dir: None,
            resolver_timeout: None,
        }
    }
}

/// Main runtime that orchestrates the campaign
///
/// Runtime owns the worker task and the action provider.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Option<Box<dyn ActionProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Asks the provider for one action and executes it.
    ///
    /// A challenge held by an async resolver is settled first and its
    /// resolution counts as the step. Returns `None` once the campaign has
    /// ended or the provider has nothing more to play.
    pub async fn step(&mut self) -> Result<Option<ActionOutcome>> {
        let provider = self.provider.as_ref().ok_or(RuntimeError::ProviderNotSet)?;

        if let Some(outcome) = self.handle.settle_challenge().await? {
            return Ok(Some(outcome));
        }

        let state = self.handle.query_state().await?;
        if state.is_over() {
            return Ok(None);
        }
        let combat = self.handle.query_combat().await?;

        match provider.provide_action(&state, combat.as_ref()).await? {
            Some(action) => self.handle.execute_action(action).await.map(Some),
            None => Ok(None),
        }
    }

    /// Steps until the provider runs dry or the campaign ends.
    ///
    /// Returns the number of committed actions.
    pub async fn run(&mut self) -> Result<u64> {
        let mut committed = 0;
        while self.step().await?.is_some() {
            committed += 1;
        }
        Ok(committed)
    }

    /// Set the action provider
    pub fn set_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which stops once every handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    pack: Option<Arc<ContentPack>>,
    save: Option<SaveGame>,
    repository: Option<Arc<dyn StateRepository>>,
    provider: Option<Box<dyn ActionProvider>>,
    resolvers: ResolverRegistry,
    async_resolvers: BTreeMap<String, Arc<dyn AsyncConflictResolver>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            pack: None,
            save: None,
            repository: None,
            provider: None,
            resolvers: ResolverRegistry::default(),
            async_resolvers: BTreeMap::new(),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Content and tuning of the campaign.
    pub fn content(mut self, pack: impl Into<Arc<ContentPack>>) -> Self {
        self.pack = Some(pack.into());
        self
    }

    /// Continue from a save game instead of opening a new campaign.
    pub fn resume(mut self, save: SaveGame) -> Self {
        self.save = Some(save);
        self
    }

    pub fn repository(mut self, repository: impl StateRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    pub fn shared_repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Synchronous resolver run inside the engine pipeline.
    pub fn resolver(
        mut self,
        kind: impl Into<String>,
        resolver: impl ConflictResolver + 'static,
    ) -> Self {
        self.resolvers.register(kind, resolver);
        self
    }

    /// Async resolver for challenges the engine parks.
    ///
    /// Any synchronous resolver for the same kind is removed, otherwise the
    /// engine would never park such challenges.
    pub fn async_resolver(
        mut self,
        kind: impl Into<String>,
        resolver: impl AsyncConflictResolver + 'static,
    ) -> Self {
        let kind = kind.into();
        self.resolvers.unregister(&kind);
        self.async_resolvers.insert(kind, Arc::new(resolver));
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let pack = self.pack.ok_or(RuntimeError::MissingContent)?;

        let repository = match (self.repository, &self.config.save_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => {
                Some(Arc::new(FileStateRepository::new(dir)?) as Arc<dyn StateRepository>)
            }
            (None, None) => None,
        };

        let mut engine = match self.save {
            Some(save) => {
                info!(
                    "Resuming campaign '{}' at nonce {}",
                    pack.content.campaign.id,
                    save.nonce()
                );
                GameEngine::resume(save.state, save.combat, &pack.config)
            }
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                info!(
                    "Starting campaign '{}' with seed {}",
                    pack.content.campaign.id, seed
                );
                let state = GameRuntimeState::new_game(seed, &pack.content, &pack.config)
                    .map_err(RuntimeError::InitialState)?;
                GameEngine::new(state, &pack.config)
            }
        };
        *engine.resolvers_mut() = self.resolvers;

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SimulationWorker::new(
            engine,
            pack,
            command_rx,
            event_bus,
            WorkerOptions {
                repository,
                async_resolvers: self.async_resolvers,
                resolver_timeout: self.config.resolver_timeout,
            },
        );
        let sim_worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider: self.provider,
            sim_worker_handle,
        })
    }
}
