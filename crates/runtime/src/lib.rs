//! Async runtime around the deterministic saga engine.
//!
//! This crate wires a content pack, action providers, repositories and worker
//! tasks into a cohesive runtime API. Consumers embed [`Runtime`] to drive a
//! campaign, subscribe to events, and interact with the game through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`resolver`] runs external conflict resolvers with cancellation
//! - [`repository`] persists save games
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod resolver;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle, ScriptedActionProvider};
pub use events::{ChallengeEvent, CombatEvent, Event, EventBus, GameStateEvent, Topic};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SaveGame, StateRepository,
};
pub use resolver::{AsyncConflictResolver, ChallengeRequest};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
