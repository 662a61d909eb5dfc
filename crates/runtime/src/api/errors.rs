//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, the engine and
//! action providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use saga_core::{ContentError, ExecuteError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action provider not set")]
    ProviderNotSet,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("runtime requires a content pack to be configured before building")]
    MissingContent,

    #[error("failed to open a new game from the content pack")]
    InitialState(#[source] ContentError),

    #[error("no save game found in the repository")]
    NoSaveGame,
}

impl RuntimeError {
    /// True when the engine refused the action without touching state.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Execute(error) if error.is_rejection())
    }
}
