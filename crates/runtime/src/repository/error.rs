//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("state repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("save game {nonce} is stored under nonce {stored}")]
    NonceMismatch { nonce: u64, stored: u64 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
