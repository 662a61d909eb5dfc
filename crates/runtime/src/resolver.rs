//! External conflict resolvers.
//!
//! Challenges whose kind has no synchronous resolver in the engine are parked
//! until someone reports an outcome. An [`AsyncConflictResolver`] registered
//! with the runtime for that kind is started as a task as soon as the
//! challenge parks; whatever it answers is fed back to the engine as a
//! `ResolveChallenge` action. Cancellation or timeout feed back `Cancelled`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use saga_core::env::ChallengeDefinition;
use saga_core::state::ChallengeRef;
use saga_core::{ConflictOutcome, GameRuntimeState};

/// Owned view of a parked challenge handed to an async resolver.
#[derive(Clone, Debug)]
pub struct ChallengeRequest {
    pub challenge: ChallengeRef,
    pub definition: ChallengeDefinition,
    /// State at the moment the challenge parked.
    pub state: GameRuntimeState,
}

/// Resolves parked challenges of one kind outside the engine.
///
/// Implementations may await anything (player input, a remote service). They
/// are cancelled by dropping the future, so they should not hold state that
/// must be cleaned up.
#[async_trait]
pub trait AsyncConflictResolver: Send + Sync {
    async fn resolve(&self, request: ChallengeRequest) -> ConflictOutcome;
}

/// How a resolver task ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Answered(ConflictOutcome),
    Cancelled,
    TimedOut,
}

impl Verdict {
    pub(crate) fn outcome(self) -> ConflictOutcome {
        match self {
            Self::Answered(outcome) => outcome,
            Self::Cancelled | Self::TimedOut => ConflictOutcome::Cancelled,
        }
    }
}

/// Message from a resolver task back to the simulation worker.
#[derive(Debug)]
pub(crate) struct Resolution {
    /// Nonce at which the challenge parked; stale answers are dropped.
    pub ticket: u64,
    pub verdict: Verdict,
}

/// Runs `resolver` until it answers, `cancel` fires (or is dropped), or
/// `timeout` elapses, then reports to `reply`.
pub(crate) fn spawn_resolution(
    resolver: Arc<dyn AsyncConflictResolver>,
    request: ChallengeRequest,
    ticket: u64,
    cancel: oneshot::Receiver<()>,
    timeout: Option<Duration>,
    reply: mpsc::Sender<Resolution>,
) {
    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
        };

        let verdict = tokio::select! {
            outcome = resolver.resolve(request) => Verdict::Answered(outcome),
            _ = cancel => Verdict::Cancelled,
            _ = deadline => Verdict::TimedOut,
        };

        if reply.send(Resolution { ticket, verdict }).await.is_err() {
            tracing::debug!("Resolution for ticket {} dropped (worker stopped)", ticket);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_and_timed_out_map_to_cancelled_outcome() {
        assert_eq!(Verdict::Cancelled.outcome(), ConflictOutcome::Cancelled);
        assert_eq!(Verdict::TimedOut.outcome(), ConflictOutcome::Cancelled);
        assert_eq!(
            Verdict::Answered(ConflictOutcome::Partial).outcome(),
            ConflictOutcome::Partial
        );
    }
}
