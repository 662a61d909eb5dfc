//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use saga_content::{ContentFactory, ContentPack};
use saga_core::ConflictOutcome;
use saga_runtime::{AsyncConflictResolver, ChallengeRequest};

pub const SEED: u64 = 7;

pub fn pack() -> Arc<ContentPack> {
    Arc::new(ContentFactory::bundled().load_pack().unwrap())
}

/// Answers every challenge with a fixed outcome.
pub struct Answer(pub ConflictOutcome);

#[async_trait]
impl AsyncConflictResolver for Answer {
    async fn resolve(&self, _request: ChallengeRequest) -> ConflictOutcome {
        self.0
    }
}

/// Never answers; only cancellation or timeout end it.
pub struct Silent;

#[async_trait]
impl AsyncConflictResolver for Silent {
    async fn resolve(&self, _request: ChallengeRequest) -> ConflictOutcome {
        std::future::pending().await
    }
}

/// Answers after a delay.
pub struct Slow(pub Duration, pub ConflictOutcome);

#[async_trait]
impl AsyncConflictResolver for Slow {
    async fn resolve(&self, _request: ChallengeRequest) -> ConflictOutcome {
        tokio::time::sleep(self.0).await;
        self.1
    }
}
