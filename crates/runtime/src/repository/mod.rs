//! Repository layer for save games.
//!
//! Repositories handle data that CHANGES during gameplay: the canonical state
//! and the open combat session, indexed by action nonce. Static content is
//! loaded once by `saga-content` and never persisted here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, default_save_dir};
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;

use serde::{Deserialize, Serialize};

use saga_core::{CombatSnapshot, GameRuntimeState};

/// Everything needed to resume a campaign, mid-combat included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub state: GameRuntimeState,
    pub combat: Option<CombatSnapshot>,
}

impl SaveGame {
    pub fn new(state: GameRuntimeState, combat: Option<CombatSnapshot>) -> Self {
        Self { state, combat }
    }

    pub fn nonce(&self) -> u64 {
        self.state.nonce
    }
}
