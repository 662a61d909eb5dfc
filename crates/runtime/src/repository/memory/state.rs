//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SaveGame, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Stores save games indexed by nonce for testing and local development.
#[derive(Debug, Default)]
pub struct InMemoryStateRepo {
    saves: RwLock<BTreeMap<u64, SaveGame>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial save.
    pub fn with_initial_save(save: SaveGame) -> Self {
        Self {
            saves: RwLock::new(BTreeMap::from([(save.nonce(), save)])),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, save: &SaveGame) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(save.nonce(), save.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveGame>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(&nonce).cloned())
    }

    fn exists(&self, nonce: u64) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().copied().collect())
    }
}
