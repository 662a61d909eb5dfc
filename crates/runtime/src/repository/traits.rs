//! Repository contract for saving and loading save games.

use super::{Result, SaveGame};

/// Persistence for [`SaveGame`]s indexed by the state's nonce.
pub trait StateRepository: Send + Sync {
    /// Save under `save.nonce()`, replacing any previous save at that nonce.
    fn save(&self, save: &SaveGame) -> Result<()>;

    /// Load the save game stored at `nonce`
    fn load(&self, nonce: u64) -> Result<Option<SaveGame>>;

    /// Check if a save exists
    fn exists(&self, nonce: u64) -> bool;

    /// Delete a save
    fn delete(&self, nonce: u64) -> Result<()>;

    /// All stored nonces, ascending
    fn list_nonces(&self) -> Result<Vec<u64>>;

    /// The save with the highest nonce
    fn load_latest(&self) -> Result<Option<SaveGame>> {
        match self.list_nonces()?.last() {
            Some(&nonce) => self.load(nonce),
            None => Ok(None),
        }
    }

    /// Delete all saves in a range [start, end]
    fn delete_range(&self, start: u64, end: u64) -> Result<usize> {
        let mut deleted = 0;
        for nonce in self.list_nonces()? {
            if (start..=end).contains(&nonce) {
                self.delete(nonce)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
