//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SaveGame, StateRepository};

/// Platform save directory, e.g. `~/.local/share/saga/saves` on Linux.
///
/// Falls back to `./save_data` when no home directory can be determined.
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "saga")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// File-based implementation of StateRepository.
///
/// Save games are stored as `save_{nonce}.bin` in bincode format. Writes go
/// to a temporary file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("save_{}.bin", nonce))
    }

    /// Decodes a save file written by this repository.
    pub fn read_file(path: &Path) -> Result<SaveGame> {
        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    fn parse_nonce(path: &Path) -> Option<u64> {
        path.file_name()?
            .to_str()?
            .strip_prefix("save_")?
            .strip_suffix(".bin")?
            .parse()
            .ok()
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, save: &SaveGame) -> Result<()> {
        let path = self.save_path(save.nonce());
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(save).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved game[{}] to {}", save.nonce(), path.display());

        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveGame>> {
        let path = self.save_path(nonce);

        if !path.exists() {
            return Ok(None);
        }

        let save = Self::read_file(&path)?;
        if save.nonce() != nonce {
            return Err(RepositoryError::NonceMismatch {
                nonce,
                stored: save.nonce(),
            });
        }

        tracing::debug!("Loaded game[{}] from {}", nonce, path.display());

        Ok(Some(save))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.save_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.save_path(nonce);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted game[{}]", nonce);
        }

        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            if let Some(nonce) = Self::parse_nonce(&entry?.path()) {
                nonces.push(nonce);
            }
        }
        nonces.sort_unstable();
        Ok(nonces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_parsed_from_file_name() {
        assert_eq!(
            FileStateRepository::parse_nonce(Path::new("/tmp/save_42.bin")),
            Some(42)
        );
        assert_eq!(
            FileStateRepository::parse_nonce(Path::new("/tmp/save_42.bin.tmp")),
            None
        );
        assert_eq!(
            FileStateRepository::parse_nonce(Path::new("/tmp/notes.txt")),
            None
        );
    }

    #[test]
    fn empty_directory_has_no_latest_save() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("saves")).unwrap();
        assert!(repo.list_nonces().unwrap().is_empty());
        assert!(repo.load_latest().unwrap().is_none());
        assert!(repo.load(3).unwrap().is_none());
    }
}
