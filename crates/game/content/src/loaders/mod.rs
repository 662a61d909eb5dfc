//! Content loaders for reading game data from files.
//!
//! Each loader parses one file of a pack. [`ContentFactory`] walks the whole
//! directory and assembles a validated [`saga_core::ContentRegistry`].

pub mod campaign;
pub mod combat;
pub mod config;
pub mod events;
pub mod factory;
pub mod quests;
pub mod world;

pub use campaign::CampaignLoader;
pub use combat::{CombatCatalog, CombatLoader};
pub use config::ConfigLoader;
pub use events::EventLoader;
pub use factory::{ContentFactory, ContentPack};
pub use quests::QuestLoader;
pub use world::{WorldCatalog, WorldLoader};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads and parses one RON document.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}
