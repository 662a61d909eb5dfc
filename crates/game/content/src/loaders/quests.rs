//! Quest catalog loader.

use std::path::Path;

use saga_core::env::QuestDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub quests: Vec<QuestDefinition>,
}

/// Loader for `quests.ron`.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<QuestDefinition>> {
        let catalog: QuestCatalog = read_ron(path, "quest catalog")?;
        Ok(catalog.quests)
    }
}
