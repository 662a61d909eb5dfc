//! Region and anchor loader.

use std::path::Path;

use saga_core::env::{AnchorDefinition, RegionDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Map of a campaign: regions and the anchors that protect them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldCatalog {
    pub regions: Vec<RegionDefinition>,
    pub anchors: Vec<AnchorDefinition>,
}

/// Loader for `world.ron`.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldCatalog> {
        read_ron(path, "world")
    }
}
