//! Event catalog loader.

use std::path::Path;

use saga_core::EventDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Event catalog structure for RON files.
///
/// Declaration order is preserved; selection walks events in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<EventDefinition>,
}

/// Loader for `events.ron`.
pub struct EventLoader;

impl EventLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EventDefinition>> {
        let catalog: EventCatalog = read_ron(path, "event catalog")?;
        Ok(catalog.events)
    }
}
