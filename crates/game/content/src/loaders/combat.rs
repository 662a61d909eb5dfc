//! Combat content loader: heroes, deck cards, fate cards, enemies and curses.

use std::path::Path;

use saga_core::env::{
    CardDefinition, CurseDefinition, EnemyDefinition, FateCardDefinition, HeroDefinition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatCatalog {
    pub heroes: Vec<HeroDefinition>,
    pub cards: Vec<CardDefinition>,
    pub fate_cards: Vec<FateCardDefinition>,
    pub enemies: Vec<EnemyDefinition>,
    pub curses: Vec<CurseDefinition>,
}

/// Loader for `combat.ron`.
pub struct CombatLoader;

impl CombatLoader {
    pub fn load(path: &Path) -> LoadResult<CombatCatalog> {
        read_ron(path, "combat catalog")
    }
}
