//! Content factory for building a validated registry from a data directory.

use std::path::{Path, PathBuf};

use saga_core::env::{Definition, Registry};
use saga_core::{ContentRegistry, GameConfig};

use crate::loaders::{
    CampaignLoader, CombatLoader, ConfigLoader, EventLoader, LoadResult, QuestLoader, WorldLoader,
};

/// A loaded, validated content pack plus its tuning.
#[derive(Clone, Debug)]
pub struct ContentPack {
    pub content: ContentRegistry,
    pub config: GameConfig,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional)
/// ├── campaign.ron
/// ├── world.ron
/// ├── events.ron
/// ├── quests.ron      (optional)
/// └── combat.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the Crossroads pack shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/crossroads"))
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(GameConfig::default())
        }
    }

    /// Load every definition file and validate cross-references.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let campaign = CampaignLoader::load(&self.data_dir.join("campaign.ron"))?;
        let mut registry = ContentRegistry::new(campaign);

        let world = WorldLoader::load(&self.data_dir.join("world.ron"))?;
        fill(&mut registry.regions, world.regions)?;
        fill(&mut registry.anchors, world.anchors)?;

        let events = EventLoader::load(&self.data_dir.join("events.ron"))?;
        fill(&mut registry.events, events)?;

        let quests_path = self.data_dir.join("quests.ron");
        if quests_path.exists() {
            fill(&mut registry.quests, QuestLoader::load(&quests_path)?)?;
        }

        let combat = CombatLoader::load(&self.data_dir.join("combat.ron"))?;
        fill(&mut registry.heroes, combat.heroes)?;
        fill(&mut registry.cards, combat.cards)?;
        fill(&mut registry.fate_cards, combat.fate_cards)?;
        fill(&mut registry.enemies, combat.enemies)?;
        fill(&mut registry.curses, combat.curses)?;

        registry.validate().map_err(|e| {
            anyhow::anyhow!(
                "Content pack {} failed validation: {}",
                self.data_dir.display(),
                e
            )
        })?;
        Ok(registry)
    }

    /// Load configuration and content together.
    pub fn load_pack(&self) -> LoadResult<ContentPack> {
        Ok(ContentPack {
            config: self.load_config()?,
            content: self.load_registry()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn fill<T: Definition>(registry: &mut Registry<T>, items: Vec<T>) -> LoadResult<()> {
    for item in items {
        registry
            .insert(item)
            .map_err(|e| anyhow::anyhow!("Failed to register {}: {}", T::KIND, e))?;
    }
    Ok(())
}
