//! Data-driven content packs and loaders.
//!
//! This crate turns a directory of RON/TOML files into the core's content
//! registry and configuration:
//! - Campaign definition (start, hero, fate deck, endings)
//! - Regions and anchors
//! - Events with choices and challenges
//! - Quests and objectives
//! - Heroes, cards, fate cards, enemies and curses
//! - Game configuration (TOML)
//!
//! Content is consumed through [`saga_core::ContentOracle`] and never appears
//! in game state. Every pack is validated before it is handed out.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CampaignLoader, CombatCatalog, CombatLoader, ConfigLoader, ContentFactory, ContentPack,
    EventLoader, LoadResult, QuestLoader, WorldCatalog, WorldLoader,
};
