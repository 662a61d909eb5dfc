//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the world, the player,
//! event and quest bookkeeping. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
pub mod delta;

mod cards;
mod events;
mod ids;
mod player;
mod quests;
mod resources;
mod world;

pub use cards::{CardInstance, CardZones, Zone};
pub use delta::{ChangeSections, StateChange, StateDelta};
pub use events::{ChallengePhase, ChallengeRef, EventRuntimeState};
pub use ids::{
    AnchorId, CardId, CardUid, CurseId, EnemyId, EventId, FateCardId, Flag, HeroId, ObjectiveId,
    QuestId, RegionId, ResourceId,
};
pub use player::PlayerState;
pub use quests::{QuestProgress, QuestRuntimeState, QuestStatus};
pub use resources::Resources;
pub use world::{AnchorState, RegionState, WorldState};

use crate::config::GameConfig;
use crate::env::{ContentError, ContentOracle, EndKind, PcgRng, shuffle};
use crate::pressure::{DefaultPressureRules, PressureState};

/// How and when the campaign ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameEnding {
    pub kind: EndKind,
    /// Presentation key of the predicate that fired.
    pub reason: String,
    pub day: u32,
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRuntimeState {
    /// Seed the campaign was started with. Never modified.
    pub seed: u64,
    /// Number of actions committed so far.
    pub nonce: u64,
    /// The single shared random stream.
    pub rng: PcgRng,
    pub world: WorldState,
    pub player: PlayerState,
    pub events: EventRuntimeState,
    pub quests: QuestRuntimeState,
    pub ending: Option<GameEnding>,
}

impl GameRuntimeState {
    /// Builds the opening state of the content's campaign.
    ///
    /// The starting deck is shuffled with the campaign's random stream, so the
    /// same seed always yields the same opening.
    pub fn new_game(
        seed: u64,
        content: &dyn ContentOracle,
        config: &GameConfig,
    ) -> Result<Self, ContentError> {
        let campaign = content.campaign();
        let hero = content
            .hero(&campaign.hero)
            .ok_or_else(|| ContentError::unknown("hero", &campaign.hero))?;
        if content.region(&campaign.start_region).is_none() {
            return Err(ContentError::unknown("region", &campaign.start_region));
        }

        let mut rng = PcgRng::from_seed(seed);

        let mut resources = Resources::new();
        for (resource, cap) in &hero.resource_caps {
            resources.set_cap(resource.clone(), *cap);
        }
        resources.set_cap(GameConfig::HEALTH, hero.max_health);
        for (resource, amount) in &hero.starting_resources {
            resources.set(resource.clone(), *amount);
        }
        resources.set(GameConfig::HEALTH, hero.max_health);

        let mut cards = CardZones::new();
        for card in &hero.starting_deck {
            if content.card(card).is_none() {
                return Err(ContentError::unknown("card", card));
            }
            cards.add_to_draw(card.clone());
        }
        shuffle(&mut cards.draw, &mut rng);

        let mut world = WorldState {
            current_region: campaign.start_region.clone(),
            resonance: WorldState::clamp_resonance(campaign.initial_resonance),
            pressure: PressureState::new(campaign.initial_pressure.min(config.pressure.max)),
            flags: campaign.starting_flags.iter().cloned().collect(),
            ..WorldState::default()
        };
        let rules = DefaultPressureRules::new(config.pressure.clone());
        world.pressure.sync_triggered_thresholds_from_pressure(&rules);

        for region in content.regions() {
            world.regions.insert(
                region.id.clone(),
                RegionState {
                    discovered: region.starts_discovered,
                    ..RegionState::default()
                },
            );
        }
        if let Some(start) = world.regions.get_mut(&campaign.start_region) {
            start.discovered = true;
            start.visit_count = 1;
        }
        for anchor in content.anchors() {
            world.anchors.insert(
                anchor.id.clone(),
                AnchorState::new(anchor.region.clone(), anchor.initial_integrity, anchor.alignment),
            );
        }

        let player = PlayerState {
            hero: hero.id.clone(),
            resources,
            balance: PlayerState::clamp_balance(campaign.initial_balance),
            cards,
            ..PlayerState::default()
        };

        Ok(Self {
            seed,
            nonce: 0,
            rng,
            world,
            player,
            events: EventRuntimeState::default(),
            quests: QuestRuntimeState::default(),
            ending: None,
        })
    }

    /// Global or player flag lookup.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.world.flags.contains(flag) || self.player.flags.contains(flag)
    }

    pub fn day(&self) -> u32 {
        self.world.day()
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// SHA-256 digest of the canonical bincode encoding.
    ///
    /// Two runs that made the same decisions from the same seed have equal roots.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
