//! Read-only inputs of the simulation.
//!
//! Content definitions, tunable configuration and the random source trait.
//! The [`GameEnv`] aggregate bundles content and configuration so the engine
//! can reach everything it needs without owning it.
mod campaign;
mod combat;
mod consequences;
mod content;
mod error;
mod events;
mod quests;
mod regions;
mod rng;

pub use campaign::{CampaignDefinition, EndCondition, EndKind, EndPredicate};
pub use combat::{
    CardDefinition, CurseDefinition, EnemyDefinition, FateCardDefinition, FateKeyword,
    HeroDefinition, IntentDefinition, IntentKind,
};
pub use consequences::{Consequences, ProgressDelta, QuestFlag};
pub use content::{ContentOracle, ContentRegistry, Definition, Registry};
pub use error::ContentError;
pub use events::{
    ChallengeDefinition, ChoiceRequirements, EventChoice, EventDefinition, EventTrigger,
};
pub use quests::{
    ObjectiveDefinition, ObjectiveFailure, ObjectiveGoal, ProgressTarget, QuestCondition,
    QuestDefinition,
};
pub use regions::{Alignment, AnchorDefinition, RegionDefinition};
pub use rng::{PcgRng, RandomSource, scramble_seed, shuffle};

use crate::config::GameConfig;

/// Aggregates the read-only inputs required by the engine.
pub struct Env<'a, C>
where
    C: ContentOracle + ?Sized,
{
    content: &'a C,
    config: &'a GameConfig,
}

pub type GameEnv<'a> = Env<'a, dyn ContentOracle + 'a>;

impl<'a, C> Env<'a, C>
where
    C: ContentOracle + ?Sized,
{
    pub fn new(content: &'a C, config: &'a GameConfig) -> Self {
        Self { content, config }
    }

    pub fn content(&self) -> &'a C {
        self.content
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl<'a, C> Env<'a, C>
where
    C: ContentOracle + 'a,
{
    /// Converts this environment into the trait-object based [`GameEnv`].
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let content: &'a dyn ContentOracle = self.content;
        Env::new(content, self.config)
    }
}

impl<C> Clone for Env<'_, C>
where
    C: ContentOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Env<'_, C> where C: ContentOracle + ?Sized {}

impl<C> std::fmt::Debug for Env<'_, C>
where
    C: ContentOracle + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("campaign", &self.content.campaign().id)
            .field("config", self.config)
            .finish()
    }
}
