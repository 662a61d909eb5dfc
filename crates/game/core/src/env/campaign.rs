use std::collections::BTreeMap;

use crate::state::{FateCardId, Flag, HeroId, QuestId, RegionId, ResourceId};

use crate::economy::Transaction;

use super::Consequences;

/// Starting conditions and end predicates of a campaign.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CampaignDefinition {
    pub id: String,
    pub hero: HeroId,
    pub start_region: RegionId,
    pub starting_flags: Vec<Flag>,
    pub initial_pressure: u32,
    pub initial_resonance: i32,
    pub initial_balance: i32,
    /// Fate deck composition used by every combat. Ids may repeat.
    pub fate_deck: Vec<FateCardId>,
    /// Paid by every rest.
    pub rest_cost: Transaction,
    /// Effects applied the first time pressure reaches a threshold.
    pub threshold_effects: BTreeMap<u32, Consequences>,
    pub end_conditions: Vec<EndCondition>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndKind {
    Victory,
    Defeat,
}

/// Content-defined way to end the campaign.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndCondition {
    pub kind: EndKind,
    pub predicate: EndPredicate,
    /// Presentation key describing the ending.
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndPredicate {
    QuestCompleted(QuestId),
    PressureAtLeast(u32),
    ResourceAtMost { resource: ResourceId, amount: i32 },
    BalanceAtLeast(i32),
    BalanceAtMost(i32),
    DayReached(u32),
    FlagSet(Flag),
}
