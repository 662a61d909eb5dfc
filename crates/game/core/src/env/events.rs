use std::collections::BTreeMap;

use crate::economy::Transaction;
use crate::state::{EnemyId, EventId, Flag, RegionId, ResourceId};

use super::Consequences;

/// When an event may be offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventTrigger {
    #[default]
    Any,
    /// On entering a region.
    Arrival,
    /// On exploring the current region.
    Explore,
}

impl EventTrigger {
    pub fn matches(&self, occasion: EventTrigger) -> bool {
        *self == EventTrigger::Any || *self == occasion
    }
}

/// Static description of an event. Empty filter lists are wildcards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventDefinition {
    pub id: EventId,
    pub weight: u32,
    pub one_time: bool,
    /// Days the event is unavailable after firing.
    pub cooldown: u32,
    pub trigger: EventTrigger,
    pub regions: Vec<RegionId>,
    pub region_types: Vec<String>,
    pub region_degradation: Vec<u8>,
    pub required_flags: Vec<Flag>,
    pub forbidden_flags: Vec<Flag>,
    pub min_pressure: u32,
    pub max_pressure: u32,
    pub choices: Vec<EventChoice>,
    pub challenge: Option<ChallengeDefinition>,
}

impl Default for EventDefinition {
    fn default() -> Self {
        Self {
            id: EventId::new(),
            weight: 1,
            one_time: false,
            cooldown: 0,
            trigger: EventTrigger::Any,
            regions: Vec::new(),
            region_types: Vec::new(),
            region_degradation: Vec::new(),
            required_flags: Vec::new(),
            forbidden_flags: Vec::new(),
            min_pressure: 0,
            max_pressure: u32::MAX,
            choices: Vec::new(),
            challenge: None,
        }
    }
}

impl EventDefinition {
    /// Challenge triggered by picking `choice`, if any.
    pub fn challenge_for(&self, choice: usize) -> Option<(Option<usize>, &ChallengeDefinition)> {
        let option = self.choices.get(choice)?;
        if let Some(challenge) = &option.challenge {
            return Some((Some(choice), challenge));
        }
        if option.avoids_challenge {
            return None;
        }
        self.challenge.as_ref().map(|challenge| (None, challenge))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventChoice {
    pub id: String,
    pub cost: Transaction,
    pub requirements: ChoiceRequirements,
    pub consequences: Consequences,
    /// Overrides the event-level challenge.
    pub challenge: Option<ChallengeDefinition>,
    /// Skips the event-level challenge.
    pub avoids_challenge: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoiceRequirements {
    pub min_resources: BTreeMap<ResourceId, i32>,
    pub required_flags: Vec<Flag>,
    pub min_balance: Option<i32>,
    pub max_balance: Option<i32>,
}

/// Conflict attached to an event or choice.
///
/// `kind` routes the challenge to a registered resolver (`"combat"`,
/// `"skill_check"`, or any kind handled outside the core).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChallengeDefinition {
    pub kind: String,
    pub enemy: Option<EnemyId>,
    pub difficulty: i32,
    /// Resource added to skill-check rolls.
    pub attribute: Option<ResourceId>,
    pub on_success: Consequences,
    pub on_partial: Consequences,
    pub on_failure: Consequences,
}

impl ChallengeDefinition {
    pub const COMBAT: &'static str = "combat";
    pub const SKILL_CHECK: &'static str = "skill_check";

    pub fn combat(enemy: impl Into<EnemyId>) -> Self {
        Self {
            kind: Self::COMBAT.to_owned(),
            enemy: Some(enemy.into()),
            ..Self::default()
        }
    }
}
