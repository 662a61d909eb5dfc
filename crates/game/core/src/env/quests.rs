use crate::state::{Flag, ObjectiveId, QuestId, RegionId};

use super::Consequences;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestDefinition {
    pub id: QuestId,
    pub unlock: QuestCondition,
    /// Start immediately once unlocked.
    pub auto_start: bool,
    /// Ordered objectives; the first one is assigned on start.
    pub objectives: Vec<ObjectiveDefinition>,
    pub on_complete: Consequences,
    pub on_fail: Consequences,
}

impl QuestDefinition {
    pub fn objective(&self, id: &str) -> Option<&ObjectiveDefinition> {
        self.objectives.iter().find(|objective| objective.id == id)
    }

    /// Explicit successor of `id`, or the next objective in order.
    pub fn next_objective(&self, id: &str) -> Option<&ObjectiveDefinition> {
        let index = self.objectives.iter().position(|o| o.id == id)?;
        match &self.objectives[index].next {
            Some(next) => self.objective(next),
            None => self.objectives.get(index + 1),
        }
    }
}

/// Unlock predicate. Every populated field must hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestCondition {
    pub required_flags: Vec<Flag>,
    pub forbidden_flags: Vec<Flag>,
    pub min_pressure: Option<u32>,
    pub max_pressure: Option<u32>,
    pub min_balance: Option<i32>,
    pub max_balance: Option<i32>,
    pub visited_regions: Vec<RegionId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectiveDefinition {
    pub id: ObjectiveId,
    pub complete_when: ObjectiveGoal,
    pub fail_when: Option<ObjectiveFailure>,
    /// Explicit successor; defaults to the next objective in order.
    pub next: Option<ObjectiveId>,
}

/// Completion gate. An objective with an empty goal completes immediately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectiveGoal {
    /// Global, player or quest-local flags.
    pub flags: Vec<Flag>,
    pub visited_region: Option<RegionId>,
    pub progress: Option<ProgressTarget>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressTarget {
    pub key: String,
    pub target: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectiveFailure {
    pub flag: Option<Flag>,
    /// Fails once this day is passed without completion.
    pub deadline_day: Option<u32>,
}
