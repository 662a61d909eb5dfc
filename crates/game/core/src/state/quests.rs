use std::collections::{BTreeMap, BTreeSet};

use super::{Flag, ObjectiveId, QuestId};

/// Quest lifecycle. `Completed` and `Failed` are terminal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    Locked,
    Available,
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Runtime progress of one quest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestProgress {
    pub status: QuestStatus,
    pub current_objective: Option<ObjectiveId>,
    pub completed_objectives: BTreeSet<ObjectiveId>,
    pub failed_objectives: BTreeSet<ObjectiveId>,
    pub flags: BTreeSet<Flag>,
    pub counters: BTreeMap<String, i32>,
}

impl QuestProgress {
    pub fn counter(&self, key: &str) -> i32 {
        self.counters.get(key).copied().unwrap_or(0)
    }
}

/// All quest progress keyed by quest id. Absent quests are `Locked`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRuntimeState {
    pub quests: BTreeMap<QuestId, QuestProgress>,
}

impl QuestRuntimeState {
    pub fn get(&self, quest: &str) -> Option<&QuestProgress> {
        self.quests.get(quest)
    }

    pub fn status(&self, quest: &str) -> QuestStatus {
        self.quests
            .get(quest)
            .map(|progress| progress.status)
            .unwrap_or_default()
    }

    pub fn entry(&mut self, quest: &str) -> &mut QuestProgress {
        self.quests.entry(quest.to_owned()).or_default()
    }
}
