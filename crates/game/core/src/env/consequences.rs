use std::collections::BTreeMap;

use crate::state::{AnchorId, CardId, CurseId, Flag, QuestId, ResourceId};

/// Declarative bundle of state deltas produced by a choice, challenge
/// outcome, quest completion or pressure threshold.
///
/// Resource deltas are signed and are not a transaction: a loss is applied
/// even when it drives a resource to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consequences {
    pub resources: BTreeMap<ResourceId, i32>,
    pub set_flags: Vec<Flag>,
    pub clear_flags: Vec<Flag>,
    pub set_player_flags: Vec<Flag>,
    /// Flags set on the region the player currently stands in.
    pub set_region_flags: Vec<Flag>,
    pub pressure: i32,
    pub balance: i32,
    pub resonance: i32,
    pub quest_progress: Vec<ProgressDelta>,
    pub quest_flags: Vec<QuestFlag>,
    /// Cards minted onto the discard pile.
    pub add_cards: Vec<CardId>,
    pub add_curses: Vec<CurseId>,
    pub remove_curses: Vec<CurseId>,
    pub anchors: BTreeMap<AnchorId, i32>,
}

impl Consequences {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Increment of a named quest counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressDelta {
    pub quest: QuestId,
    pub key: String,
    pub amount: i32,
}

/// Quest-local flag raised by a consequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestFlag {
    pub quest: QuestId,
    pub flag: Flag,
}
