//! Combat outcome and final accounting.

use std::collections::BTreeMap;

use crate::state::{CardId, CardZones, ChallengeRef, EnemyId, ResourceId};

use super::CombatSnapshot;

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    /// Disposition reached -100.
    Neutralized,
    /// Disposition reached +100.
    Subjugated,
    /// The hero fell.
    Defeat,
}

impl CombatOutcome {
    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Neutralized | Self::Subjugated)
    }
}

/// Everything the engine needs to commit a finished combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub enemy: EnemyId,
    pub challenge: ChallengeRef,
    pub outcome: CombatOutcome,
    pub final_disposition: i32,
    /// Applied to world resonance. Negative after neutralization, positive
    /// after subjugation, zero on defeat.
    pub resonance_delta: i32,
    pub health_delta: i32,
    pub final_health: i32,
    /// Cards gained on victory.
    pub loot: Vec<CardId>,
    /// Resources gained on victory.
    pub rewards: BTreeMap<ResourceId, i32>,
    pub rounds: u32,
    /// Player card zones after the fight, hand discarded.
    pub cards: CardZones,
    /// Final session state, kept for replay and inspection.
    pub snapshot: CombatSnapshot,
}
