use std::collections::{BTreeMap, BTreeSet};

use super::EventId;

/// Event bookkeeping: history, cooldowns and the currently open event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRuntimeState {
    /// One-time events that already fired.
    pub completed: BTreeSet<EventId>,
    pub occurrences: BTreeMap<EventId, u32>,
    /// Remaining cooldown days; entries are removed when they reach zero.
    pub cooldowns: BTreeMap<EventId, u32>,
    pub active_event: Option<EventId>,
    pub active_challenge: Option<ChallengeRef>,
}

impl EventRuntimeState {
    pub fn occurrences_of(&self, event: &str) -> u32 {
        self.occurrences.get(event).copied().unwrap_or(0)
    }

    pub fn is_on_cooldown(&self, event: &str) -> bool {
        self.cooldowns.get(event).is_some_and(|days| *days > 0)
    }

    /// True while an event or a challenge blocks free roaming.
    pub fn is_busy(&self) -> bool {
        self.active_event.is_some() || self.active_challenge.is_some()
    }
}

/// Pointer to the challenge definition currently being resolved.
///
/// The definition itself stays in the content registry: `choice` selects the
/// choice-level challenge, `None` the event-level one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeRef {
    pub event: EventId,
    pub choice: Option<usize>,
    /// Resolver kind, copied from the definition for routing.
    pub kind: String,
    pub phase: ChallengePhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ChallengePhase {
    /// An interactive combat session is open.
    InCombat,
    /// Waiting for an external resolver to report back.
    AwaitingResolver,
}
