mod changes;

pub use changes::StateChange;

use bitflags::bitflags;

use crate::action::GameAction;

bitflags! {
    /// Sections of [`GameRuntimeState`](crate::state::GameRuntimeState) touched by an action.
    ///
    /// Lets subscribers skip work for untouched sections without walking the
    /// change list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeSections: u16 {
        const CLOCK    = 1 << 0;
        const PRESSURE = 1 << 1;
        const WORLD    = 1 << 2;
        const PLAYER   = 1 << 3;
        const CARDS    = 1 << 4;
        const EVENTS   = 1 << 5;
        const QUESTS   = 1 << 6;
        const COMBAT   = 1 << 7;
        const ENDING   = 1 << 8;
    }
}

/// Ordered record of everything one committed action changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this state transition.
    pub action: GameAction,

    /// Nonce assigned to the action.
    pub nonce: u64,

    /// Day after the action completed.
    pub day: u32,

    /// Union of the sections touched by `changes`.
    pub sections: ChangeSections,

    /// Changes in emission order.
    pub changes: Vec<StateChange>,
}

impl StateDelta {
    pub fn new(action: GameAction, nonce: u64, day: u32, changes: Vec<StateChange>) -> Self {
        let sections = changes
            .iter()
            .fold(ChangeSections::empty(), |acc, change| acc | change.section());
        Self {
            action,
            nonce,
            day,
            sections,
            changes,
        }
    }

    /// Returns true if no state changes occurred (no-op action).
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn touches(&self, sections: ChangeSections) -> bool {
        self.sections.intersects(sections)
    }
}
