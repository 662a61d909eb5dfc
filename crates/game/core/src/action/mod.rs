//! Player actions.
//!
//! A [`GameAction`] is the only input the engine accepts. Every action is
//! validated against the current state before anything is mutated; a rejected
//! action leaves the state untouched and consumes no nonce.

mod error;

pub use error::ActionError;

pub use crate::combat::CombatCommand;
pub use crate::resolver::ConflictOutcome;

use crate::state::{AnchorId, QuestId, RegionId};

/// Every action a player can take.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    /// Move to a neighboring region, paying its travel cost.
    Travel { region: RegionId },
    /// Search the current region; may discover neighbors and trigger an event.
    Explore,
    /// Spend time recovering health.
    Rest,
    /// Let days pass.
    Wait { days: u32 },
    /// Pick an option of the open event.
    ChooseEventOption { choice: usize },
    StartQuest { quest: QuestId },
    /// Reinforce an anchor in the current region.
    StrengthenAnchor { anchor: AnchorId },
    /// One round of the open combat.
    Combat(CombatCommand),
    /// Report the outcome of a challenge parked for an external resolver.
    ResolveChallenge(ConflictOutcome),
}

/// Discriminant of [`GameAction`], used for logging and metrics labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Travel,
    Explore,
    Rest,
    Wait,
    ChooseEventOption,
    StartQuest,
    StrengthenAnchor,
    Combat,
    ResolveChallenge,
}

impl GameAction {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Travel { .. } => ActionKind::Travel,
            Self::Explore => ActionKind::Explore,
            Self::Rest => ActionKind::Rest,
            Self::Wait { .. } => ActionKind::Wait,
            Self::ChooseEventOption { .. } => ActionKind::ChooseEventOption,
            Self::StartQuest { .. } => ActionKind::StartQuest,
            Self::StrengthenAnchor { .. } => ActionKind::StrengthenAnchor,
            Self::Combat(_) => ActionKind::Combat,
            Self::ResolveChallenge(_) => ActionKind::ResolveChallenge,
        }
    }

    /// True for actions that are legal while an event or challenge is open.
    pub const fn is_encounter_action(&self) -> bool {
        matches!(
            self,
            Self::ChooseEventOption { .. } | Self::Combat(_) | Self::ResolveChallenge(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_snake_case() {
        let action = GameAction::ChooseEventOption { choice: 1 };
        assert_eq!(action.kind().to_string(), "choose_event_option");
        assert_eq!(
            "strengthen_anchor".parse::<ActionKind>().unwrap(),
            ActionKind::StrengthenAnchor
        );
    }

    #[test]
    fn encounter_actions() {
        assert!(GameAction::Combat(CombatCommand::Strike { card: None }).is_encounter_action());
        assert!(!GameAction::Rest.is_encounter_action());
    }
}
