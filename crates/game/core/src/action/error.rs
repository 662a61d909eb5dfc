//! Action rejection errors.

use crate::combat::CombatError;
use crate::event::ChoiceError;
use crate::error::{ErrorSeverity, GameError};
use crate::quest::QuestError;
use crate::state::{AnchorId, QuestId, RegionId};

/// Why an action was rejected. Rejections never mutate state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game has ended")]
    GameOver,

    #[error("the hero cannot act")]
    Incapacitated,

    #[error("an event or challenge is in progress")]
    Busy,

    #[error("no event is open")]
    NoActiveEvent,

    #[error("no combat is in progress")]
    NoActiveCombat,

    #[error("no challenge is waiting for an external resolver")]
    NotAwaitingResolver,

    #[error("unknown region '{0}'")]
    UnknownRegion(RegionId),

    #[error("'{to}' is not reachable from '{from}'")]
    NotAdjacent { from: RegionId, to: RegionId },

    #[error("wait requires at least one day")]
    ZeroDays,

    #[error("unknown quest '{0}'")]
    UnknownQuest(QuestId),

    #[error("anchor '{0}' is not in the current region")]
    AnchorNotHere(AnchorId),

    #[error(transparent)]
    Choice(#[from] ChoiceError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Combat(CombatError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Choice(error) => error.severity(),
            Self::Quest(error) => error.severity(),
            Self::Combat(error) => error.severity(),
            Self::Busy | Self::NoActiveEvent | Self::NoActiveCombat | Self::NotAwaitingResolver => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "ACTION_GAME_OVER",
            Self::Incapacitated => "ACTION_INCAPACITATED",
            Self::Busy => "ACTION_BUSY",
            Self::NoActiveEvent => "ACTION_NO_ACTIVE_EVENT",
            Self::NoActiveCombat => "ACTION_NO_ACTIVE_COMBAT",
            Self::NotAwaitingResolver => "ACTION_NOT_AWAITING_RESOLVER",
            Self::UnknownRegion(_) => "ACTION_UNKNOWN_REGION",
            Self::NotAdjacent { .. } => "ACTION_NOT_ADJACENT",
            Self::ZeroDays => "ACTION_ZERO_DAYS",
            Self::UnknownQuest(_) => "ACTION_UNKNOWN_QUEST",
            Self::AnchorNotHere(_) => "ACTION_ANCHOR_NOT_HERE",
            Self::Choice(error) => error.error_code(),
            Self::Quest(error) => error.error_code(),
            Self::Combat(error) => error.error_code(),
        }
    }
}
