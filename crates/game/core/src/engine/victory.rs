//! Step 9: campaign end detection.

use crate::env::{EndKind, EndPredicate};
use crate::state::{GameEnding, GameRuntimeState, QuestStatus, StateChange};

use super::pipeline::Pipeline;

/// Reason recorded when pressure reaches its maximum.
pub const PRESSURE_DEFEAT: &str = "pressure_overwhelming";
/// Reason recorded when the hero's health reaches zero.
pub const HEALTH_DEFEAT: &str = "hero_fallen";

impl Pipeline<'_, '_> {
    /// Ends the game when a built-in or content-defined predicate holds.
    ///
    /// Built-in defeats are checked first, then campaign conditions in
    /// declaration order.
    pub(super) fn check_ending(&mut self) {
        let state = self.reducer.state();
        if state.is_over() {
            return;
        }

        let ending = if state.world.pressure.is_terminal(self.rules) {
            Some((EndKind::Defeat, PRESSURE_DEFEAT))
        } else if !state.player.is_alive() {
            Some((EndKind::Defeat, HEALTH_DEFEAT))
        } else {
            self.env
                .content()
                .campaign()
                .end_conditions
                .iter()
                .find(|condition| predicate_holds(&condition.predicate, state))
                .map(|condition| (condition.kind, condition.reason.as_str()))
        };

        if let Some((kind, reason)) = ending {
            let ending = GameEnding {
                kind,
                reason: reason.to_owned(),
                day: state.day(),
            };
            self.reducer.emit(StateChange::GameEnded {
                ending: ending.clone(),
            });
            self.report.ending = Some(ending);
        }
    }
}

pub fn predicate_holds(predicate: &EndPredicate, state: &GameRuntimeState) -> bool {
    match predicate {
        EndPredicate::QuestCompleted(quest) => state.quests.status(quest) == QuestStatus::Completed,
        EndPredicate::PressureAtLeast(value) => state.world.pressure.value >= *value,
        EndPredicate::ResourceAtMost { resource, amount } => {
            state.player.resources.get(resource) <= *amount
        }
        EndPredicate::BalanceAtLeast(value) => state.player.balance >= *value,
        EndPredicate::BalanceAtMost(value) => state.player.balance <= *value,
        EndPredicate::DayReached(day) => state.day() >= *day,
        EndPredicate::FlagSet(flag) => state.has_flag(flag),
    }
}
