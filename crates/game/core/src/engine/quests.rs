//! Step 8: quest lifecycle.

use crate::env::QuestDefinition;
use crate::quest::{QuestTracker, QuestTransition};
use crate::state::{QuestStatus, StateChange};

use super::errors::ExecuteError;
use super::pipeline::Pipeline;

impl<'e> Pipeline<'e, '_> {
    /// Evaluates every quest until nothing moves.
    ///
    /// Completion consequences can unlock or advance other quests, so passes
    /// repeat; each pass that moves something moves at least one quest
    /// forward, which bounds the loop by the quest count.
    pub(super) fn tick_quests(&mut self) -> Result<(), ExecuteError> {
        let quests = self.env.content().quests();
        for _ in 0..=quests.len() {
            let mut moved = false;
            for quest in quests {
                let transitions = QuestTracker::evaluate(quest, self.reducer.state());
                moved |= !transitions.is_empty();
                for transition in transitions {
                    self.apply_quest_transition(quest, transition)?;
                }
            }
            if !moved {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn apply_quest_transition(
        &mut self,
        quest: &'e QuestDefinition,
        transition: QuestTransition,
    ) -> Result<(), ExecuteError> {
        let id = quest.id.clone();
        match transition {
            QuestTransition::Unlocked => self.set_status(id, QuestStatus::Available),
            QuestTransition::Started { objective } => {
                self.set_status(id.clone(), QuestStatus::Active);
                self.reducer.emit(StateChange::ObjectiveAssigned {
                    quest: id,
                    objective,
                });
            }
            QuestTransition::ObjectiveCompleted { objective, next } => {
                self.reducer.emit(StateChange::ObjectiveCompleted {
                    quest: id.clone(),
                    objective,
                });
                self.reducer.emit(StateChange::ObjectiveAssigned {
                    quest: id,
                    objective: next,
                });
            }
            QuestTransition::ObjectiveFailed { objective } => {
                self.reducer
                    .emit(StateChange::ObjectiveFailed { quest: id, objective });
            }
            QuestTransition::Completed => {
                self.set_status(id, QuestStatus::Completed);
                self.apply_consequences(&quest.on_complete)?;
            }
            QuestTransition::Failed => {
                self.set_status(id, QuestStatus::Failed);
                self.apply_consequences(&quest.on_fail)?;
            }
        }
        Ok(())
    }

    fn set_status(&mut self, quest: String, status: QuestStatus) {
        self.reducer
            .emit(StateChange::QuestStatusChanged { quest, status });
    }
}
