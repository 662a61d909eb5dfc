//! Quest state machine.
//!
//! `Locked → Available → Active → {Completed, Failed}`. The tracker is pure:
//! it inspects state and returns the transitions that should happen, and the
//! engine turns them into state changes.

use crate::env::{ObjectiveDefinition, ObjectiveGoal, QuestCondition, QuestDefinition};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameRuntimeState, ObjectiveId, QuestId, QuestProgress, QuestStatus};

/// One step of a quest's lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestTransition {
    Unlocked,
    Started { objective: Option<ObjectiveId> },
    ObjectiveCompleted { objective: ObjectiveId, next: Option<ObjectiveId> },
    ObjectiveFailed { objective: ObjectiveId },
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("quest '{quest}' cannot start from {status}")]
    NotAvailable { quest: QuestId, status: QuestStatus },
}

impl GameError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "QUEST_NOT_AVAILABLE"
    }
}

/// Stateless quest evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuestTracker;

impl QuestTracker {
    /// Transitions for `quest` given the current state.
    ///
    /// A locked quest whose unlock predicate holds becomes available (and
    /// active when `auto_start` is set). An active quest first checks its
    /// current objective's failure gate, then chains objective completions
    /// until one is still open or the quest completes.
    pub fn evaluate(quest: &QuestDefinition, state: &GameRuntimeState) -> Vec<QuestTransition> {
        let progress = state.quests.get(&quest.id);
        let status = progress.map(|p| p.status).unwrap_or_default();
        let mut transitions = Vec::new();

        let current = match status {
            QuestStatus::Locked => {
                if !Self::is_unlocked(&quest.unlock, state) {
                    return transitions;
                }
                transitions.push(QuestTransition::Unlocked);
                if !quest.auto_start {
                    return transitions;
                }
                let first = quest.objectives.first().map(|o| o.id.clone());
                transitions.push(QuestTransition::Started {
                    objective: first.clone(),
                });
                first
            }
            QuestStatus::Active => progress.and_then(|p| p.current_objective.clone()),
            QuestStatus::Available | QuestStatus::Completed | QuestStatus::Failed => {
                return transitions;
            }
        };

        let empty = QuestProgress::default();
        let progress = progress.unwrap_or(&empty);
        let mut current = current;
        // Bounded by the objective count so an explicit `next` cycle cannot spin.
        for _ in 0..=quest.objectives.len() {
            let Some(objective) = current.as_deref().and_then(|id| quest.objective(id)) else {
                transitions.push(QuestTransition::Completed);
                return transitions;
            };
            if Self::has_failed(objective, progress, state) {
                transitions.push(QuestTransition::ObjectiveFailed {
                    objective: objective.id.clone(),
                });
                transitions.push(QuestTransition::Failed);
                return transitions;
            }
            if !Self::is_met(&objective.complete_when, progress, state) {
                return transitions;
            }
            let next = quest.next_objective(&objective.id).map(|o| o.id.clone());
            transitions.push(QuestTransition::ObjectiveCompleted {
                objective: objective.id.clone(),
                next: next.clone(),
            });
            current = next;
        }
        transitions
    }

    /// Explicit start of an available quest. Returns the first objective.
    pub fn start(
        quest: &QuestDefinition,
        state: &GameRuntimeState,
    ) -> Result<QuestTransition, QuestError> {
        let status = state.quests.status(&quest.id);
        if status != QuestStatus::Available {
            return Err(QuestError::NotAvailable {
                quest: quest.id.clone(),
                status,
            });
        }
        Ok(QuestTransition::Started {
            objective: quest.objectives.first().map(|o| o.id.clone()),
        })
    }

    /// New value of counter `key` after adding `amount`.
    ///
    /// Counters only move for active quests; `None` means the increment is ignored.
    pub fn increment_progress(
        quest: &str,
        key: &str,
        amount: i32,
        state: &GameRuntimeState,
    ) -> Option<i32> {
        let progress = state.quests.get(quest)?;
        (progress.status == QuestStatus::Active)
            .then(|| progress.counter(key).saturating_add(amount))
    }

    pub fn is_unlocked(condition: &QuestCondition, state: &GameRuntimeState) -> bool {
        let pressure = state.world.pressure.value;
        let balance = state.player.balance;
        condition.required_flags.iter().all(|f| state.has_flag(f))
            && !condition.forbidden_flags.iter().any(|f| state.has_flag(f))
            && condition.min_pressure.is_none_or(|min| pressure >= min)
            && condition.max_pressure.is_none_or(|max| pressure <= max)
            && condition.min_balance.is_none_or(|min| balance >= min)
            && condition.max_balance.is_none_or(|max| balance <= max)
            && condition
                .visited_regions
                .iter()
                .all(|region| state.world.has_visited(region))
    }

    fn is_met(goal: &ObjectiveGoal, progress: &QuestProgress, state: &GameRuntimeState) -> bool {
        goal.flags
            .iter()
            .all(|flag| state.has_flag(flag) || progress.flags.contains(flag))
            && goal
                .visited_region
                .as_deref()
                .is_none_or(|region| state.world.has_visited(region))
            && goal
                .progress
                .as_ref()
                .is_none_or(|target| progress.counter(&target.key) >= target.target)
    }

    fn has_failed(
        objective: &ObjectiveDefinition,
        progress: &QuestProgress,
        state: &GameRuntimeState,
    ) -> bool {
        let Some(failure) = &objective.fail_when else {
            return false;
        };
        let flagged = failure
            .flag
            .as_deref()
            .is_some_and(|flag| state.has_flag(flag) || progress.flags.contains(flag));
        let overdue = failure.deadline_day.is_some_and(|day| state.day() > day);
        flagged || overdue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ObjectiveFailure, ProgressTarget};

    fn state() -> GameRuntimeState {
        GameRuntimeState {
            seed: 0,
            nonce: 0,
            rng: crate::env::PcgRng::from_seed(0),
            world: Default::default(),
            player: Default::default(),
            events: Default::default(),
            quests: Default::default(),
            ending: None,
        }
    }

    fn objective(id: &str, goal: ObjectiveGoal) -> ObjectiveDefinition {
        ObjectiveDefinition {
            id: id.into(),
            complete_when: goal,
            ..ObjectiveDefinition::default()
        }
    }

    fn hunt() -> QuestDefinition {
        QuestDefinition {
            id: "hunt".into(),
            unlock: QuestCondition {
                required_flags: vec!["rumor".into()],
                ..QuestCondition::default()
            },
            objectives: vec![
                objective(
                    "track",
                    ObjectiveGoal {
                        flags: vec!["tracks_found".into()],
                        ..ObjectiveGoal::default()
                    },
                ),
                objective(
                    "slay",
                    ObjectiveGoal {
                        progress: Some(ProgressTarget {
                            key: "kills".into(),
                            target: 2,
                        }),
                        ..ObjectiveGoal::default()
                    },
                ),
            ],
            ..QuestDefinition::default()
        }
    }

    fn activate(state: &mut GameRuntimeState, objective: &str) {
        let progress = state.quests.entry("hunt");
        progress.status = QuestStatus::Active;
        progress.current_objective = Some(objective.into());
    }

    #[test]
    fn locked_until_predicate_holds() {
        let mut state = state();
        assert!(QuestTracker::evaluate(&hunt(), &state).is_empty());
        state.world.flags.insert("rumor".into());
        assert_eq!(
            QuestTracker::evaluate(&hunt(), &state),
            vec![QuestTransition::Unlocked]
        );
    }

    #[test]
    fn auto_start_assigns_first_objective() {
        let mut state = state();
        state.world.flags.insert("rumor".into());
        let quest = QuestDefinition {
            auto_start: true,
            ..hunt()
        };
        assert_eq!(
            QuestTracker::evaluate(&quest, &state),
            vec![
                QuestTransition::Unlocked,
                QuestTransition::Started {
                    objective: Some("track".into())
                }
            ]
        );
    }

    #[test]
    fn start_requires_available() {
        let mut state = state();
        assert!(QuestTracker::start(&hunt(), &state).is_err());
        state.quests.entry("hunt").status = QuestStatus::Available;
        assert_eq!(
            QuestTracker::start(&hunt(), &state).unwrap(),
            QuestTransition::Started {
                objective: Some("track".into())
            }
        );
    }

    #[test]
    fn objectives_chain_to_completion() {
        let mut state = state();
        activate(&mut state, "track");
        state.world.flags.insert("tracks_found".into());
        state.quests.entry("hunt").counters.insert("kills".into(), 2);
        assert_eq!(
            QuestTracker::evaluate(&hunt(), &state),
            vec![
                QuestTransition::ObjectiveCompleted {
                    objective: "track".into(),
                    next: Some("slay".into())
                },
                QuestTransition::ObjectiveCompleted {
                    objective: "slay".into(),
                    next: None
                },
                QuestTransition::Completed,
            ]
        );
    }

    #[test]
    fn progress_gate_holds_objective_open() {
        let mut state = state();
        activate(&mut state, "slay");
        assert_eq!(QuestTracker::increment_progress("hunt", "kills", 1, &state), Some(1));
        state.quests.entry("hunt").counters.insert("kills".into(), 1);
        assert!(QuestTracker::evaluate(&hunt(), &state).is_empty());
    }

    #[test]
    fn deadline_fails_quest() {
        let mut state = state();
        let mut quest = hunt();
        quest.objectives[0].fail_when = Some(ObjectiveFailure {
            deadline_day: Some(2),
            ..ObjectiveFailure::default()
        });
        activate(&mut state, "track");
        state.world.clock = crate::time::TimeEngine::at(3);
        assert_eq!(
            QuestTracker::evaluate(&quest, &state),
            vec![
                QuestTransition::ObjectiveFailed {
                    objective: "track".into()
                },
                QuestTransition::Failed
            ]
        );
    }

    #[test]
    fn counters_ignore_inactive_quests() {
        let state = state();
        assert_eq!(QuestTracker::increment_progress("hunt", "kills", 1, &state), None);
    }
}
