//! Application of declarative [`Consequences`].

use crate::config::GameConfig;
use crate::env::{Consequences, ContentError};
use crate::quest::QuestTracker;
use crate::state::StateChange;

use super::errors::{ExecuteError, PipelineStage, StageExt};
use super::pipeline::Pipeline;

impl Pipeline<'_, '_> {
    /// Applies every delta of `consequences` in field order.
    pub(super) fn apply_consequences(
        &mut self,
        consequences: &Consequences,
    ) -> Result<(), ExecuteError> {
        let content = self.env.content();

        for (resource, delta) in &consequences.resources {
            self.reducer.adjust_resource(resource, *delta);
        }
        for flag in &consequences.set_flags {
            self.reducer.set_flag(flag);
        }
        for flag in &consequences.clear_flags {
            self.reducer.clear_flag(flag);
        }
        for flag in &consequences.set_player_flags {
            self.reducer.set_player_flag(flag);
        }
        if !consequences.set_region_flags.is_empty() {
            let region = self.reducer.state().world.current_region.clone();
            for flag in &consequences.set_region_flags {
                let present = self
                    .reducer
                    .state()
                    .world
                    .region(&region)
                    .is_some_and(|state| state.flags.contains(flag));
                if !present {
                    self.reducer.emit(StateChange::RegionFlagSet {
                        region: region.clone(),
                        flag: flag.clone(),
                    });
                }
            }
        }
        if consequences.pressure != 0 {
            self.adjust_pressure(consequences.pressure)?;
        }
        self.reducer.adjust_balance(consequences.balance);
        self.reducer.adjust_resonance(consequences.resonance);

        for progress in &consequences.quest_progress {
            let value = QuestTracker::increment_progress(
                &progress.quest,
                &progress.key,
                progress.amount,
                self.reducer.state(),
            );
            if let Some(value) = value {
                self.reducer.emit(StateChange::QuestCounterChanged {
                    quest: progress.quest.clone(),
                    key: progress.key.clone(),
                    value,
                });
            }
        }
        for raised in &consequences.quest_flags {
            self.reducer.emit(StateChange::QuestFlagSet {
                quest: raised.quest.clone(),
                flag: raised.flag.clone(),
            });
        }

        for card in &consequences.add_cards {
            content
                .card(card)
                .ok_or_else(|| ContentError::unknown("card", card))
                .at(PipelineStage::Consequences)?;
            self.reducer
                .emit(StateChange::CardGained { card: card.clone() });
        }
        for curse in &consequences.add_curses {
            content
                .curse(curse)
                .ok_or_else(|| ContentError::unknown("curse", curse))
                .at(PipelineStage::Consequences)?;
            if !self.reducer.state().player.curses.contains(curse) {
                self.reducer
                    .emit(StateChange::CurseAdded { curse: curse.clone() });
            }
        }
        for curse in &consequences.remove_curses {
            if self.reducer.state().player.curses.contains(curse) {
                self.reducer
                    .emit(StateChange::CurseRemoved { curse: curse.clone() });
            }
        }

        for (anchor, delta) in &consequences.anchors {
            let integrity = self
                .reducer
                .state()
                .world
                .anchors
                .get(anchor)
                .map(|state| state.integrity)
                .ok_or_else(|| ContentError::unknown("anchor", anchor))
                .at(PipelineStage::Consequences)?;
            let integrity = integrity
                .saturating_add(*delta)
                .clamp(0, GameConfig::MAX_ANCHOR_INTEGRITY);
            self.reducer.emit(StateChange::AnchorChanged {
                anchor: anchor.clone(),
                integrity,
                active: integrity > 0,
            });
        }
        Ok(())
    }

    /// Signed pressure adjustment with threshold effects.
    pub(super) fn adjust_pressure(&mut self, delta: i32) -> Result<(), ExecuteError> {
        let mut pressure = self.reducer.state().world.pressure.clone();
        let before = pressure.value;
        let crossed = pressure.adjust(delta, self.rules);
        if pressure.value != before {
            self.reducer.emit(StateChange::PressureAdjusted {
                delta,
                value: pressure.value,
            });
        }
        for threshold in &crossed {
            self.reducer.emit(StateChange::ThresholdCrossed {
                threshold: *threshold,
            });
        }
        self.apply_threshold_effects(&crossed)
    }

    /// Campaign effects of thresholds crossed for the first time.
    ///
    /// Terminates because thresholds ratchet: each fires at most once.
    pub(super) fn apply_threshold_effects(&mut self, crossed: &[u32]) -> Result<(), ExecuteError> {
        let campaign = self.env.content().campaign();
        for threshold in crossed {
            if let Some(effects) = campaign.threshold_effects.get(threshold) {
                self.apply_consequences(effects)?;
            }
        }
        Ok(())
    }
}
