//! Per-day world tick run by the time step.

use crate::config::GameConfig;
use crate::env::ContentError;
use crate::state::StateChange;

use super::errors::{ExecuteError, PipelineStage, StageExt};
use super::pipeline::Pipeline;

impl Pipeline<'_, '_> {
    /// Everything that happens when `day` begins.
    ///
    /// Order: clock, pressure escalation with threshold effects, anchor decay
    /// and region degradation on escalation days, cooldowns, curse drains.
    pub(super) fn world_tick(&mut self, day: u32) -> Result<(), ExecuteError> {
        let mut pressure = self.reducer.state().world.pressure.clone();
        let tick = pressure.on_day(day, self.rules);

        self.reducer.emit(StateChange::DayAdvanced { day });

        if let Some(amount) = tick.escalated {
            self.reducer.emit(StateChange::PressureEscalated {
                day,
                amount,
                value: pressure.value,
            });
            for threshold in &tick.crossed {
                self.reducer.emit(StateChange::ThresholdCrossed {
                    threshold: *threshold,
                });
            }
            self.apply_threshold_effects(&tick.crossed)?;
            self.decay_anchors();
            self.degrade_regions();
        }

        self.tick_cooldowns();
        self.drain_curses()
    }

    fn decay_anchors(&mut self) {
        let decay = self.env.config().world.anchor_decay;
        let decayed: Vec<_> = self
            .reducer
            .state()
            .world
            .anchors
            .iter()
            .filter(|(_, anchor)| anchor.active)
            .map(|(id, anchor)| (id.clone(), (anchor.integrity - decay).max(0)))
            .collect();
        for (anchor, integrity) in decayed {
            self.reducer.emit(StateChange::AnchorChanged {
                anchor,
                integrity,
                active: integrity > 0,
            });
        }
    }

    fn degrade_regions(&mut self) {
        let world = &self.reducer.state().world;
        let degraded: Vec<_> = world
            .regions
            .iter()
            .filter(|(id, region)| {
                region.degradation < GameConfig::MAX_DEGRADATION && !world.is_anchored(id)
            })
            .map(|(id, region)| (id.clone(), region.degradation + 1))
            .collect();
        for (region, level) in degraded {
            self.reducer
                .emit(StateChange::RegionDegraded { region, level });
        }
    }

    fn tick_cooldowns(&mut self) {
        let cooldowns: Vec<_> = self
            .reducer
            .state()
            .events
            .cooldowns
            .iter()
            .map(|(event, remaining)| (event.clone(), remaining.saturating_sub(1)))
            .collect();
        for (event, remaining) in cooldowns {
            self.reducer
                .emit(StateChange::CooldownTicked { event, remaining });
        }
    }

    fn drain_curses(&mut self) -> Result<(), ExecuteError> {
        let content = self.env.content();
        let curses: Vec<_> = self.reducer.state().player.curses.iter().cloned().collect();
        for curse in curses {
            let definition = content
                .curse(&curse)
                .ok_or_else(|| ContentError::unknown("curse", &curse))
                .at(PipelineStage::Time)?;
            for (resource, amount) in &definition.daily_drain {
                self.reducer.adjust_resource(resource, -amount);
            }
        }
        Ok(())
    }
}
