//! Systemic pressure: a bounded, escalating threat value.
//!
//! Escalation is driven once per day by the world tick. The rule set is a
//! trait so campaigns can swap the ramp; [`DefaultPressureRules`] implements the
//! stepwise formula `base_amount + day / 10` on every `escalation_interval`-th day.

use std::collections::BTreeSet;

use crate::config::PressureConfig;
use crate::time::TimeEngine;

/// Pluggable pressure formulas.
pub trait PressureRules: Send + Sync {
    /// Days between escalations.
    fn escalation_interval(&self) -> u32;

    /// Escalation amount applied on `day`.
    fn escalation_amount(&self, day: u32) -> u32;

    /// Maximum (terminal) pressure.
    fn max(&self) -> u32;

    /// One-time thresholds, ascending.
    fn thresholds(&self) -> &[u32];
}

/// Stepwise ramp configured by [`PressureConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultPressureRules {
    config: PressureConfig,
}

impl DefaultPressureRules {
    pub fn new(config: PressureConfig) -> Self {
        let mut config = config;
        config.thresholds.sort_unstable();
        config.thresholds.dedup();
        Self { config }
    }
}

impl PressureRules for DefaultPressureRules {
    fn escalation_interval(&self) -> u32 {
        self.config.escalation_interval
    }

    fn escalation_amount(&self, day: u32) -> u32 {
        self.config.base_amount.saturating_add(day / 10)
    }

    fn max(&self) -> u32 {
        self.config.max
    }

    fn thresholds(&self) -> &[u32] {
        &self.config.thresholds
    }
}

/// Pressure value plus the ratchet of thresholds that already fired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureState {
    pub value: u32,
    pub triggered: BTreeSet<u32>,
    pub days_since_escalation: u32,
}

/// What one day did to pressure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PressureTick {
    /// Escalation amount when the day was an escalation day.
    pub escalated: Option<u32>,
    /// Thresholds crossed for the first time, ascending.
    pub crossed: Vec<u32>,
}

impl PressureState {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Applies a signed adjustment clamped to `[0, max]`.
    ///
    /// Returns the thresholds newly crossed. Lowering pressure never clears a
    /// triggered threshold.
    pub fn adjust(&mut self, delta: i32, rules: &dyn PressureRules) -> Vec<u32> {
        let target = i64::from(self.value) + i64::from(delta);
        self.value = target.clamp(0, i64::from(rules.max())) as u32;
        self.collect_crossed(rules)
    }

    /// Runs the daily step for `day`.
    pub fn on_day(&mut self, day: u32, rules: &dyn PressureRules) -> PressureTick {
        self.days_since_escalation = self.days_since_escalation.saturating_add(1);
        if !TimeEngine::at(day).check_threshold(rules.escalation_interval()) {
            return PressureTick::default();
        }
        let amount = rules.escalation_amount(day);
        self.days_since_escalation = 0;
        let crossed = self.adjust(amount.min(i32::MAX as u32) as i32, rules);
        PressureTick {
            escalated: Some(amount),
            crossed,
        }
    }

    /// Marks every threshold implied by the current value as triggered.
    ///
    /// Used after loading a persisted value so thresholds already implied by
    /// it do not fire again. Thresholds already in the set stay, so the
    /// ratchet survives pressure that was lowered before saving.
    pub fn sync_triggered_thresholds_from_pressure(&mut self, rules: &dyn PressureRules) {
        let value = self.value;
        self.triggered.extend(
            rules
                .thresholds()
                .iter()
                .copied()
                .filter(|threshold| value >= *threshold),
        );
    }

    pub fn is_terminal(&self, rules: &dyn PressureRules) -> bool {
        self.value >= rules.max()
    }

    fn collect_crossed(&mut self, rules: &dyn PressureRules) -> Vec<u32> {
        let mut crossed = Vec::new();
        for threshold in rules.thresholds() {
            if self.value >= *threshold && self.triggered.insert(*threshold) {
                crossed.push(*threshold);
            }
        }
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> DefaultPressureRules {
        DefaultPressureRules::new(PressureConfig::default())
    }

    #[test]
    fn ramp_is_stepwise() {
        let rules = rules();
        assert_eq!(rules.escalation_amount(5), 3);
        assert_eq!(rules.escalation_amount(15), 4);
        assert_eq!(rules.escalation_amount(25), 5);
    }

    #[test]
    fn adjust_clamps_both_ends() {
        let rules = rules();
        let mut pressure = PressureState::new(10);
        pressure.adjust(-50, &rules);
        assert_eq!(pressure.value, 0);
        pressure.adjust(500, &rules);
        assert_eq!(pressure.value, 100);
    }

    #[test]
    fn escalates_only_on_interval_days() {
        let rules = rules();
        let mut pressure = PressureState::default();
        assert_eq!(pressure.on_day(1, &rules).escalated, None);
        assert_eq!(pressure.on_day(2, &rules).escalated, None);
        assert_eq!(pressure.days_since_escalation, 2);
        assert_eq!(pressure.on_day(3, &rules).escalated, Some(3));
        assert_eq!(pressure.value, 3);
        assert_eq!(pressure.days_since_escalation, 0);
    }

    #[test]
    fn thresholds_fire_once() {
        let rules = rules();
        let mut pressure = PressureState::new(20);
        assert_eq!(pressure.adjust(10, &rules), vec![25]);
        pressure.adjust(-20, &rules);
        assert!(pressure.triggered.contains(&25));
        assert!(pressure.adjust(20, &rules).is_empty());
    }

    #[test]
    fn sync_rebuilds_from_value() {
        let rules = rules();
        let mut pressure = PressureState::new(60);
        pressure.sync_triggered_thresholds_from_pressure(&rules);
        assert_eq!(pressure.triggered.iter().copied().collect::<Vec<_>>(), vec![25, 50]);
        assert_eq!(pressure.adjust(10, &rules), Vec::<u32>::new());
        assert_eq!(pressure.adjust(10, &rules), vec![75]);
    }

    #[test]
    fn sync_matches_escalating_from_zero() {
        let rules = rules();
        for target in [0, 24, 25, 49, 50, 74, 75, 99, 100] {
            let mut escalated = PressureState::default();
            for _ in 0..target {
                escalated.adjust(1, &rules);
            }

            let mut loaded = PressureState::new(target);
            loaded.sync_triggered_thresholds_from_pressure(&rules);

            assert_eq!(loaded.value, escalated.value);
            assert_eq!(loaded.triggered, escalated.triggered, "pressure {target}");
        }
    }

    #[test]
    fn sync_keeps_thresholds_fired_before_a_drop() {
        let rules = rules();
        let mut pressure = PressureState::new(10);
        pressure.triggered.insert(50);
        pressure.sync_triggered_thresholds_from_pressure(&rules);
        assert_eq!(pressure.triggered.iter().copied().collect::<Vec<_>>(), vec![50]);
    }
}
