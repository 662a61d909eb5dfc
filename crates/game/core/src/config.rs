//! Game configuration constants and tunable parameters.
//!
//! Compile-time constants are hard limits of the simulation model. The
//! runtime-tunable sections are loaded from `config.toml` by the content crate
//! and fall back to the defaults below.

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub pressure: PressureConfig,
    pub combat: CombatConfig,
    pub time: TimeConfig,
    pub world: WorldConfig,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Upper bound of the world resonance axis (Prav). The lower bound is the negation.
    pub const RESONANCE_LIMIT: i32 = 100;
    /// Upper bound of the player balance axis. The lower bound is the negation.
    pub const BALANCE_LIMIT: i32 = 100;
    /// Disposition bound on either side.
    pub const DISPOSITION_LIMIT: i32 = 100;
    /// Hard cap on the power of a single strike or influence.
    pub const MAX_EFFECTIVE_POWER: i32 = 25;
    /// Maximum anchor integrity.
    pub const MAX_ANCHOR_INTEGRITY: i32 = 100;
    /// Maximum region degradation level (0 = stable).
    pub const MAX_DEGRADATION: u8 = 3;
    /// Resource id used for hero health.
    pub const HEALTH: &'static str = "health";

    pub fn new() -> Self {
        Self::default()
    }
}

/// Pressure escalation tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PressureConfig {
    /// Escalation applied on days 1-9; grows by one every ten days.
    pub base_amount: u32,
    /// Days between escalations.
    pub escalation_interval: u32,
    /// Maximum (terminal) pressure.
    pub max: u32,
    /// One-time thresholds, ascending.
    pub thresholds: Vec<u32>,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            base_amount: 3,
            escalation_interval: 3,
            max: 100,
            thresholds: vec![25, 50, 75, 100],
        }
    }
}

/// Combat tuning. The power cap is not tunable, see [`GameConfig::MAX_EFFECTIVE_POWER`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Bonus gained per repeated action on the same track.
    pub streak_step: i32,
    /// Maximum streak bonus.
    pub streak_cap: i32,
    /// Penalty for switching between strike and influence.
    pub switch_penalty: i32,
    /// Bonus for influencing right after a long attack streak.
    pub threat_bonus: i32,
    /// Attack streak length needed for the threat bonus.
    pub threat_streak: u32,
    /// Enemy enters Survival at or below `-survival_threshold`.
    pub survival_threshold: i32,
    /// Enemy enters Desperation at or above `desperation_threshold`.
    pub desperation_threshold: i32,
    /// Enemy is Weakened when one round moves disposition by more than this.
    pub weakened_band: i32,
    /// Cards drawn into hand when a combat opens.
    pub hand_size: usize,
    /// Magnitude of the world resonance shift after a decisive combat.
    pub resonance_shift: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            streak_step: 2,
            streak_cap: 6,
            switch_penalty: 2,
            threat_bonus: 3,
            threat_streak: 3,
            survival_threshold: 60,
            desperation_threshold: 60,
            weakened_band: 30,
            hand_size: 5,
            resonance_shift: 5,
        }
    }
}

/// Day costs of the basic actions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeConfig {
    pub explore_days: u32,
    pub rest_days: u32,
    pub strengthen_days: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            explore_days: 1,
            rest_days: 1,
            strengthen_days: 1,
        }
    }
}

/// World tick and mitigation tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Integrity lost by every active anchor on an escalation day.
    pub anchor_decay: i32,
    /// Integrity restored by strengthening an anchor.
    pub anchor_strengthen: i32,
    /// Pressure relieved by strengthening an anchor.
    pub anchor_relief: i32,
    /// Health restored by a rest.
    pub rest_heal: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            anchor_decay: 2,
            anchor_strengthen: 20,
            anchor_relief: 2,
            rest_heal: 3,
        }
    }
}
