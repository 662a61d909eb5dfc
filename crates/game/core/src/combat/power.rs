use crate::config::GameConfig;

use super::MomentumBonus;

/// Every term of the effective-power formula for one command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerBreakdown {
    pub base_power: i32,
    pub surged_base: i32,
    pub streak_bonus: i32,
    pub threat_bonus: i32,
    pub switch_penalty: i32,
    pub fate_modifier: i32,
    pub raw_power: i32,
    pub effective_power: i32,
}

/// Computes effective power.
///
/// ```text
/// surged_base     = surge ? base_power * 3/2 : base_power
/// raw_power       = surged_base + streak_bonus + threat_bonus - switch_penalty + fate_modifier
/// effective_power = min(raw_power, 25)
/// ```
///
/// A negative raw power moves nothing and resolves as 0.
pub fn effective_power(
    base_power: i32,
    surge: bool,
    momentum: MomentumBonus,
    fate_modifier: i32,
) -> PowerBreakdown {
    let surged_base = if surge {
        base_power.saturating_mul(3) / 2
    } else {
        base_power
    };
    let raw_power = surged_base
        .saturating_add(momentum.streak_bonus)
        .saturating_add(momentum.threat_bonus)
        .saturating_sub(momentum.switch_penalty)
        .saturating_add(fate_modifier);
    PowerBreakdown {
        base_power,
        surged_base,
        streak_bonus: momentum.streak_bonus,
        threat_bonus: momentum.threat_bonus,
        switch_penalty: momentum.switch_penalty,
        fate_modifier,
        raw_power,
        effective_power: raw_power.min(GameConfig::MAX_EFFECTIVE_POWER).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_power_passes_through() {
        let power = effective_power(12, false, MomentumBonus::default(), 0);
        assert_eq!(power.effective_power, 12);
    }

    #[test]
    fn surge_scales_base_only() {
        let momentum = MomentumBonus {
            streak_bonus: 2,
            ..MomentumBonus::default()
        };
        let power = effective_power(10, true, momentum, 1);
        assert_eq!(power.surged_base, 15);
        assert_eq!(power.effective_power, 18);
    }

    #[test]
    fn capped_at_twenty_five() {
        let momentum = MomentumBonus {
            streak_bonus: 6,
            threat_bonus: 3,
            ..MomentumBonus::default()
        };
        let power = effective_power(40, true, momentum, 5);
        assert_eq!(power.raw_power, 74);
        assert_eq!(power.effective_power, 25);
    }

    #[test]
    fn negative_raw_power_resolves_as_zero() {
        let momentum = MomentumBonus {
            switch_penalty: 2,
            ..MomentumBonus::default()
        };
        let power = effective_power(0, false, momentum, -3);
        assert_eq!(power.raw_power, -5);
        assert_eq!(power.effective_power, 0);
    }
}
