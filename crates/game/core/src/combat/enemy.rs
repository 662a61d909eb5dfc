//! Enemy behavior modes and intent execution.

use crate::config::CombatConfig;
use crate::env::{IntentDefinition, IntentKind};

use super::{Disposition, HeroCombatState};

/// Behavior mode, re-evaluated before every enemy turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EnemyMode {
    #[default]
    Normal,
    /// The last round swung disposition hard; every intent is halved.
    Weakened,
    /// Close to neutralization; aggressive intents hit harder.
    Survival,
    /// Close to subjugation; restorative intents are stronger.
    Desperation,
}

impl EnemyMode {
    /// Mode for the coming enemy turn. A large swing takes precedence.
    pub fn resolve(disposition: Disposition, swing: i32, config: &CombatConfig) -> Self {
        let value = disposition.value();
        if swing.abs() > config.weakened_band {
            Self::Weakened
        } else if value <= -config.survival_threshold {
            Self::Survival
        } else if value >= config.desperation_threshold {
            Self::Desperation
        } else {
            Self::Normal
        }
    }

    /// Intent value after this mode's scaling.
    pub fn scale(&self, intent: IntentDefinition) -> i32 {
        let value = intent.value;
        match self {
            Self::Normal => value,
            Self::Weakened => value / 2,
            Self::Survival => match intent.kind {
                IntentKind::Attack | IntentKind::Ritual | IntentKind::Summon => value * 3 / 2,
                _ => value,
            },
            Self::Desperation => match intent.kind {
                IntentKind::Heal | IntentKind::RestoreWp | IntentKind::Defend | IntentKind::Block => {
                    value * 3 / 2
                }
                _ => value,
            },
        }
    }
}

/// Persistent enemy-side modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStatus {
    pub mode: EnemyMode,
    /// Absorbs strike power.
    pub block: i32,
    /// Absorbs influence power.
    pub defend: i32,
    pub attack_bonus: i32,
    /// Damage dealt by summoned minions on every later enemy turn.
    pub summons: i32,
    /// Doubles the next attack.
    pub prepared: bool,
}

impl EnemyStatus {
    /// Consumes block against strike power, returning what gets through.
    pub fn absorb_strike(&mut self, power: i32) -> i32 {
        let absorbed = self.block.min(power).max(0);
        self.block -= absorbed;
        power - absorbed
    }

    /// Consumes defend against influence power, returning what gets through.
    pub fn absorb_influence(&mut self, power: i32) -> i32 {
        let absorbed = self.defend.min(power).max(0);
        self.defend -= absorbed;
        power - absorbed
    }
}

/// What the enemy did on its turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurn {
    pub intent: Option<IntentDefinition>,
    pub mode: EnemyMode,
    /// Intent value after mode scaling.
    pub value: i32,
    /// Health lost by the hero, summons included.
    pub hero_damage: i32,
    pub ward_absorbed: i32,
    pub summon_damage: i32,
}

/// Runs one enemy turn against `hero` and `disposition`.
pub fn act(
    intent: Option<IntentDefinition>,
    status: &mut EnemyStatus,
    hero: &mut HeroCombatState,
    disposition: &mut Disposition,
) -> EnemyTurn {
    let mut turn = EnemyTurn {
        intent,
        mode: status.mode,
        ..EnemyTurn::default()
    };

    if status.summons > 0 {
        turn.summon_damage = status.summons;
        turn.hero_damage += hero.take_damage(status.summons);
    }

    let Some(intent) = intent else {
        return turn;
    };
    let value = status.mode.scale(intent).max(0);
    turn.value = value;

    match intent.kind {
        IntentKind::Attack => {
            let mut damage = value + status.attack_bonus;
            if status.prepared {
                damage *= 2;
                status.prepared = false;
            }
            let absorbed = hero.ward.min(damage).max(0);
            hero.ward -= absorbed;
            turn.ward_absorbed = absorbed;
            turn.hero_damage += hero.take_damage(damage - absorbed);
        }
        IntentKind::Ritual => turn.hero_damage += hero.take_damage(value),
        IntentKind::Block => status.block += value,
        IntentKind::Buff => status.attack_bonus += value,
        IntentKind::Heal => {
            if disposition.value() < 0 {
                disposition.recover(value);
            }
        }
        IntentKind::Summon => status.summons += value,
        IntentKind::Prepare => status.prepared = true,
        IntentKind::RestoreWp => {
            if disposition.value() > 0 {
                disposition.recover(value);
            }
        }
        IntentKind::Debuff => hero.debuff += value,
        IntentKind::Defend => status.defend += value,
    }
    turn
}
