//! Combat-related definitions: heroes, cards, fate cards, enemies, curses.

use std::collections::BTreeMap;

use crate::state::{CardId, CurseId, EnemyId, FateCardId, HeroId, ResourceId};

use super::Alignment;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroDefinition {
    pub id: HeroId,
    pub max_health: i32,
    /// Base power of a strike.
    pub strength: i32,
    /// Base power of an influence.
    pub will: i32,
    pub starting_resources: BTreeMap<ResourceId, i32>,
    pub resource_caps: BTreeMap<ResourceId, i32>,
    pub starting_deck: Vec<CardId>,
}

/// Player deck card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardDefinition {
    pub id: CardId,
    /// Added to the hero's base power when played with a strike or influence.
    pub power: i32,
    /// Health restored when the card is sacrificed.
    pub sacrifice_heal: i32,
    /// Attack bonus the enemy gains from a sacrifice.
    pub sacrifice_enemy_buff: i32,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FateKeyword {
    /// Base power ×3/2.
    Surge,
    /// The action replays once for free.
    Echo,
    /// +2 when the action extends a streak.
    Focus,
    /// +2 on strikes, -2 on influence.
    Shadow,
    /// Blocks the card's value from the next enemy attack.
    Ward,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FateCardDefinition {
    pub id: FateCardId,
    pub value: i32,
    pub alignment: Alignment,
    pub keyword: Option<FateKeyword>,
    /// Goes to the exhaust pile instead of discard after use.
    pub exhaust: bool,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IntentKind {
    Attack,
    Ritual,
    Block,
    Buff,
    Heal,
    Summon,
    Prepare,
    RestoreWp,
    Debuff,
    Defend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentDefinition {
    pub kind: IntentKind,
    pub value: i32,
}

impl IntentDefinition {
    pub const fn new(kind: IntentKind, value: i32) -> Self {
        Self { kind, value }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    /// Intent cycle, indexed by `(round - 1) % len`.
    pub pattern: Vec<IntentDefinition>,
    pub starting_disposition: i32,
    /// Overrides the configured resonance shift after a decisive combat.
    pub resonance_shift: Option<i32>,
    /// Resources granted on victory.
    pub reward: BTreeMap<ResourceId, i32>,
    /// Cards added to the player's discard pile on victory.
    pub loot: Vec<crate::state::CardId>,
}

impl EnemyDefinition {
    pub fn intent_for_round(&self, round: u32) -> Option<IntentDefinition> {
        if self.pattern.is_empty() || round == 0 {
            return None;
        }
        let index = ((round - 1) as usize) % self.pattern.len();
        Some(self.pattern[index])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurseDefinition {
    pub id: CurseId,
    /// Resources drained every day while the curse is active.
    pub daily_drain: BTreeMap<ResourceId, i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_cycles_by_round() {
        let enemy = EnemyDefinition {
            id: "wolf".into(),
            pattern: vec![
                IntentDefinition::new(IntentKind::Attack, 4),
                IntentDefinition::new(IntentKind::Block, 3),
            ],
            ..EnemyDefinition::default()
        };
        assert_eq!(enemy.intent_for_round(1).unwrap().kind, IntentKind::Attack);
        assert_eq!(enemy.intent_for_round(2).unwrap().kind, IntentKind::Block);
        assert_eq!(enemy.intent_for_round(3).unwrap().kind, IntentKind::Attack);
        assert_eq!(enemy.intent_for_round(0), None);
    }
}
