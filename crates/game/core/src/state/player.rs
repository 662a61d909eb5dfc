use std::collections::BTreeSet;

use crate::config::GameConfig;

use super::{CardZones, CurseId, Flag, HeroId, Resources};

/// Runtime state of the player character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub hero: HeroId,
    pub resources: Resources,
    /// Player balance on the Nav (-) / Prav (+) axis.
    pub balance: i32,
    pub cards: CardZones,
    pub curses: BTreeSet<CurseId>,
    pub flags: BTreeSet<Flag>,
}

impl PlayerState {
    pub fn health(&self) -> i32 {
        self.resources.get(GameConfig::HEALTH)
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0
    }

    pub fn clamp_balance(value: i32) -> i32 {
        value.clamp(-GameConfig::BALANCE_LIMIT, GameConfig::BALANCE_LIMIT)
    }
}
