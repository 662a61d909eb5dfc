//! Fate deck and resonance-zone modifiers.

use crate::env::{Alignment, FateCardDefinition, FateKeyword, RandomSource, shuffle};
use crate::state::FateCardId;

use super::Track;

/// Draw, discard and exhaust piles. The end of `draw` is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateDeck {
    pub draw: Vec<FateCardId>,
    pub discard: Vec<FateCardId>,
    pub exhaust: Vec<FateCardId>,
}

impl FateDeck {
    /// Builds a shuffled deck.
    pub fn new(cards: Vec<FateCardId>, rng: &mut dyn RandomSource) -> Self {
        let mut draw = cards;
        shuffle(&mut draw, rng);
        Self {
            draw,
            ..Self::default()
        }
    }

    /// Pulls the top card, reshuffling the discard pile into the draw pile
    /// first when the draw pile is empty.
    pub fn draw(&mut self, rng: &mut dyn RandomSource) -> Option<FateCardId> {
        if self.draw.is_empty() && !self.discard.is_empty() {
            self.draw = std::mem::take(&mut self.discard);
            shuffle(&mut self.draw, rng);
        }
        self.draw.pop()
    }

    /// Puts a used card on the discard or exhaust pile.
    ///
    /// Only cards flagged `exhaust` in content are exhausted. Sacrifice draws
    /// no fate card; it exiles the sacrificed hand card instead.
    pub fn settle(&mut self, card: FateCardId, exhaust: bool) {
        if exhaust {
            self.exhaust.push(card);
        } else {
            self.discard.push(card);
        }
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len() + self.exhaust.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Band of world resonance that biases fate cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResonanceZone {
    DeepNav,
    Nav,
    Yav,
    Prav,
    DeepPrav,
}

impl ResonanceZone {
    pub const fn from_resonance(resonance: i32) -> Self {
        match resonance {
            i32::MIN..=-60 => Self::DeepNav,
            -59..=-20 => Self::Nav,
            -19..=19 => Self::Yav,
            20..=59 => Self::Prav,
            _ => Self::DeepPrav,
        }
    }

    pub const fn alignment(&self) -> Alignment {
        match self {
            Self::DeepNav | Self::Nav => Alignment::Nav,
            Self::Yav => Alignment::Yav,
            Self::Prav | Self::DeepPrav => Alignment::Prav,
        }
    }

    pub const fn is_deep(&self) -> bool {
        matches!(self, Self::DeepNav | Self::DeepPrav)
    }

    /// Adjustment for a card of `alignment` drawn in this zone.
    ///
    /// Aligned Nav/Prav cards gain 1 (2 in a deep zone), opposed ones lose the
    /// same. Yav cards and the Yav zone are neutral.
    pub fn adjustment(&self, alignment: Alignment) -> i32 {
        let zone = self.alignment().sign();
        let card = alignment.sign();
        if zone == 0 || card == 0 {
            return 0;
        }
        let magnitude = if self.is_deep() { 2 } else { 1 };
        if zone == card { magnitude } else { -magnitude }
    }
}

/// Fate contribution to one command's power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateModifier {
    pub value: i32,
    pub zone_adjustment: i32,
    pub keyword_adjustment: i32,
}

impl FateModifier {
    pub fn total(&self) -> i32 {
        self.value + self.zone_adjustment + self.keyword_adjustment
    }

    pub fn from_card(
        card: &FateCardDefinition,
        zone: ResonanceZone,
        track: Track,
        extends_streak: bool,
    ) -> Self {
        let keyword_adjustment = match card.keyword {
            Some(FateKeyword::Focus) if extends_streak => 2,
            Some(FateKeyword::Shadow) => match track {
                Track::Strike => 2,
                Track::Influence => -2,
            },
            _ => 0,
        };
        Self {
            value: card.value,
            zone_adjustment: zone.adjustment(card.alignment),
            keyword_adjustment,
        }
    }
}
