use super::{CardId, CardUid};

/// One physical card of the player's deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub uid: CardUid,
    pub card: CardId,
}

impl CardInstance {
    pub fn new(uid: CardUid, card: impl Into<CardId>) -> Self {
        Self {
            uid,
            card: card.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    Draw,
    Hand,
    Discard,
    Exile,
}

/// The four ordered card zones.
///
/// Every card instance lives in exactly one zone. The end of the draw pile is
/// its top. Exile is terminal: nothing moves a card out of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardZones {
    pub draw: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    pub exile: Vec<CardInstance>,
    next_uid: CardUid,
}

impl CardZones {
    pub fn new() -> Self {
        Self {
            next_uid: 1,
            ..Self::default()
        }
    }

    /// Mints a new instance of `card` on the discard pile.
    pub fn add_to_discard(&mut self, card: impl Into<CardId>) -> CardUid {
        let uid = self.allocate_uid();
        self.discard.push(CardInstance::new(uid, card));
        uid
    }

    /// Mints a new instance of `card` on top of the draw pile.
    pub fn add_to_draw(&mut self, card: impl Into<CardId>) -> CardUid {
        let uid = self.allocate_uid();
        self.draw.push(CardInstance::new(uid, card));
        uid
    }

    fn allocate_uid(&mut self) -> CardUid {
        let uid = self.next_uid.max(1);
        self.next_uid = uid.saturating_add(1);
        uid
    }

    pub fn zone(&self, zone: Zone) -> &[CardInstance] {
        match zone {
            Zone::Draw => &self.draw,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
            Zone::Exile => &self.exile,
        }
    }

    fn zone_mut(&mut self, zone: Zone) -> &mut Vec<CardInstance> {
        match zone {
            Zone::Draw => &mut self.draw,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
            Zone::Exile => &mut self.exile,
        }
    }

    /// Zone currently holding `uid`.
    pub fn locate(&self, uid: CardUid) -> Option<Zone> {
        [Zone::Draw, Zone::Hand, Zone::Discard, Zone::Exile]
            .into_iter()
            .find(|zone| self.zone(*zone).iter().any(|card| card.uid == uid))
    }

    pub fn in_hand(&self, uid: CardUid) -> Option<&CardInstance> {
        self.hand.iter().find(|card| card.uid == uid)
    }

    /// Moves `uid` from `from` to the end of `to`.
    ///
    /// Returns `false` (and changes nothing) when the card is not in `from`
    /// or when `from` is the exile zone.
    pub fn move_card(&mut self, uid: CardUid, from: Zone, to: Zone) -> bool {
        if from == Zone::Exile {
            return false;
        }
        let source = self.zone_mut(from);
        let Some(index) = source.iter().position(|card| card.uid == uid) else {
            return false;
        };
        let card = source.remove(index);
        self.zone_mut(to).push(card);
        true
    }

    /// Draws the top card of the draw pile into the hand.
    pub fn draw_one(&mut self) -> Option<CardUid> {
        let card = self.draw.pop()?;
        let uid = card.uid;
        self.hand.push(card);
        Some(uid)
    }

    /// Moves the discard pile under the draw pile, preserving discard order.
    pub fn recycle_discard(&mut self) -> usize {
        let count = self.discard.len();
        let mut recycled = std::mem::take(&mut self.discard);
        recycled.append(&mut self.draw);
        self.draw = recycled;
        count
    }

    /// Returns every card held in hand to the discard pile.
    pub fn discard_hand(&mut self) {
        let mut hand = std::mem::take(&mut self.hand);
        self.discard.append(&mut hand);
    }

    pub fn live_count(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }

    /// True when no card instance appears twice across zones.
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        [Zone::Draw, Zone::Hand, Zone::Discard, Zone::Exile]
            .into_iter()
            .flat_map(|zone| self.zone(zone).iter())
            .all(|card| seen.insert(card.uid))
    }
}
