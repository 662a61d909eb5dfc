//! Id-keyed content registry.
//!
//! Definitions are loaded once and never embedded in runtime state; state
//! refers to them by id and resolves them through [`ContentOracle`].

use std::collections::BTreeMap;

use super::{
    AnchorDefinition, CampaignDefinition, CardDefinition, ChallengeDefinition, Consequences,
    ContentError, CurseDefinition, EndPredicate, EnemyDefinition, EventDefinition,
    FateCardDefinition, HeroDefinition, QuestDefinition, RegionDefinition,
};

/// Read-only access to static content.
pub trait ContentOracle: Send + Sync {
    fn campaign(&self) -> &CampaignDefinition;

    fn regions(&self) -> &[RegionDefinition];
    fn region(&self, id: &str) -> Option<&RegionDefinition>;

    fn anchors(&self) -> &[AnchorDefinition];
    fn anchor(&self, id: &str) -> Option<&AnchorDefinition>;

    /// Events in declaration order (selection walks this order).
    fn events(&self) -> &[EventDefinition];
    fn event(&self, id: &str) -> Option<&EventDefinition>;

    /// Quests in declaration order (the quest tick walks this order).
    fn quests(&self) -> &[QuestDefinition];
    fn quest(&self, id: &str) -> Option<&QuestDefinition>;

    fn hero(&self, id: &str) -> Option<&HeroDefinition>;
    fn card(&self, id: &str) -> Option<&CardDefinition>;
    fn fate_card(&self, id: &str) -> Option<&FateCardDefinition>;
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition>;
    fn curse(&self, id: &str) -> Option<&CurseDefinition>;
}

/// Definition types stored in a [`Registry`].
pub trait Definition {
    const KIND: &'static str;

    fn id(&self) -> &str;
}

macro_rules! impl_definition {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(impl Definition for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_definition! {
    RegionDefinition => "region",
    AnchorDefinition => "anchor",
    EventDefinition => "event",
    QuestDefinition => "quest",
    HeroDefinition => "hero",
    CardDefinition => "card",
    FateCardDefinition => "fate card",
    EnemyDefinition => "enemy",
    CurseDefinition => "curse",
}

/// Arena of definitions in insertion order with an id index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry<T> {
    items: Vec<T>,
    index: BTreeMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T: Definition> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, rejecting duplicate ids.
    pub fn insert(&mut self, item: T) -> Result<(), ContentError> {
        let id = item.id().to_owned();
        if id.is_empty() {
            return Err(ContentError::invalid(T::KIND, "definition has an empty id"));
        }
        if self.index.contains_key(&id) {
            return Err(ContentError::DuplicateId { kind: T::KIND, id });
        }
        self.index.insert(id, self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|index| &self.items[*index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Definition> FromIterator<T> for Registry<T> {
    /// Collects definitions; later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        for item in iter {
            let _ = registry.insert(item);
        }
        registry
    }
}

/// Concrete [`ContentOracle`] backed by one registry per definition kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentRegistry {
    pub campaign: CampaignDefinition,
    pub regions: Registry<RegionDefinition>,
    pub anchors: Registry<AnchorDefinition>,
    pub events: Registry<EventDefinition>,
    pub quests: Registry<QuestDefinition>,
    pub heroes: Registry<HeroDefinition>,
    pub cards: Registry<CardDefinition>,
    pub fate_cards: Registry<FateCardDefinition>,
    pub enemies: Registry<EnemyDefinition>,
    pub curses: Registry<CurseDefinition>,
}

impl ContentRegistry {
    pub fn new(campaign: CampaignDefinition) -> Self {
        Self {
            campaign,
            ..Self::default()
        }
    }

    /// Checks every cross-reference in the pack.
    ///
    /// Called once after loading; the engine relies on a validated registry
    /// and reports any id that still fails to resolve as a [`ContentError`].
    pub fn validate(&self) -> Result<(), ContentError> {
        self.validate_campaign()?;

        for region in self.regions.as_slice() {
            for neighbor in &region.neighbors {
                self.require(&self.regions, &region.id, neighbor)?;
            }
            if let Some(anchor) = &region.anchor {
                self.require(&self.anchors, &region.id, anchor)?;
            }
            if region.travel_days == 0 {
                return Err(ContentError::invalid(&region.id, "travel_days must be at least 1"));
            }
        }

        for anchor in self.anchors.as_slice() {
            self.require(&self.regions, &anchor.id, &anchor.region)?;
        }

        for event in self.events.as_slice() {
            for region in &event.regions {
                self.require(&self.regions, &event.id, region)?;
            }
            if event.min_pressure > event.max_pressure {
                return Err(ContentError::invalid(&event.id, "empty pressure range"));
            }
            if let Some(challenge) = &event.challenge {
                self.validate_challenge(&event.id, challenge)?;
            }
            for choice in &event.choices {
                self.validate_consequences(&event.id, &choice.consequences)?;
                if let Some(challenge) = &choice.challenge {
                    self.validate_challenge(&event.id, challenge)?;
                }
            }
        }

        for quest in self.quests.as_slice() {
            for region in &quest.unlock.visited_regions {
                self.require(&self.regions, &quest.id, region)?;
            }
            for objective in &quest.objectives {
                if let Some(next) = &objective.next {
                    if quest.objective(next).is_none() {
                        return Err(ContentError::dangling(&quest.id, "objective", next));
                    }
                }
                if let Some(region) = &objective.complete_when.visited_region {
                    self.require(&self.regions, &quest.id, region)?;
                }
            }
            self.validate_consequences(&quest.id, &quest.on_complete)?;
            self.validate_consequences(&quest.id, &quest.on_fail)?;
        }

        for hero in self.heroes.as_slice() {
            for card in &hero.starting_deck {
                self.require(&self.cards, &hero.id, card)?;
            }
        }

        for enemy in self.enemies.as_slice() {
            if enemy.pattern.is_empty() {
                return Err(ContentError::invalid(&enemy.id, "enemy pattern is empty"));
            }
            for card in &enemy.loot {
                self.require(&self.cards, &enemy.id, card)?;
            }
        }

        Ok(())
    }

    fn validate_campaign(&self) -> Result<(), ContentError> {
        let owner = format!("campaign '{}'", self.campaign.id);
        self.require(&self.heroes, &owner, &self.campaign.hero)?;
        self.require(&self.regions, &owner, &self.campaign.start_region)?;
        for card in &self.campaign.fate_deck {
            self.require(&self.fate_cards, &owner, card)?;
        }
        for consequences in self.campaign.threshold_effects.values() {
            self.validate_consequences(&owner, consequences)?;
        }
        for condition in &self.campaign.end_conditions {
            if let EndPredicate::QuestCompleted(quest) = &condition.predicate {
                self.require(&self.quests, &owner, quest)?;
            }
        }
        Ok(())
    }

    fn validate_challenge(
        &self,
        owner: &str,
        challenge: &ChallengeDefinition,
    ) -> Result<(), ContentError> {
        if challenge.kind == ChallengeDefinition::COMBAT {
            match &challenge.enemy {
                Some(enemy) => self.require(&self.enemies, owner, enemy)?,
                None => return Err(ContentError::invalid(owner, "combat challenge has no enemy")),
            }
        }
        self.validate_consequences(owner, &challenge.on_success)?;
        self.validate_consequences(owner, &challenge.on_partial)?;
        self.validate_consequences(owner, &challenge.on_failure)
    }

    fn validate_consequences(
        &self,
        owner: &str,
        consequences: &Consequences,
    ) -> Result<(), ContentError> {
        for card in &consequences.add_cards {
            self.require(&self.cards, owner, card)?;
        }
        for curse in consequences
            .add_curses
            .iter()
            .chain(&consequences.remove_curses)
        {
            self.require(&self.curses, owner, curse)?;
        }
        for anchor in consequences.anchors.keys() {
            self.require(&self.anchors, owner, anchor)?;
        }
        for delta in &consequences.quest_progress {
            self.require(&self.quests, owner, &delta.quest)?;
        }
        for flag in &consequences.quest_flags {
            self.require(&self.quests, owner, &flag.quest)?;
        }
        Ok(())
    }

    fn require<T: Definition>(
        &self,
        registry: &Registry<T>,
        owner: &str,
        id: &str,
    ) -> Result<(), ContentError> {
        if registry.contains(id) {
            Ok(())
        } else {
            Err(ContentError::dangling(owner, T::KIND, id))
        }
    }
}

impl ContentOracle for ContentRegistry {
    fn campaign(&self) -> &CampaignDefinition {
        &self.campaign
    }

    fn regions(&self) -> &[RegionDefinition] {
        self.regions.as_slice()
    }

    fn region(&self, id: &str) -> Option<&RegionDefinition> {
        self.regions.get(id)
    }

    fn anchors(&self) -> &[AnchorDefinition] {
        self.anchors.as_slice()
    }

    fn anchor(&self, id: &str) -> Option<&AnchorDefinition> {
        self.anchors.get(id)
    }

    fn events(&self) -> &[EventDefinition] {
        self.events.as_slice()
    }

    fn event(&self, id: &str) -> Option<&EventDefinition> {
        self.events.get(id)
    }

    fn quests(&self) -> &[QuestDefinition] {
        self.quests.as_slice()
    }

    fn quest(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.get(id)
    }

    fn hero(&self, id: &str) -> Option<&HeroDefinition> {
        self.heroes.get(id)
    }

    fn card(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    fn fate_card(&self, id: &str) -> Option<&FateCardDefinition> {
        self.fate_cards.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    fn curse(&self, id: &str) -> Option<&CurseDefinition> {
        self.curses.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str, neighbors: &[&str]) -> RegionDefinition {
        RegionDefinition {
            id: id.into(),
            neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
            ..RegionDefinition::default()
        }
    }

    fn pack() -> ContentRegistry {
        let mut content = ContentRegistry::new(CampaignDefinition {
            id: "test".into(),
            hero: "hero".into(),
            start_region: "village".into(),
            ..CampaignDefinition::default()
        });
        content
            .heroes
            .insert(HeroDefinition {
                id: "hero".into(),
                ..HeroDefinition::default()
            })
            .unwrap();
        content.regions.insert(region("village", &["forest"])).unwrap();
        content.regions.insert(region("forest", &["village"])).unwrap();
        content
    }

    #[test]
    fn valid_pack_passes() {
        assert_eq!(pack().validate(), Ok(()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut content = pack();
        let err = content.regions.insert(region("forest", &[])).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { kind: "region", .. }));
    }

    #[test]
    fn dangling_neighbor_is_reported() {
        let mut content = pack();
        content.regions.insert(region("swamp", &["nowhere"])).unwrap();
        assert_eq!(
            content.validate(),
            Err(ContentError::dangling("swamp", "region", "nowhere"))
        );
    }

    #[test]
    fn combat_challenge_needs_known_enemy() {
        let mut content = pack();
        content
            .events
            .insert(EventDefinition {
                id: "ambush".into(),
                challenge: Some(ChallengeDefinition::combat("wolf")),
                ..EventDefinition::default()
            })
            .unwrap();
        assert_eq!(
            content.validate(),
            Err(ContentError::dangling("ambush", "enemy", "wolf"))
        );
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let content = pack();
        let ids: Vec<_> = content.regions().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["village", "forest"]);
        assert!(content.region("forest").is_some());
        assert!(content.region("swamp").is_none());
    }
}
