//! Small two-region campaign shared by the engine tests.
#![allow(dead_code)]

use saga_core::env::{
    AnchorDefinition, CampaignDefinition, CardDefinition, ChallengeDefinition, Consequences,
    ContentRegistry, EndCondition, EndKind, EndPredicate, EnemyDefinition, EventChoice,
    EventDefinition, EventTrigger, HeroDefinition, IntentDefinition, IntentKind,
    ObjectiveDefinition, ObjectiveGoal, QuestCondition, QuestDefinition, RegionDefinition,
};
use saga_core::{GameConfig, GameEngine, GameEnv, GameRuntimeState, Transaction};

pub const SEED: u64 = 0x5a6a;

pub fn consequences(f: impl FnOnce(&mut Consequences)) -> Consequences {
    let mut consequences = Consequences::default();
    f(&mut consequences);
    consequences
}

pub fn content() -> ContentRegistry {
    let mut content = ContentRegistry::new(CampaignDefinition {
        id: "borderlands".into(),
        hero: "wanderer".into(),
        start_region: "village".into(),
        rest_cost: Transaction::free().with_cost("supplies", 1),
        threshold_effects: [(25, consequences(|c| c.set_flags.push("dread".into())))].into(),
        end_conditions: vec![EndCondition {
            kind: EndKind::Victory,
            predicate: EndPredicate::QuestCompleted("hunt".into()),
            reason: "wolf_hunter".into(),
        }],
        ..CampaignDefinition::default()
    });

    content
        .heroes
        .insert(HeroDefinition {
            id: "wanderer".into(),
            max_health: 20,
            strength: 25,
            will: 10,
            starting_resources: [("gold".into(), 10), ("supplies".into(), 5)].into(),
            starting_deck: vec!["blade".into(), "blade".into(), "charm".into()],
            ..HeroDefinition::default()
        })
        .unwrap();
    content
        .cards
        .insert(CardDefinition {
            id: "blade".into(),
            power: 2,
            ..CardDefinition::default()
        })
        .unwrap();
    content
        .cards
        .insert(CardDefinition {
            id: "charm".into(),
            sacrifice_heal: 4,
            ..CardDefinition::default()
        })
        .unwrap();

    content
        .regions
        .insert(RegionDefinition {
            id: "village".into(),
            region_type: "settlement".into(),
            neighbors: vec!["forest".into(), "marsh".into()],
            anchor: Some("village_stone".into()),
            starts_discovered: true,
            ..RegionDefinition::default()
        })
        .unwrap();
    content
        .regions
        .insert(RegionDefinition {
            id: "forest".into(),
            region_type: "wild".into(),
            neighbors: vec!["village".into()],
            travel_days: 2,
            travel_cost: Transaction::free().with_cost("supplies", 1),
            ..RegionDefinition::default()
        })
        .unwrap();
    content
        .regions
        .insert(RegionDefinition {
            id: "marsh".into(),
            region_type: "wild".into(),
            neighbors: vec!["village".into()],
            travel_cost: Transaction::free().with_cost("gold", 50),
            ..RegionDefinition::default()
        })
        .unwrap();
    content
        .anchors
        .insert(AnchorDefinition {
            id: "village_stone".into(),
            region: "village".into(),
            initial_integrity: 50,
            strengthen_cost: Transaction::free().with_cost("gold", 2),
            ..AnchorDefinition::default()
        })
        .unwrap();

    content
        .enemies
        .insert(EnemyDefinition {
            id: "wolf".into(),
            pattern: vec![IntentDefinition::new(IntentKind::Attack, 1)],
            reward: [("gold".into(), 3)].into(),
            loot: vec!["charm".into()],
            ..EnemyDefinition::default()
        })
        .unwrap();

    content
        .events
        .insert(EventDefinition {
            id: "wolf_ambush".into(),
            trigger: EventTrigger::Arrival,
            regions: vec!["forest".into()],
            one_time: true,
            choices: vec![
                EventChoice {
                    id: "fight".into(),
                    challenge: Some(ChallengeDefinition {
                        on_success: consequences(|c| c.set_flags.push("wolf_slain".into())),
                        ..ChallengeDefinition::combat("wolf")
                    }),
                    ..EventChoice::default()
                },
                EventChoice {
                    id: "flee".into(),
                    consequences: consequences(|c| {
                        c.resources.insert("health".into(), -2);
                    }),
                    ..EventChoice::default()
                },
            ],
            ..EventDefinition::default()
        })
        .unwrap();
    content
        .events
        .insert(EventDefinition {
            id: "riddle".into(),
            trigger: EventTrigger::Explore,
            regions: vec!["village".into()],
            cooldown: 3,
            choices: vec![
                EventChoice {
                    id: "answer".into(),
                    challenge: Some(ChallengeDefinition {
                        kind: "oracle".into(),
                        on_success: consequences(|c| {
                            c.resources.insert("gold".into(), 5);
                        }),
                        on_failure: consequences(|c| c.set_flags.push("riddle_failed".into())),
                        ..ChallengeDefinition::default()
                    }),
                    ..EventChoice::default()
                },
                EventChoice {
                    id: "ignore".into(),
                    ..EventChoice::default()
                },
            ],
            ..EventDefinition::default()
        })
        .unwrap();

    content
        .quests
        .insert(QuestDefinition {
            id: "hunt".into(),
            unlock: QuestCondition {
                visited_regions: vec!["forest".into()],
                ..QuestCondition::default()
            },
            auto_start: true,
            objectives: vec![ObjectiveDefinition {
                id: "slay".into(),
                complete_when: ObjectiveGoal {
                    flags: vec!["wolf_slain".into()],
                    ..ObjectiveGoal::default()
                },
                ..ObjectiveDefinition::default()
            }],
            on_complete: consequences(|c| {
                c.resources.insert("gold".into(), 10);
                c.set_flags.push("hunt_done".into());
            }),
            ..QuestDefinition::default()
        })
        .unwrap();

    content.validate().unwrap();
    content
}

pub struct World {
    pub content: ContentRegistry,
    pub config: GameConfig,
}

impl World {
    pub fn new() -> Self {
        Self {
            content: content(),
            config: GameConfig::default(),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(&self.content, &self.config)
    }

    pub fn engine(&self) -> GameEngine {
        let state = GameRuntimeState::new_game(SEED, &self.content, &self.config).unwrap();
        GameEngine::new(state, &self.config)
    }
}
