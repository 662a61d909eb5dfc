use crate::combat::CombatOutcome;
use crate::state::{
    AnchorId, CardId, CardZones, ChallengeRef, CurseId, EnemyId, EventId, Flag, GameEnding,
    GameRuntimeState, ObjectiveId, QuestId, QuestStatus, RegionId, ResourceId,
};
use crate::time::TimeEngine;

use super::ChangeSections;

/// One atomic, replayable mutation of [`GameRuntimeState`].
///
/// Records carry target values rather than deltas, so applying a change is
/// independent of how the value was computed. The engine applies every record
/// as it emits it; the ordered list is returned in the action outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateChange {
    DayAdvanced {
        day: u32,
    },
    PressureEscalated {
        day: u32,
        amount: u32,
        value: u32,
    },
    PressureAdjusted {
        delta: i32,
        value: u32,
    },
    ThresholdCrossed {
        threshold: u32,
    },
    ResonanceChanged {
        from: i32,
        to: i32,
    },
    BalanceChanged {
        from: i32,
        to: i32,
    },
    ResourceChanged {
        resource: ResourceId,
        from: i32,
        to: i32,
    },
    RegionEntered {
        region: RegionId,
        visit_count: u32,
    },
    RegionDiscovered {
        region: RegionId,
    },
    RegionDegraded {
        region: RegionId,
        level: u8,
    },
    RegionFlagSet {
        region: RegionId,
        flag: Flag,
    },
    AnchorChanged {
        anchor: AnchorId,
        integrity: i32,
        active: bool,
    },
    FlagSet {
        flag: Flag,
    },
    FlagCleared {
        flag: Flag,
    },
    PlayerFlagSet {
        flag: Flag,
    },
    CooldownTicked {
        event: EventId,
        remaining: u32,
    },
    EventFired {
        event: EventId,
        one_time: bool,
        cooldown: u32,
    },
    EventClosed {
        event: EventId,
    },
    ChallengeOpened {
        challenge: ChallengeRef,
    },
    ChallengeClosed,
    QuestStatusChanged {
        quest: QuestId,
        status: QuestStatus,
    },
    ObjectiveAssigned {
        quest: QuestId,
        objective: Option<ObjectiveId>,
    },
    ObjectiveCompleted {
        quest: QuestId,
        objective: ObjectiveId,
    },
    ObjectiveFailed {
        quest: QuestId,
        objective: ObjectiveId,
    },
    QuestCounterChanged {
        quest: QuestId,
        key: String,
        value: i32,
    },
    QuestFlagSet {
        quest: QuestId,
        flag: Flag,
    },
    CardGained {
        card: CardId,
    },
    /// Card zones handed back by a finished combat session.
    CardsCommitted {
        zones: CardZones,
    },
    CurseAdded {
        curse: CurseId,
    },
    CurseRemoved {
        curse: CurseId,
    },
    CombatStarted {
        enemy: EnemyId,
    },
    CombatEnded {
        enemy: EnemyId,
        outcome: CombatOutcome,
        rounds: u32,
    },
    GameEnded {
        ending: GameEnding,
    },
}

impl StateChange {
    /// State section touched by this change.
    pub fn section(&self) -> ChangeSections {
        match self {
            Self::DayAdvanced { .. } => ChangeSections::CLOCK,
            Self::PressureEscalated { .. }
            | Self::PressureAdjusted { .. }
            | Self::ThresholdCrossed { .. } => ChangeSections::PRESSURE,
            Self::ResonanceChanged { .. }
            | Self::RegionEntered { .. }
            | Self::RegionDiscovered { .. }
            | Self::RegionDegraded { .. }
            | Self::RegionFlagSet { .. }
            | Self::AnchorChanged { .. }
            | Self::FlagSet { .. }
            | Self::FlagCleared { .. } => ChangeSections::WORLD,
            Self::BalanceChanged { .. }
            | Self::ResourceChanged { .. }
            | Self::PlayerFlagSet { .. }
            | Self::CurseAdded { .. }
            | Self::CurseRemoved { .. } => ChangeSections::PLAYER,
            Self::CardGained { .. } | Self::CardsCommitted { .. } => ChangeSections::CARDS,
            Self::CooldownTicked { .. }
            | Self::EventFired { .. }
            | Self::EventClosed { .. }
            | Self::ChallengeOpened { .. }
            | Self::ChallengeClosed => ChangeSections::EVENTS,
            Self::QuestStatusChanged { .. }
            | Self::ObjectiveAssigned { .. }
            | Self::ObjectiveCompleted { .. }
            | Self::ObjectiveFailed { .. }
            | Self::QuestCounterChanged { .. }
            | Self::QuestFlagSet { .. } => ChangeSections::QUESTS,
            Self::CombatStarted { .. } | Self::CombatEnded { .. } => ChangeSections::COMBAT,
            Self::GameEnded { .. } => ChangeSections::ENDING,
        }
    }

    /// Applies this change to `state`.
    ///
    /// `CombatStarted` and `CombatEnded` are markers; the session itself lives
    /// outside the canonical state and its effects arrive as separate records.
    pub fn apply(&self, state: &mut GameRuntimeState) {
        match self {
            Self::DayAdvanced { day } => {
                state.world.clock = TimeEngine::at(*day);
                let pressure = &mut state.world.pressure;
                pressure.days_since_escalation = pressure.days_since_escalation.saturating_add(1);
            }
            Self::PressureEscalated { value, .. } => {
                state.world.pressure.value = *value;
                state.world.pressure.days_since_escalation = 0;
            }
            Self::PressureAdjusted { value, .. } => state.world.pressure.value = *value,
            Self::ThresholdCrossed { threshold } => {
                state.world.pressure.triggered.insert(*threshold);
            }
            Self::ResonanceChanged { to, .. } => state.world.resonance = *to,
            Self::BalanceChanged { to, .. } => state.player.balance = *to,
            Self::ResourceChanged { resource, to, .. } => {
                state.player.resources.set(resource.clone(), *to);
            }
            Self::RegionEntered {
                region,
                visit_count,
            } => {
                state.world.current_region = region.clone();
                let entry = state.world.regions.entry(region.clone()).or_default();
                entry.visit_count = *visit_count;
                entry.discovered = true;
            }
            Self::RegionDiscovered { region } => {
                state.world.regions.entry(region.clone()).or_default().discovered = true;
            }
            Self::RegionDegraded { region, level } => {
                state.world.regions.entry(region.clone()).or_default().degradation = *level;
            }
            Self::RegionFlagSet { region, flag } => {
                state
                    .world
                    .regions
                    .entry(region.clone())
                    .or_default()
                    .flags
                    .insert(flag.clone());
            }
            Self::AnchorChanged {
                anchor,
                integrity,
                active,
            } => {
                if let Some(entry) = state.world.anchors.get_mut(anchor) {
                    entry.integrity = *integrity;
                    entry.active = *active;
                }
            }
            Self::FlagSet { flag } => {
                state.world.flags.insert(flag.clone());
            }
            Self::FlagCleared { flag } => {
                state.world.flags.remove(flag);
                state.player.flags.remove(flag);
            }
            Self::PlayerFlagSet { flag } => {
                state.player.flags.insert(flag.clone());
            }
            Self::CooldownTicked { event, remaining } => {
                if *remaining == 0 {
                    state.events.cooldowns.remove(event);
                } else {
                    state.events.cooldowns.insert(event.clone(), *remaining);
                }
            }
            Self::EventFired {
                event,
                one_time,
                cooldown,
            } => {
                let events = &mut state.events;
                *events.occurrences.entry(event.clone()).or_default() += 1;
                if *one_time {
                    events.completed.insert(event.clone());
                }
                if *cooldown > 0 {
                    events.cooldowns.insert(event.clone(), *cooldown);
                }
                events.active_event = Some(event.clone());
            }
            Self::EventClosed { event } => {
                if state.events.active_event.as_ref() == Some(event) {
                    state.events.active_event = None;
                }
            }
            Self::ChallengeOpened { challenge } => {
                state.events.active_challenge = Some(challenge.clone());
            }
            Self::ChallengeClosed => state.events.active_challenge = None,
            Self::QuestStatusChanged { quest, status } => {
                state.quests.entry(quest).status = *status;
            }
            Self::ObjectiveAssigned { quest, objective } => {
                state.quests.entry(quest).current_objective = objective.clone();
            }
            Self::ObjectiveCompleted { quest, objective } => {
                state
                    .quests
                    .entry(quest)
                    .completed_objectives
                    .insert(objective.clone());
            }
            Self::ObjectiveFailed { quest, objective } => {
                state
                    .quests
                    .entry(quest)
                    .failed_objectives
                    .insert(objective.clone());
            }
            Self::QuestCounterChanged { quest, key, value } => {
                state.quests.entry(quest).counters.insert(key.clone(), *value);
            }
            Self::QuestFlagSet { quest, flag } => {
                state.quests.entry(quest).flags.insert(flag.clone());
            }
            Self::CardGained { card } => {
                state.player.cards.add_to_discard(card.clone());
            }
            Self::CardsCommitted { zones } => state.player.cards = zones.clone(),
            Self::CurseAdded { curse } => {
                state.player.curses.insert(curse.clone());
            }
            Self::CurseRemoved { curse } => {
                state.player.curses.remove(curse);
            }
            Self::CombatStarted { .. } | Self::CombatEnded { .. } => {}
            Self::GameEnded { ending } => state.ending = Some(ending.clone()),
        }
    }
}
