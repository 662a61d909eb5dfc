//! Interactive combat session.
//!
//! A session owns a private copy of the hero's combat-relevant state, the
//! player's card zones and its own random stream seeded from the main one.
//! Nothing it does touches [`GameRuntimeState`] until the engine commits the
//! [`CombatResult`].

use crate::config::CombatConfig;
use crate::env::{
    ContentError, ContentOracle, FateCardDefinition, FateKeyword, IntentDefinition, PcgRng,
    RandomSource, shuffle,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardUid, CardZones, ChallengeRef, EnemyId, FateCardId, GameRuntimeState, Zone};

use super::enemy::{EnemyMode, EnemyStatus, EnemyTurn, act as enemy_act};
use super::fate::{FateDeck, FateModifier, ResonanceZone};
use super::momentum::{CommandKind, Momentum, Track};
use super::power::{PowerBreakdown, effective_power};
use super::{CombatOutcome, CombatResult, Disposition};

/// Player command for one combat round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatCommand {
    /// Push disposition toward neutralization, optionally playing a hand card.
    Strike { card: Option<CardUid> },
    /// Push disposition toward subjugation, optionally playing a hand card.
    Influence { card: Option<CardUid> },
    /// Exile a hand card for its sacrifice effect.
    Sacrifice { card: CardUid },
}

impl CombatCommand {
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Strike { .. } => CommandKind::Strike,
            Self::Influence { .. } => CommandKind::Influence,
            Self::Sacrifice { .. } => CommandKind::Sacrifice,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combat already finished")]
    Finished,

    #[error("combat is still in progress")]
    InProgress,

    #[error("card {0} is not in hand")]
    CardNotInHand(CardUid),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content(error) => error.severity(),
            Self::InProgress => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Finished => "COMBAT_FINISHED",
            Self::InProgress => "COMBAT_IN_PROGRESS",
            Self::CardNotInHand(_) => "COMBAT_CARD_NOT_IN_HAND",
            Self::Content(error) => error.error_code(),
        }
    }
}

/// Hero values a session works on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroCombatState {
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub will: i32,
    /// Absorbs enemy attack damage until used up.
    pub ward: i32,
    /// Subtracted from the next command's base power.
    pub debuff: i32,
}

impl HeroCombatState {
    /// Removes up to `amount` health and returns the loss.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.health.max(0));
        self.health -= lost;
        lost
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
    }
}

/// Complete, persistable state of an open combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub enemy: EnemyId,
    pub challenge: ChallengeRef,
    /// One-based round counter.
    pub round: u32,
    pub disposition: Disposition,
    pub momentum: Momentum,
    pub enemy_status: EnemyStatus,
    pub hero: HeroCombatState,
    pub initial_health: i32,
    /// World resonance when the session opened.
    pub resonance: i32,
    pub fate: FateDeck,
    pub cards: CardZones,
    pub rng: PcgRng,
    pub outcome: Option<CombatOutcome>,
}

/// Everything that happened in one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub round: u32,
    pub command: CombatCommand,
    pub fate_card: Option<FateCardId>,
    pub power: Option<PowerBreakdown>,
    /// Disposition movement after block or defend, echo included.
    pub applied: i32,
    pub echoed: bool,
    pub enemy_turn: Option<EnemyTurn>,
    pub disposition: i32,
    pub hero_health: i32,
    pub outcome: Option<CombatOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatSession {
    snapshot: CombatSnapshot,
}

impl CombatSession {
    /// Opens a session against `enemy` for the player in `state`.
    ///
    /// `seed` seeds the session stream, which shuffles the fate deck and any
    /// recycled discard pile.
    pub fn open(
        content: &dyn ContentOracle,
        config: &CombatConfig,
        state: &GameRuntimeState,
        challenge: ChallengeRef,
        enemy: &str,
        seed: u64,
    ) -> Result<Self, ContentError> {
        let enemy = content
            .enemy(enemy)
            .ok_or_else(|| ContentError::unknown("enemy", enemy))?;
        let hero = content
            .hero(&state.player.hero)
            .ok_or_else(|| ContentError::unknown("hero", &state.player.hero))?;

        let mut rng = PcgRng::from_seed(seed);
        let fate = FateDeck::new(content.campaign().fate_deck.clone(), &mut rng);
        let mut cards = state.player.cards.clone();
        for _ in 0..config.hand_size {
            if draw_card(&mut cards, &mut rng).is_none() {
                break;
            }
        }

        let health = state.player.health();
        Ok(Self {
            snapshot: CombatSnapshot {
                enemy: enemy.id.clone(),
                challenge,
                round: 1,
                disposition: Disposition::new(enemy.starting_disposition),
                momentum: Momentum::new(),
                enemy_status: EnemyStatus::default(),
                hero: HeroCombatState {
                    health,
                    max_health: hero.max_health,
                    strength: hero.strength,
                    will: hero.will,
                    ward: 0,
                    debuff: 0,
                },
                initial_health: health,
                resonance: state.world.resonance,
                fate,
                cards,
                rng,
                outcome: None,
            },
        })
    }

    pub fn from_snapshot(snapshot: CombatSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &CombatSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> CombatSnapshot {
        self.snapshot
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.snapshot.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.outcome.is_some()
    }

    /// Intent the enemy will execute at the end of the current round.
    pub fn next_intent(&self, content: &dyn ContentOracle) -> Option<IntentDefinition> {
        content
            .enemy(&self.snapshot.enemy)?
            .intent_for_round(self.snapshot.round)
    }

    /// Plays one round: the player's command, then (unless the command ended
    /// the fight) the enemy's intent.
    ///
    /// The session is left untouched when an error is returned.
    pub fn play(
        &mut self,
        command: CombatCommand,
        content: &dyn ContentOracle,
        config: &CombatConfig,
    ) -> Result<RoundReport, CombatError> {
        if self.is_finished() {
            return Err(CombatError::Finished);
        }
        let enemy = content
            .enemy(&self.snapshot.enemy)
            .ok_or_else(|| ContentError::unknown("enemy", &self.snapshot.enemy))?;

        let mut next = self.snapshot.clone();
        let before = next.disposition;
        let mut report = RoundReport {
            round: next.round,
            command,
            fate_card: None,
            power: None,
            applied: 0,
            echoed: false,
            enemy_turn: None,
            disposition: before.value(),
            hero_health: next.hero.health,
            outcome: None,
        };

        match command {
            CombatCommand::Strike { card } => {
                play_track(&mut next, &mut report, Track::Strike, card, content, config)?;
            }
            CombatCommand::Influence { card } => {
                play_track(&mut next, &mut report, Track::Influence, card, content, config)?;
            }
            CombatCommand::Sacrifice { card } => {
                let instance = next
                    .cards
                    .in_hand(card)
                    .ok_or(CombatError::CardNotInHand(card))?;
                let definition = content
                    .card(&instance.card)
                    .ok_or_else(|| ContentError::unknown("card", &instance.card))?;
                next.cards.move_card(card, Zone::Hand, Zone::Exile);
                next.hero.heal(definition.sacrifice_heal);
                next.enemy_status.attack_bonus += definition.sacrifice_enemy_buff;
                next.momentum.record_sacrifice();
            }
        }

        if let Some(outcome) = decisive_outcome(next.disposition) {
            next.outcome = Some(outcome);
        } else {
            let swing = next.disposition.value() - before.value();
            next.enemy_status.mode = EnemyMode::resolve(next.disposition, swing, config);
            let turn = enemy_act(
                enemy.intent_for_round(next.round),
                &mut next.enemy_status,
                &mut next.hero,
                &mut next.disposition,
            );
            report.enemy_turn = Some(turn);

            if next.hero.health <= 0 {
                next.outcome = Some(CombatOutcome::Defeat);
            } else {
                if next.cards.hand.len() < config.hand_size {
                    draw_card(&mut next.cards, &mut next.rng);
                }
                next.round += 1;
            }
        }

        report.disposition = next.disposition.value();
        report.hero_health = next.hero.health;
        report.outcome = next.outcome;
        self.snapshot = next;
        Ok(report)
    }

    /// Final accounting of a finished session.
    ///
    /// The returned card zones have the hand folded back into the discard pile.
    pub fn finish(
        &self,
        content: &dyn ContentOracle,
        config: &CombatConfig,
    ) -> Result<CombatResult, CombatError> {
        let snapshot = &self.snapshot;
        let outcome = snapshot.outcome.ok_or(CombatError::InProgress)?;
        let enemy = content
            .enemy(&snapshot.enemy)
            .ok_or_else(|| ContentError::unknown("enemy", &snapshot.enemy))?;

        let shift = enemy.resonance_shift.unwrap_or(config.resonance_shift);
        let resonance_delta = match outcome {
            CombatOutcome::Neutralized => -shift,
            CombatOutcome::Subjugated => shift,
            CombatOutcome::Defeat => 0,
        };
        let (loot, rewards) = if outcome.is_victory() {
            (enemy.loot.clone(), enemy.reward.clone())
        } else {
            Default::default()
        };
        let mut cards = snapshot.cards.clone();
        cards.discard_hand();

        Ok(CombatResult {
            enemy: snapshot.enemy.clone(),
            challenge: snapshot.challenge.clone(),
            outcome,
            final_disposition: snapshot.disposition.value(),
            resonance_delta,
            health_delta: snapshot.hero.health - snapshot.initial_health,
            final_health: snapshot.hero.health,
            loot,
            rewards,
            rounds: snapshot.round,
            cards,
            snapshot: snapshot.clone(),
        })
    }
}

fn decisive_outcome(disposition: Disposition) -> Option<CombatOutcome> {
    if disposition.is_neutralized() {
        Some(CombatOutcome::Neutralized)
    } else if disposition.is_subjugated() {
        Some(CombatOutcome::Subjugated)
    } else {
        None
    }
}

/// Draws one card into the hand, recycling and shuffling the discard pile
/// when the draw pile is empty.
fn draw_card(cards: &mut CardZones, rng: &mut dyn RandomSource) -> Option<CardUid> {
    if cards.draw.is_empty() {
        if cards.recycle_discard() == 0 {
            return None;
        }
        shuffle(&mut cards.draw, rng);
    }
    cards.draw_one()
}

fn play_track(
    next: &mut CombatSnapshot,
    report: &mut RoundReport,
    track: Track,
    card: Option<CardUid>,
    content: &dyn ContentOracle,
    config: &CombatConfig,
) -> Result<(), CombatError> {
    let card_power = match card {
        Some(uid) => {
            let instance = next
                .cards
                .in_hand(uid)
                .ok_or(CombatError::CardNotInHand(uid))?;
            content
                .card(&instance.card)
                .ok_or_else(|| ContentError::unknown("card", &instance.card))?
                .power
        }
        None => 0,
    };

    let momentum = next.momentum.preview(track, config);
    let fate_id = next.fate.draw(&mut next.rng);
    let fate_card: Option<&FateCardDefinition> = match &fate_id {
        Some(id) => Some(
            content
                .fate_card(id)
                .ok_or_else(|| ContentError::unknown("fate_card", id))?,
        ),
        None => None,
    };
    let zone = ResonanceZone::from_resonance(next.resonance);
    let modifier = fate_card
        .map(|fate| FateModifier::from_card(fate, zone, track, momentum.extends_streak))
        .unwrap_or_default();
    let keyword = fate_card.and_then(|fate| fate.keyword);

    let stat = match track {
        Track::Strike => next.hero.strength,
        Track::Influence => next.hero.will,
    };
    let base_power = (stat + card_power - next.hero.debuff).max(0);
    next.hero.debuff = 0;
    let power = effective_power(
        base_power,
        keyword == Some(FateKeyword::Surge),
        momentum,
        modifier.total(),
    );

    if let Some(fate) = fate_card {
        if fate.keyword == Some(FateKeyword::Ward) {
            next.hero.ward += fate.value.max(0);
        }
    }

    let echo_allowed = next.momentum.previous() != Some(CommandKind::Sacrifice);
    let mut applied = apply_power(next, track, power.effective_power);
    if keyword == Some(FateKeyword::Echo)
        && echo_allowed
        && decisive_outcome(next.disposition).is_none()
    {
        applied += apply_power(next, track, power.effective_power);
        report.echoed = true;
    }

    next.momentum.record(track);
    if let (Some(id), Some(fate)) = (fate_id.clone(), fate_card) {
        next.fate.settle(id, fate.exhaust);
    }
    if let Some(uid) = card {
        next.cards.move_card(uid, Zone::Hand, Zone::Discard);
    }

    report.fate_card = fate_id;
    report.power = Some(power);
    report.applied = applied;
    Ok(())
}

fn apply_power(next: &mut CombatSnapshot, track: Track, power: i32) -> i32 {
    match track {
        Track::Strike => {
            let through = next.enemy_status.absorb_strike(power);
            next.disposition.strike(through);
            through
        }
        Track::Influence => {
            let through = next.enemy_status.absorb_influence(power);
            next.disposition.influence(through);
            through
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{
        Alignment, CampaignDefinition, CardDefinition, ContentRegistry, EnemyDefinition,
        HeroDefinition, IntentKind, RegionDefinition,
    };
    use crate::state::ChallengePhase;

    fn content(pattern: Vec<IntentDefinition>, fate: Vec<FateCardDefinition>) -> ContentRegistry {
        let mut content = ContentRegistry::new(CampaignDefinition {
            id: "trial".into(),
            hero: "hero".into(),
            start_region: "gate".into(),
            fate_deck: fate.iter().map(|card| card.id.clone()).collect(),
            ..CampaignDefinition::default()
        });
        content
            .heroes
            .insert(HeroDefinition {
                id: "hero".into(),
                max_health: 20,
                strength: 12,
                will: 8,
                starting_deck: vec!["blade".into(), "blade".into(), "offering".into()],
                ..HeroDefinition::default()
            })
            .unwrap();
        content
            .regions
            .insert(RegionDefinition {
                id: "gate".into(),
                ..RegionDefinition::default()
            })
            .unwrap();
        content
            .cards
            .insert(CardDefinition {
                id: "blade".into(),
                power: 3,
                ..CardDefinition::default()
            })
            .unwrap();
        content
            .cards
            .insert(CardDefinition {
                id: "offering".into(),
                sacrifice_heal: 5,
                sacrifice_enemy_buff: 2,
                ..CardDefinition::default()
            })
            .unwrap();
        content
            .enemies
            .insert(EnemyDefinition {
                id: "wraith".into(),
                pattern,
                ..EnemyDefinition::default()
            })
            .unwrap();
        for card in fate {
            content.fate_cards.insert(card).unwrap();
        }
        content
    }

    fn challenge() -> ChallengeRef {
        ChallengeRef {
            event: "ambush".into(),
            choice: None,
            kind: "combat".into(),
            phase: ChallengePhase::InCombat,
        }
    }

    fn open(content: &ContentRegistry) -> CombatSession {
        let state = GameRuntimeState::new_game(3, content, &GameConfig::default()).unwrap();
        CombatSession::open(
            content,
            &CombatConfig::default(),
            &state,
            challenge(),
            "wraith",
            99,
        )
        .unwrap()
    }

    fn attack(value: i32) -> IntentDefinition {
        IntentDefinition::new(IntentKind::Attack, value)
    }

    const STRIKE: CombatCommand = CombatCommand::Strike { card: None };

    #[test]
    fn opening_draws_hand() {
        let content = content(vec![attack(1)], vec![]);
        let session = open(&content);
        assert_eq!(session.snapshot().cards.hand.len(), 3);
        assert_eq!(session.snapshot().round, 1);
    }

    #[test]
    fn consecutive_strikes_build_streak() {
        let content = content(vec![attack(1)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);

        let first = session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(first.disposition, -12);
        let second = session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(second.power.unwrap().streak_bonus, 2);
        assert_eq!(second.disposition, -26);
        assert_eq!(second.hero_health, 18);
    }

    #[test]
    fn neutral_fate_card_adds_its_value() {
        let fate = FateCardDefinition {
            id: "still".into(),
            value: 0,
            alignment: Alignment::Yav,
            ..FateCardDefinition::default()
        };
        let content = content(vec![attack(1)], vec![fate]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let report = session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(report.fate_card.as_deref(), Some("still"));
        assert_eq!(report.disposition, -12);
        assert_eq!(session.snapshot().fate.discard.len(), 1);
    }

    #[test]
    fn power_is_capped() {
        let fate = FateCardDefinition {
            id: "storm".into(),
            value: 10,
            keyword: Some(FateKeyword::Surge),
            ..FateCardDefinition::default()
        };
        let content = content(vec![attack(1)], vec![fate]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let report = session.play(STRIKE, &content, &config).unwrap();
        let power = report.power.unwrap();
        assert_eq!(power.raw_power, 28);
        assert_eq!(power.effective_power, 25);
        assert_eq!(report.disposition, -25);
    }

    #[test]
    fn played_card_adds_power_and_is_discarded() {
        let content = content(vec![attack(1)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let blade = session
            .snapshot()
            .cards
            .hand
            .iter()
            .find(|card| card.card == "blade")
            .unwrap()
            .uid;
        let report = session
            .play(CombatCommand::Strike { card: Some(blade) }, &content, &config)
            .unwrap();
        assert_eq!(report.disposition, -15);
        assert_eq!(session.snapshot().cards.locate(blade), Some(Zone::Discard));
    }

    #[test]
    fn unknown_card_leaves_session_untouched() {
        let content = content(vec![attack(1)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let before = session.clone();
        let error = session
            .play(CombatCommand::Strike { card: Some(999) }, &content, &config)
            .unwrap_err();
        assert_eq!(error, CombatError::CardNotInHand(999));
        assert_eq!(session, before);
    }

    #[test]
    fn sacrifice_exiles_and_heals() {
        let content = content(vec![attack(4)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(session.snapshot().hero.health, 16);
        let offering = session
            .snapshot()
            .cards
            .hand
            .iter()
            .find(|card| card.card == "offering")
            .unwrap()
            .uid;
        let report = session
            .play(CombatCommand::Sacrifice { card: offering }, &content, &config)
            .unwrap();
        assert_eq!(session.snapshot().cards.locate(offering), Some(Zone::Exile));
        // Healed to 20 (capped), then hit for 4 + 2 buff.
        assert_eq!(report.hero_health, 14);
        assert_eq!(session.snapshot().momentum.previous(), Some(CommandKind::Sacrifice));
    }

    #[test]
    fn sacrifice_leaves_fate_deck_alone() {
        let fate = FateCardDefinition {
            id: "still".into(),
            alignment: Alignment::Yav,
            ..FateCardDefinition::default()
        };
        let content = content(vec![attack(1)], vec![fate]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        session.play(STRIKE, &content, &config).unwrap();
        let fate_before = session.snapshot().fate.clone();
        assert_eq!(fate_before.discard.len(), 1);

        let offering = session
            .snapshot()
            .cards
            .hand
            .iter()
            .find(|card| card.card == "offering")
            .unwrap()
            .uid;
        let report = session
            .play(CombatCommand::Sacrifice { card: offering }, &content, &config)
            .unwrap();
        assert_eq!(report.fate_card, None);
        assert_eq!(session.snapshot().fate, fate_before);
        assert!(session.snapshot().fate.exhaust.is_empty());
    }

    #[test]
    fn neutralization_skips_enemy_turn() {
        let content = content(vec![attack(1)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let mut last = None;
        for _ in 0..20 {
            let report = session.play(STRIKE, &content, &config).unwrap();
            let done = report.outcome.is_some();
            last = Some(report);
            if done {
                break;
            }
        }
        let last = last.unwrap();
        assert_eq!(last.outcome, Some(CombatOutcome::Neutralized));
        assert!(last.enemy_turn.is_none());
        assert_eq!(
            session.play(STRIKE, &content, &config),
            Err(CombatError::Finished)
        );

        let result = session.finish(&content, &config).unwrap();
        assert_eq!(result.resonance_delta, -config.resonance_shift);
        assert_eq!(result.rounds, last.round);
        assert!(result.cards.hand.is_empty());
        assert_eq!(result.cards.live_count(), 3);
    }

    #[test]
    fn hero_death_is_defeat() {
        let content = content(vec![attack(30)], vec![]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let report = session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(report.outcome, Some(CombatOutcome::Defeat));
        let result = session.finish(&content, &config).unwrap();
        assert_eq!(result.resonance_delta, 0);
        assert_eq!(result.health_delta, -20);
        assert!(result.loot.is_empty());
    }

    #[test]
    fn finish_requires_outcome() {
        let content = content(vec![attack(1)], vec![]);
        let session = open(&content);
        assert_eq!(
            session.finish(&content, &CombatConfig::default()).unwrap_err(),
            CombatError::InProgress
        );
    }

    #[test]
    fn snapshot_resumes_identically() {
        let fate = (0..4)
            .map(|i| FateCardDefinition {
                id: format!("omen{i}"),
                value: i,
                ..FateCardDefinition::default()
            })
            .collect();
        let content = content(vec![attack(1)], fate);
        let config = CombatConfig::default();
        let mut session = open(&content);
        session.play(STRIKE, &content, &config).unwrap();

        let mut resumed = CombatSession::from_snapshot(session.snapshot().clone());
        let a = session.play(STRIKE, &content, &config).unwrap();
        let b = resumed.play(STRIKE, &content, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn echo_replays_power() {
        let fate = FateCardDefinition {
            id: "echo".into(),
            keyword: Some(FateKeyword::Echo),
            ..FateCardDefinition::default()
        };
        let content = content(vec![attack(1)], vec![fate]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let report = session.play(STRIKE, &content, &config).unwrap();
        assert!(report.echoed);
        assert_eq!(report.applied, 24);
        assert_eq!(report.disposition, -24);
    }

    #[test]
    fn ward_fate_card_shields_hero() {
        let fate = FateCardDefinition {
            id: "aegis".into(),
            value: 3,
            keyword: Some(FateKeyword::Ward),
            ..FateCardDefinition::default()
        };
        let content = content(vec![attack(2)], vec![fate]);
        let config = CombatConfig::default();
        let mut session = open(&content);
        let report = session.play(STRIKE, &content, &config).unwrap();
        assert_eq!(report.enemy_turn.unwrap().ward_absorbed, 2);
        assert_eq!(report.hero_health, 20);
        assert_eq!(session.snapshot().hero.ward, 1);
    }
}
