//! Pluggable challenge resolution.
//!
//! A challenge raised by an event choice is routed by its `kind` to a
//! [`ConflictResolver`]. Synchronous resolvers answer immediately with a
//! [`ConflictOutcome`]; the combat resolver instead opens an interactive
//! [`CombatSession`]. Kinds with no registered resolver park the challenge
//! until an external resolver reports back through
//! [`GameAction::ResolveChallenge`](crate::action::GameAction::ResolveChallenge).

use std::collections::BTreeMap;

use crate::combat::{CombatOutcome, CombatSession};
use crate::config::GameConfig;
use crate::env::{ChallengeDefinition, ContentError, ContentOracle, RandomSource};
use crate::state::{ChallengePhase, ChallengeRef, GameRuntimeState};

/// Result category of a resolved challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConflictOutcome {
    Success,
    Partial,
    Failure,
    /// Closes the challenge with no consequences.
    Cancelled,
}

impl From<CombatOutcome> for ConflictOutcome {
    fn from(outcome: CombatOutcome) -> Self {
        if outcome.is_victory() {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Read-only view handed to a resolver.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub content: &'a dyn ContentOracle,
    pub config: &'a GameConfig,
    pub state: &'a GameRuntimeState,
    pub challenge: &'a ChallengeRef,
    pub definition: &'a ChallengeDefinition,
}

pub enum Resolution {
    Outcome(ConflictOutcome),
    Interactive(CombatSession),
}

/// Resolves challenges of one kind.
///
/// Implementations must be deterministic given the context and the random
/// source, and must document how many draws they consume.
pub trait ConflictResolver: Send + Sync {
    fn resolve(
        &self,
        ctx: ResolveContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<Resolution, ContentError>;
}

/// Opens a combat session. Draws one `u64` for the session seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatResolver;

impl ConflictResolver for CombatResolver {
    fn resolve(
        &self,
        ctx: ResolveContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<Resolution, ContentError> {
        let enemy = ctx
            .definition
            .enemy
            .as_deref()
            .ok_or_else(|| ContentError::invalid(&ctx.challenge.event, "combat without enemy"))?;
        let challenge = ChallengeRef {
            phase: ChallengePhase::InCombat,
            ..ctx.challenge.clone()
        };
        let seed = rng.next_u64();
        let session = CombatSession::open(
            ctx.content,
            &ctx.config.combat,
            ctx.state,
            challenge,
            enemy,
            seed,
        )?;
        Ok(Resolution::Interactive(session))
    }
}

/// d20 plus an optional resource against the challenge difficulty.
///
/// Meeting the difficulty succeeds, missing it by at most
/// [`Self::PARTIAL_MARGIN`] is partial. Draws once.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkillCheckResolver;

impl SkillCheckResolver {
    pub const DIE: u32 = 20;
    pub const PARTIAL_MARGIN: i32 = 5;

    pub fn grade(total: i32, difficulty: i32) -> ConflictOutcome {
        if total >= difficulty {
            ConflictOutcome::Success
        } else if total >= difficulty - Self::PARTIAL_MARGIN {
            ConflictOutcome::Partial
        } else {
            ConflictOutcome::Failure
        }
    }
}

impl ConflictResolver for SkillCheckResolver {
    fn resolve(
        &self,
        ctx: ResolveContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<Resolution, ContentError> {
        let roll = rng.roll_die(Self::DIE) as i32;
        let bonus = ctx
            .definition
            .attribute
            .as_deref()
            .map(|attribute| ctx.state.player.resources.get(attribute))
            .unwrap_or(0);
        Ok(Resolution::Outcome(Self::grade(
            roll + bonus,
            ctx.definition.difficulty,
        )))
    }
}

/// Resolvers keyed by challenge kind.
pub struct ResolverRegistry {
    resolvers: BTreeMap<String, Box<dyn ConflictResolver>>,
}

impl ResolverRegistry {
    /// Registry without any resolver; every challenge waits for an external answer.
    pub fn empty() -> Self {
        Self {
            resolvers: BTreeMap::new(),
        }
    }

    /// Replaces any resolver previously registered for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, resolver: impl ConflictResolver + 'static) {
        self.resolvers.insert(kind.into(), Box::new(resolver));
    }

    /// Removes the resolver for `kind`, parking such challenges from now on.
    pub fn unregister(&mut self, kind: &str) -> bool {
        self.resolvers.remove(kind).is_some()
    }

    pub fn get(&self, kind: &str) -> Option<&dyn ConflictResolver> {
        self.resolvers.get(kind).map(|resolver| resolver.as_ref())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.resolvers.keys().map(String::as_str)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ChallengeDefinition::COMBAT, CombatResolver);
        registry.register(ChallengeDefinition::SKILL_CHECK, SkillCheckResolver);
        registry
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        CampaignDefinition, ContentRegistry, EnemyDefinition, HeroDefinition, RegionDefinition,
    };

    struct FixedRng(u32);

    impl RandomSource for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    fn content() -> ContentRegistry {
        let mut content = ContentRegistry::new(CampaignDefinition {
            id: "trial".into(),
            hero: "hero".into(),
            start_region: "gate".into(),
            ..CampaignDefinition::default()
        });
        content
            .heroes
            .insert(HeroDefinition {
                id: "hero".into(),
                max_health: 10,
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
            .enemies
            .insert(EnemyDefinition {
                id: "wolf".into(),
                ..EnemyDefinition::default()
            })
            .unwrap();
        content
    }

    fn challenge(kind: &str) -> ChallengeRef {
        ChallengeRef {
            event: "ambush".into(),
            choice: Some(0),
            kind: kind.into(),
            phase: ChallengePhase::AwaitingResolver,
        }
    }

    #[test]
    fn grades_against_difficulty() {
        assert_eq!(SkillCheckResolver::grade(12, 12), ConflictOutcome::Success);
        assert_eq!(SkillCheckResolver::grade(7, 12), ConflictOutcome::Partial);
        assert_eq!(SkillCheckResolver::grade(6, 12), ConflictOutcome::Failure);
    }

    #[test]
    fn skill_check_adds_attribute() {
        let content = content();
        let config = GameConfig::default();
        let mut state = GameRuntimeState::new_game(1, &content, &config).unwrap();
        state.player.resources.set("wits", 4);
        let definition = ChallengeDefinition {
            kind: ChallengeDefinition::SKILL_CHECK.into(),
            difficulty: 15,
            attribute: Some("wits".into()),
            ..ChallengeDefinition::default()
        };
        let challenge = challenge(ChallengeDefinition::SKILL_CHECK);
        let ctx = ResolveContext {
            content: &content,
            config: &config,
            state: &state,
            challenge: &challenge,
            definition: &definition,
        };
        // Raw draw 9 rolls a 10; 10 + 4 = 14 is one short.
        let mut rng = FixedRng(9);
        let Resolution::Outcome(outcome) = SkillCheckResolver.resolve(ctx, &mut rng).unwrap() else {
            panic!("skill check must resolve immediately");
        };
        assert_eq!(outcome, ConflictOutcome::Partial);
    }

    #[test]
    fn combat_resolver_opens_session() {
        let content = content();
        let config = GameConfig::default();
        let state = GameRuntimeState::new_game(1, &content, &config).unwrap();
        let definition = ChallengeDefinition::combat("wolf");
        let challenge = challenge(ChallengeDefinition::COMBAT);
        let ctx = ResolveContext {
            content: &content,
            config: &config,
            state: &state,
            challenge: &challenge,
            definition: &definition,
        };
        let mut rng = FixedRng(0);
        let Resolution::Interactive(session) = CombatResolver.resolve(ctx, &mut rng).unwrap()
        else {
            panic!("combat must open a session");
        };
        assert_eq!(session.snapshot().enemy, "wolf");
        assert_eq!(session.snapshot().challenge.phase, ChallengePhase::InCombat);
    }

    #[test]
    fn combat_without_enemy_is_content_error() {
        let content = content();
        let config = GameConfig::default();
        let state = GameRuntimeState::new_game(1, &content, &config).unwrap();
        let definition = ChallengeDefinition {
            kind: ChallengeDefinition::COMBAT.into(),
            ..ChallengeDefinition::default()
        };
        let challenge = challenge(ChallengeDefinition::COMBAT);
        let ctx = ResolveContext {
            content: &content,
            config: &config,
            state: &state,
            challenge: &challenge,
            definition: &definition,
        };
        assert!(CombatResolver.resolve(ctx, &mut FixedRng(0)).is_err());
    }

    #[test]
    fn default_registry_routes_builtin_kinds() {
        let mut registry = ResolverRegistry::default();
        assert!(registry.get("combat").is_some());
        assert!(registry.get("skill_check").is_some());
        assert!(registry.get("riddle").is_none());
        assert!(registry.unregister("skill_check"));
        assert_eq!(registry.kinds().collect::<Vec<_>>(), vec!["combat"]);
    }
}
