use crate::env::{ChallengeDefinition, ContentOracle, Consequences, EventChoice, EventDefinition};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ChallengeRef, GameRuntimeState, ResourceId};

/// Why a choice cannot be taken.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("choice {index} out of range (event has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("choice requires {resource} >= {required} (have {available})")]
    ResourceTooLow {
        resource: ResourceId,
        required: i32,
        available: i32,
    },

    #[error("choice requires flag '{0}'")]
    MissingFlag(String),

    #[error("choice requires balance in [{min}, {max}] (have {balance})")]
    BalanceOutOfRange { min: i32, max: i32, balance: i32 },
}

impl GameError for ChoiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfRange { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "CHOICE_OUT_OF_RANGE",
            Self::ResourceTooLow { .. } => "CHOICE_RESOURCE_TOO_LOW",
            Self::MissingFlag(_) => "CHOICE_MISSING_FLAG",
            Self::BalanceOutOfRange { .. } => "CHOICE_BALANCE_OUT_OF_RANGE",
        }
    }
}

/// A validated choice and what it sets in motion.
#[derive(Clone, Copy, Debug)]
pub struct ChoiceResolution<'c> {
    pub event: &'c EventDefinition,
    pub index: usize,
    pub choice: &'c EventChoice,
    pub consequences: &'c Consequences,
    /// Triggered challenge, surfaced as a reference rather than resolved here.
    /// The first element is `Some(index)` for a choice-level challenge.
    pub challenge: Option<(Option<usize>, &'c ChallengeDefinition)>,
}

impl ChoiceResolution<'_> {
    pub fn challenge_ref(&self) -> Option<ChallengeRef> {
        self.challenge.map(|(choice, definition)| ChallengeRef {
            event: self.event.id.clone(),
            choice,
            kind: definition.kind.clone(),
            phase: crate::state::ChallengePhase::AwaitingResolver,
        })
    }
}

/// Validates choice `index` of `event` against the current state.
pub fn resolve_choice<'c>(
    event: &'c EventDefinition,
    index: usize,
    state: &GameRuntimeState,
) -> Result<ChoiceResolution<'c>, ChoiceError> {
    let choice = event.choices.get(index).ok_or(ChoiceError::OutOfRange {
        index,
        len: event.choices.len(),
    })?;

    let requirements = &choice.requirements;
    for (resource, required) in &requirements.min_resources {
        let available = state.player.resources.get(resource);
        if available < *required {
            return Err(ChoiceError::ResourceTooLow {
                resource: resource.clone(),
                required: *required,
                available,
            });
        }
    }
    if let Some(flag) = requirements
        .required_flags
        .iter()
        .find(|flag| !state.has_flag(flag))
    {
        return Err(ChoiceError::MissingFlag(flag.clone()));
    }
    let min = requirements.min_balance.unwrap_or(i32::MIN);
    let max = requirements.max_balance.unwrap_or(i32::MAX);
    let balance = state.player.balance;
    if !(min..=max).contains(&balance) {
        return Err(ChoiceError::BalanceOutOfRange { min, max, balance });
    }

    Ok(ChoiceResolution {
        event,
        index,
        choice,
        consequences: &choice.consequences,
        challenge: event.challenge_for(index),
    })
}

/// Looks up the definition a [`ChallengeRef`] points at.
pub fn challenge_definition<'c>(
    content: &'c dyn ContentOracle,
    challenge: &ChallengeRef,
) -> Option<&'c ChallengeDefinition> {
    let event = content.event(&challenge.event)?;
    match challenge.choice {
        Some(index) => event.choices.get(index)?.challenge.as_ref(),
        None => event.challenge.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ChoiceRequirements;

    fn state() -> GameRuntimeState {
        let mut state = GameRuntimeState {
            seed: 0,
            nonce: 0,
            rng: crate::env::PcgRng::from_seed(0),
            world: Default::default(),
            player: Default::default(),
            events: Default::default(),
            quests: Default::default(),
            ending: None,
        };
        state.player.resources.set("gold", 3);
        state.world.flags.insert("oath".into());
        state
    }

    fn event() -> EventDefinition {
        EventDefinition {
            id: "bridge".into(),
            choices: vec![
                EventChoice {
                    id: "pay".into(),
                    requirements: ChoiceRequirements {
                        min_resources: [("gold".to_string(), 5)].into(),
                        ..ChoiceRequirements::default()
                    },
                    ..EventChoice::default()
                },
                EventChoice {
                    id: "swear".into(),
                    requirements: ChoiceRequirements {
                        required_flags: vec!["oath".into()],
                        ..ChoiceRequirements::default()
                    },
                    avoids_challenge: true,
                    ..EventChoice::default()
                },
                EventChoice {
                    id: "fight".into(),
                    ..EventChoice::default()
                },
            ],
            challenge: Some(ChallengeDefinition::combat("troll")),
            ..EventDefinition::default()
        }
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        let event = event();
        assert_eq!(
            resolve_choice(&event, 3, &state()).unwrap_err(),
            ChoiceError::OutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn resource_requirement_is_checked() {
        let event = event();
        let err = resolve_choice(&event, 0, &state()).unwrap_err();
        assert!(matches!(err, ChoiceError::ResourceTooLow { required: 5, available: 3, .. }));
    }

    #[test]
    fn avoiding_choice_skips_event_challenge() {
        let event = event();
        let resolution = resolve_choice(&event, 1, &state()).unwrap();
        assert!(resolution.challenge.is_none());
    }

    #[test]
    fn event_challenge_is_surfaced_as_reference() {
        let event = event();
        let resolution = resolve_choice(&event, 2, &state()).unwrap();
        let challenge = resolution.challenge_ref().unwrap();
        assert_eq!(challenge.event, "bridge");
        assert_eq!(challenge.choice, None);
        assert_eq!(challenge.kind, ChallengeDefinition::COMBAT);
    }
}
