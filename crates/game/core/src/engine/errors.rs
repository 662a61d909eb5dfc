//! Error types for the action pipeline.

use crate::action::ActionError;
use crate::economy::Shortfall;
use crate::env::ContentError;
use crate::error::{ErrorSeverity, GameError};

/// Identifies which pipeline step surfaced a content defect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    Validate,
    Time,
    Action,
    Event,
    Challenge,
    Consequences,
}

/// Errors surfaced while executing an action through the game engine.
///
/// `Rejected` and `Insufficient` come from the validation and economy steps
/// and leave state untouched. `Content` means the content pack is broken; the
/// engine rolls back to the state before the action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("action rejected: {0}")]
    Rejected(#[from] ActionError),

    #[error(transparent)]
    Insufficient(#[from] Shortfall),

    #[error("{stage} failed: {error}")]
    Content {
        stage: PipelineStage,
        error: ContentError,
    },
}

impl ExecuteError {
    pub fn content(stage: PipelineStage, error: ContentError) -> Self {
        Self::Content { stage, error }
    }

    /// True when the action was refused before any state change.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Insufficient(_))
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(error) => error.severity(),
            Self::Insufficient(error) => error.severity(),
            Self::Content { error, .. } => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(error) => error.error_code(),
            Self::Insufficient(error) => error.error_code(),
            Self::Content { error, .. } => error.error_code(),
        }
    }
}

/// Attaches a pipeline stage to content lookups.
pub(crate) trait StageExt<T> {
    fn at(self, stage: PipelineStage) -> Result<T, ExecuteError>;
}

impl<T> StageExt<T> for Result<T, ContentError> {
    fn at(self, stage: PipelineStage) -> Result<T, ExecuteError> {
        self.map_err(|error| ExecuteError::content(stage, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(PipelineStage::Validate.to_string(), "validate");
        assert_eq!(PipelineStage::Consequences.to_string(), "consequences");
    }

    #[test]
    fn only_validation_and_economy_are_rejections() {
        let content = ExecuteError::content(
            PipelineStage::Time,
            ContentError::unknown("curse", "phantom"),
        );
        assert!(!content.is_rejection());
        assert!(content.to_string().starts_with("time failed: "));
    }

    #[test]
    fn content_failures_classify_through_game_error() {
        let error = ExecuteError::content(
            PipelineStage::Event,
            ContentError::unknown("event", "ghost"),
        );
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert!(error.severity().is_internal());
        assert_eq!(error.error_code(), "CONTENT_UNKNOWN_ID");
    }
}
