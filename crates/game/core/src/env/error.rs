use crate::error::{ErrorSeverity, GameError};

/// Broken or missing content.
///
/// Raised by [`ContentRegistry::validate`](super::ContentRegistry::validate)
/// when a pack is loaded, and by the engine if an id still fails to resolve
/// during simulation. Both cases are configuration defects, never player errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("unknown {kind} '{id}'")]
    UnknownId { kind: &'static str, id: String },

    #[error("{kind} '{id}' is defined twice")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{owner} references unknown {kind} '{id}'")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        id: String,
    },

    #[error("{owner}: {reason}")]
    Invalid { owner: String, reason: &'static str },
}

impl ContentError {
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownId {
            kind,
            id: id.into(),
        }
    }

    pub fn dangling(owner: impl Into<String>, kind: &'static str, id: impl Into<String>) -> Self {
        Self::DanglingReference {
            owner: owner.into(),
            kind,
            id: id.into(),
        }
    }

    pub fn invalid(owner: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            owner: owner.into(),
            reason,
        }
    }
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownId { .. } => "CONTENT_UNKNOWN_ID",
            Self::DuplicateId { .. } => "CONTENT_DUPLICATE_ID",
            Self::DanglingReference { .. } => "CONTENT_DANGLING_REFERENCE",
            Self::Invalid { .. } => "CONTENT_INVALID",
        }
    }
}
