//! Host collaborator errors.

use tactics_core::{ActorId, ErrorSeverity, GameError, TokenId};

/// Host collaborator slots, named for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Collaborator {
    Actors,
    Health,
    Rolls,
    Effects,
    Combat,
    User,
    Vfx,
    Chat,
    Notices,
}

/// Errors reported by, or about, host collaborators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host was assembled without this collaborator.
    #[error("{0} collaborator not available")]
    NotAvailable(Collaborator),

    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("token {0} not found")]
    TokenNotFound(TokenId),

    /// The collaborator refused the request.
    #[error("{collaborator} rejected the request: {reason}")]
    Rejected {
        collaborator: Collaborator,
        reason: String,
    },
}

impl HostError {
    pub fn rejected(collaborator: Collaborator, reason: impl Into<String>) -> Self {
        Self::Rejected {
            collaborator,
            reason: reason.into(),
        }
    }
}

impl GameError for HostError {
    fn severity(&self) -> ErrorSeverity {
        use HostError::*;
        match self {
            // Missing collaborators are wiring mistakes - nothing to retry
            NotAvailable(_) => ErrorSeverity::Fatal,
            ActorNotFound(_) | TokenNotFound(_) => ErrorSeverity::Validation,
            Rejected { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use HostError::*;
        match self {
            NotAvailable(_) => "HOST_NOT_AVAILABLE",
            ActorNotFound(_) => "HOST_ACTOR_NOT_FOUND",
            TokenNotFound(_) => "HOST_TOKEN_NOT_FOUND",
            Rejected { .. } => "HOST_REJECTED",
        }
    }
}
