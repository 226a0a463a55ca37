//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the targeting core and from host collaborators so
//! power scripts can bubble them up with consistent context. User
//! cancellation is never an error; it travels as a normal value.
use tactics_core::{ErrorSeverity, GameError, TargetingError};
use thiserror::Error;

use crate::host::HostError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Targeting(#[from] TargetingError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("pick source closed before a selection was made")]
    PickSourceClosed,

    #[error("roll '{formula}' was cancelled")]
    RollCancelled { formula: String },

    #[error("there is no ongoing combat")]
    NoActiveCombat,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Targeting(err) => err.severity(),
            RuntimeError::Host(err) => err.severity(),
            RuntimeError::PickSourceClosed => ErrorSeverity::Fatal,
            RuntimeError::RollCancelled { .. } => ErrorSeverity::Recoverable,
            RuntimeError::NoActiveCombat => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Targeting(err) => err.error_code(),
            RuntimeError::Host(err) => err.error_code(),
            RuntimeError::PickSourceClosed => "RUNTIME_PICK_SOURCE_CLOSED",
            RuntimeError::RollCancelled { .. } => "RUNTIME_ROLL_CANCELLED",
            RuntimeError::NoActiveCombat => "RUNTIME_NO_ACTIVE_COMBAT",
        }
    }
}
