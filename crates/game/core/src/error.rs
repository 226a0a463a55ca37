//! Common error infrastructure for tactics-core.
//!
//! Only programmer errors and explicit "not found" outcomes are errors here.
//! User cancellation is a normal [`Selection::Cancelled`] value, and rejected
//! picks are retried by the selection state machines, so neither ever shows
//! up as an `Err`.
//!
//! [`Selection::Cancelled`]: crate::targeting::Selection::Cancelled

use crate::scene::ActorId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: named actor absent from the current scene
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: point pick requested from several origins
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics errors.
///
/// Provides a uniform interface for error classification across the core and
/// the runtime crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by targeting operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingError {
    /// A point pick was requested from a query that does not have exactly one origin.
    #[error("cannot select a point from {count} origins (exactly one required)")]
    InvalidOriginCount { count: usize },

    /// No token in the active scene carries the given name.
    #[error("no token named '{0}' in the active scene")]
    NameNotFound(String),

    /// The actor has no token placed in the active scene.
    #[error("actor {0} has no token in the active scene")]
    ActorNotPlaced(ActorId),
}

impl GameError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        use TargetingError::*;
        match self {
            InvalidOriginCount { .. } => ErrorSeverity::Validation,
            NameNotFound(_) | ActorNotPlaced(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use TargetingError::*;
        match self {
            InvalidOriginCount { .. } => "TARGETING_INVALID_ORIGIN_COUNT",
            NameNotFound(_) => "TARGETING_NAME_NOT_FOUND",
            ActorNotPlaced(_) => "TARGETING_ACTOR_NOT_PLACED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_count_is_a_validation_error() {
        let err = TargetingError::InvalidOriginCount { count: 2 };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.error_code(), "TARGETING_INVALID_ORIGIN_COUNT");
        assert_eq!(
            err.to_string(),
            "cannot select a point from 2 origins (exactly one required)"
        );
    }

    #[test]
    fn missing_entities_are_recoverable() {
        let err = TargetingError::NameNotFound("Grund".into());
        assert!(err.severity().is_recoverable());
        assert!(!err.severity().is_internal());
    }
}
