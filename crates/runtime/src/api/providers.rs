//! Asynchronous abstraction for sourcing interactive picks.
//!
//! Runtime users plug in [`PickSource`] implementations so the picker can run
//! with a real cursor, a terminal prompt, or a scripted fixture.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tactics_core::{Coordinate, PickOutcome};

use super::errors::{Result, RuntimeError};
use crate::utils::lock;

/// What the cursor is anchored on while the user picks.
#[derive(Clone, Debug, PartialEq)]
pub struct PickRequest {
    pub origin: Coordinate,
    /// Maximum pick distance in squares.
    pub range: u32,
    /// Icon shown on the cursor, if the power has one.
    pub icon: Option<String>,
}

/// Trait for providing pick results to the interactive picker.
///
/// Different implementations can handle:
/// - A host cursor (from UI)
/// - Terminal prompts (CLI)
/// - Scripted/replayed picks (tests)
///
/// A normal cancel is `Ok(PickOutcome::Cancelled)`; `Err` means the source
/// itself failed.
#[async_trait]
pub trait PickSource: Send + Sync {
    async fn pick(&self, request: &PickRequest) -> Result<PickOutcome>;
}

/// Pick source that replays a fixed queue of outcomes.
///
/// Every request is recorded so tests can assert where the cursor was
/// anchored. Once the script runs out the source reports
/// [`RuntimeError::PickSourceClosed`].
#[derive(Debug, Default)]
pub struct ScriptedPickSource {
    script: Mutex<VecDeque<PickOutcome>>,
    requests: Mutex<Vec<PickRequest>>,
}

impl ScriptedPickSource {
    pub fn new(outcomes: impl IntoIterator<Item = PickOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Appends an outcome to the end of the script.
    pub fn push(&self, outcome: PickOutcome) {
        lock(&self.script).push_back(outcome);
    }

    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PickRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl PickSource for ScriptedPickSource {
    async fn pick(&self, request: &PickRequest) -> Result<PickOutcome> {
        lock(&self.requests).push(request.clone());
        lock(&self.script)
            .pop_front()
            .ok_or(RuntimeError::PickSourceClosed)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-facing notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Fire-and-forget display of notices. Never blocks the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_source_replays_then_closes() {
        let source = ScriptedPickSource::new([PickOutcome::Cancelled]);
        let request = PickRequest {
            origin: Coordinate::ORIGIN,
            range: 5,
            icon: None,
        };

        assert_eq!(source.pick(&request).await.unwrap(), PickOutcome::Cancelled);
        assert!(matches!(
            source.pick(&request).await,
            Err(RuntimeError::PickSourceClosed)
        ));
        assert_eq!(source.requests().len(), 2);
    }
}
