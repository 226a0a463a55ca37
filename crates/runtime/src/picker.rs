//! Async driver for the interactive pick protocol.
//!
//! The selection state machines live in `tactics-core`; this module feeds
//! them with outcomes from a [`PickSource`] and reports every rejection to
//! the user through a [`Notifier`]. Rejected picks loop without a bound, so
//! only a cancel, an accepted pick, or a failing source ends a session.
use tactics_core::{
    CharacterSelection, CharacterStep, Character, EntityIndex, GridMetric, PickStep,
    PointSelection, Rejection, Selection, TargetQuery,
};
use tracing::{debug, warn};

use crate::api::{Notice, Notifier, PickRequest, PickSource, Result};

pub struct InteractivePicker<'a> {
    source: &'a dyn PickSource,
    notifier: &'a dyn Notifier,
}

impl<'a> InteractivePicker<'a> {
    pub fn new(source: &'a dyn PickSource, notifier: &'a dyn Notifier) -> Self {
        Self { source, notifier }
    }

    fn reject(&self, rejection: Rejection) {
        warn!(%rejection, "pick rejected");
        self.notifier.notify(Notice::warning(rejection.to_string()));
    }

    fn request(points: &PointSelection, icon: Option<&str>) -> PickRequest {
        PickRequest {
            origin: points.origin(),
            range: points.range(),
            icon: icon.map(str::to_owned),
        }
    }

    /// Asks for one square within the query's range of its single origin.
    ///
    /// The selected value is the query re-anchored on the picked square.
    /// Fails with `InvalidOriginCount` before any pick unless the query has
    /// exactly one origin.
    pub async fn select_point(
        &self,
        query: &TargetQuery,
        metric: &GridMetric,
        icon: Option<&str>,
    ) -> Result<Selection<TargetQuery>> {
        let mut session = PointSelection::begin(query)?;
        let request = Self::request(&session, icon);

        loop {
            let outcome = self.source.pick(&request).await?;
            match session.resolve(outcome, metric) {
                PickStep::Retry(rejection) => self.reject(rejection),
                PickStep::Accepted(area) => {
                    debug!(state = ?session.state(), "point pick accepted");
                    return Ok(Selection::Selected(area));
                }
                PickStep::Cancelled => {
                    debug!("point pick cancelled");
                    return Ok(Selection::Cancelled);
                }
            }
        }
    }

    /// Asks for a square until its area holds at least one matching actor.
    pub async fn select_characters(
        &self,
        query: &TargetQuery,
        index: &EntityIndex<'_>,
        icon: Option<&str>,
    ) -> Result<Selection<Vec<Character>>> {
        let mut session = CharacterSelection::begin(query)?;
        let request = Self::request(session.points(), icon);

        loop {
            let outcome = self.source.pick(&request).await?;
            match session.resolve(outcome, index) {
                CharacterStep::Retry(rejection) => self.reject(rejection),
                CharacterStep::Selected(characters) => {
                    debug!(count = characters.len(), "character pick accepted");
                    return Ok(Selection::Selected(characters));
                }
                CharacterStep::Cancelled => {
                    debug!("character pick cancelled");
                    return Ok(Selection::Cancelled);
                }
            }
        }
    }
}
