use std::fmt;

use super::TargetQuery;
use crate::error::TargetingError;
use crate::grid::{Coordinate, GridMetric};
use crate::scene::{Character, EntityIndex};

/// What the user did with the pick cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickOutcome {
    Picked(Coordinate),
    /// Explicit cancel. A normal outcome, never an error.
    Cancelled,
}

/// Why a pick was turned down. Each rejection is shown to the user once and
/// the pick is retried without limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    OutOfRange { range: u32 },
    EmptySelection,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutOfRange { range } => {
                write!(f, "Please target one square within {range} squares.")
            }
            Rejection::EmptySelection => f.write_str("Please target one valid token."),
        }
    }
}

/// Final result of an interactive selection.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<T> {
    Selected(T),
    Cancelled,
}

impl<T> Selection<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Selection::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        match self {
            Selection::Selected(value) => Selection::Selected(f(value)),
            Selection::Cancelled => Selection::Cancelled,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Selection::Selected(value) => Some(value),
            Selection::Cancelled => None,
        }
    }
}

// ============================================================================
// Point selection
// ============================================================================

/// Observable state of a [`PointSelection`].
///
/// Validation happens inside [`PointSelection::resolve`] and is never
/// observable on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointPickState {
    AwaitingPick,
    Accepted(Coordinate),
    Cancelled,
}

impl PointPickState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PointPickState::AwaitingPick)
    }
}

/// Result of feeding one pick to a [`PointSelection`].
#[derive(Clone, Debug, PartialEq)]
pub enum PickStep {
    /// Pick rejected; notify the user and ask again from the same origin.
    Retry(Rejection),
    /// Pick accepted; the query is anchored at the picked point.
    Accepted(TargetQuery),
    Cancelled,
}

/// Point pick within range of a single origin.
///
/// ```text
/// AwaitingPick --Picked(in range)------> Accepted
///      ^   |----Picked(out of range)--> Retry(OutOfRange)
///      |___|
///          |----Cancelled-------------> Cancelled
/// ```
#[derive(Clone, Debug)]
pub struct PointSelection {
    query: TargetQuery,
    origin: Coordinate,
    state: PointPickState,
}

impl PointSelection {
    /// Starts a pick session. Fails before any pick unless the query has
    /// exactly one origin.
    pub fn begin(query: &TargetQuery) -> Result<Self, TargetingError> {
        let origin = query.single_origin()?;
        Ok(Self {
            query: query.clone(),
            origin,
            state: PointPickState::AwaitingPick,
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn range(&self) -> u32 {
        self.query.range()
    }

    pub fn query(&self) -> &TargetQuery {
        &self.query
    }

    pub fn state(&self) -> PointPickState {
        self.state
    }

    /// Validates one pick.
    ///
    /// Once the session is terminal, further outcomes are ignored and the
    /// terminal step is reported again.
    pub fn resolve(&mut self, outcome: PickOutcome, metric: &GridMetric) -> PickStep {
        match self.state {
            PointPickState::Accepted(point) => return PickStep::Accepted(self.query.anchored_at(point)),
            PointPickState::Cancelled => return PickStep::Cancelled,
            PointPickState::AwaitingPick => {}
        }

        match outcome {
            PickOutcome::Cancelled => {
                self.state = PointPickState::Cancelled;
                PickStep::Cancelled
            }
            PickOutcome::Picked(point) if metric.is_within(self.origin, point, self.query.range()) => {
                self.state = PointPickState::Accepted(point);
                PickStep::Accepted(self.query.anchored_at(point))
            }
            PickOutcome::Picked(_) => PickStep::Retry(Rejection::OutOfRange {
                range: self.query.range(),
            }),
        }
    }

    /// Returns the session to `AwaitingPick` from the same origin.
    pub fn restart(&mut self) {
        self.state = PointPickState::AwaitingPick;
    }
}

// ============================================================================
// Character selection
// ============================================================================

/// Result of feeding one pick to a [`CharacterSelection`].
#[derive(Clone, Debug, PartialEq)]
pub enum CharacterStep {
    Retry(Rejection),
    /// Non-empty set of actors in the area around the accepted point.
    Selected(Vec<Character>),
    Cancelled,
}

/// Point pick that must additionally land on at least one actor.
///
/// An accepted point whose area is empty restarts the point pick; a cancel
/// at the point level ends the whole selection.
#[derive(Clone, Debug)]
pub struct CharacterSelection {
    points: PointSelection,
}

impl CharacterSelection {
    pub fn begin(query: &TargetQuery) -> Result<Self, TargetingError> {
        PointSelection::begin(query).map(|points| Self { points })
    }

    pub fn points(&self) -> &PointSelection {
        &self.points
    }

    pub fn resolve(&mut self, outcome: PickOutcome, index: &EntityIndex<'_>) -> CharacterStep {
        match self.points.resolve(outcome, index.metric()) {
            PickStep::Retry(rejection) => CharacterStep::Retry(rejection),
            PickStep::Cancelled => CharacterStep::Cancelled,
            PickStep::Accepted(area) => {
                let characters = area.evaluate(index);
                if characters.is_empty() {
                    self.points.restart();
                    CharacterStep::Retry(Rejection::EmptySelection)
                } else {
                    CharacterStep::Selected(characters)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ActorId, Disposition, PlacedEntity, Scene, TokenId};

    fn square(col: i32, row: i32) -> Coordinate {
        Coordinate::from((col * 100, row * 100))
    }

    fn scene() -> Scene {
        Scene::new(
            "Ruins",
            vec![
                PlacedEntity::new(
                    TokenId::new("t-grund"),
                    ActorId::new("grund"),
                    "Grund",
                    square(2, 0),
                    Disposition::FRIENDLY,
                ),
                PlacedEntity::new(
                    TokenId::new("t-orc"),
                    ActorId::new("orc"),
                    "Orc",
                    square(4, 0),
                    Disposition::HOSTILE,
                ),
            ],
        )
    }

    #[test]
    fn rejection_texts() {
        assert_eq!(
            Rejection::OutOfRange { range: 5 }.to_string(),
            "Please target one square within 5 squares."
        );
        assert_eq!(
            Rejection::EmptySelection.to_string(),
            "Please target one valid token."
        );
    }

    #[test]
    fn multiple_origins_fail_before_any_pick() {
        let query = TargetQuery::from_origin([square(0, 0), square(1, 1)]);
        assert_eq!(
            PointSelection::begin(&query).unwrap_err(),
            TargetingError::InvalidOriginCount { count: 2 }
        );
        assert!(CharacterSelection::begin(&TargetQuery::from_origin([])).is_err());
    }

    #[test]
    fn out_of_range_picks_retry_until_accepted() {
        let metric = GridMetric::default();
        let query = TargetQuery::from_point(square(0, 0)).with_range(3).with_radius(1);
        let mut pick = PointSelection::begin(&query).unwrap();

        for far in [square(4, 0), square(0, 9)] {
            assert_eq!(
                pick.resolve(PickOutcome::Picked(far), &metric),
                PickStep::Retry(Rejection::OutOfRange { range: 3 })
            );
            assert_eq!(pick.state(), PointPickState::AwaitingPick);
        }

        let PickStep::Accepted(area) = pick.resolve(PickOutcome::Picked(square(3, 0)), &metric) else {
            panic!("pick within range must be accepted");
        };
        assert_eq!(area.single_origin(), Ok(square(3, 0)));
        assert_eq!(area.range(), 3);
        assert_eq!(area.radius(), 1);
        assert_eq!(pick.state(), PointPickState::Accepted(square(3, 0)));
    }

    #[test]
    fn cancel_is_terminal() {
        let metric = GridMetric::default();
        let mut pick = PointSelection::begin(&TargetQuery::from_point(square(0, 0)).with_range(5)).unwrap();

        assert_eq!(pick.resolve(PickOutcome::Cancelled, &metric), PickStep::Cancelled);
        assert!(pick.state().is_terminal());
        // Later picks do not revive the session.
        assert_eq!(
            pick.resolve(PickOutcome::Picked(square(1, 0)), &metric),
            PickStep::Cancelled
        );
    }

    #[test]
    fn empty_area_restarts_point_pick() {
        let scene = scene();
        let index = EntityIndex::new(Some(&scene), GridMetric::default());
        let query = TargetQuery::from_point(square(0, 0)).with_range(5);
        let mut selection = CharacterSelection::begin(&query).unwrap();

        assert_eq!(
            selection.resolve(PickOutcome::Picked(square(9, 9)), &index),
            CharacterStep::Retry(Rejection::OutOfRange { range: 5 })
        );
        assert_eq!(
            selection.resolve(PickOutcome::Picked(square(0, 3)), &index),
            CharacterStep::Retry(Rejection::EmptySelection)
        );
        assert_eq!(selection.points().state(), PointPickState::AwaitingPick);

        let CharacterStep::Selected(found) =
            selection.resolve(PickOutcome::Picked(Coordinate::new(250.0, 40.0)), &index)
        else {
            panic!("pick on a token must select it");
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Grund");
    }

    #[test]
    fn cancel_during_character_selection_propagates() {
        let scene = scene();
        let index = EntityIndex::new(Some(&scene), GridMetric::default());
        let mut selection =
            CharacterSelection::begin(&TargetQuery::from_point(square(0, 0)).with_range(5)).unwrap();

        assert_eq!(
            selection.resolve(PickOutcome::Picked(square(1, 1)), &index),
            CharacterStep::Retry(Rejection::EmptySelection)
        );
        assert_eq!(
            selection.resolve(PickOutcome::Cancelled, &index),
            CharacterStep::Cancelled
        );
    }

    #[test]
    fn selection_helpers() {
        let picked: Selection<u32> = Selection::Selected(2);
        assert_eq!(picked.clone().map(|n| n * 2), Selection::Selected(4));
        assert_eq!(picked.into_option(), Some(2));
        assert!(Selection::<u32>::Cancelled.is_cancelled());
    }
}
