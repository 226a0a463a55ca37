//! Target queries and the interactive selection protocol.
//!
//! A [`TargetQuery`] is an immutable value describing where a power measures
//! from and how far it reaches. Evaluating it against an [`EntityIndex`]
//! yields deduplicated [`Character`]s. Interactive picks are modelled as
//! [`PointSelection`] and [`CharacterSelection`] state machines: the caller
//! feeds them [`PickOutcome`]s and reacts to the returned step.
//!
//! [`EntityIndex`]: crate::scene::EntityIndex
//! [`Character`]: crate::scene::Character
mod query;
mod selection;

pub use query::{FactionFilter, TargetQuery};
pub use selection::{
    CharacterSelection, CharacterStep, PickOutcome, PickStep, PointPickState, PointSelection,
    Rejection, Selection,
};
