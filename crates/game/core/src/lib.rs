//! Spatial targeting and selection for grid-based tactical combat.
//!
//! `tactics-core` turns a caster's position and a power's range/area rules
//! into a concrete, validated set of affected actors. Everything here is pure
//! and synchronous: the host scene is injected as a read-only snapshot and
//! interactive picking is modelled as explicit state machines that an async
//! driver (see the `tactics-runtime` crate) feeds with user input.
//!
//! Modules are organized leaf-first:
//! - [`grid`] converts raw coordinates to grid cells and measures distance
//! - [`scene`] holds the scene snapshot, the [`EntityIndex`] and actor resolution
//! - [`targeting`] builds and evaluates [`TargetQuery`] values and drives picks
pub mod config;
pub mod error;
pub mod grid;
pub mod scene;
pub mod targeting;

pub use config::{DiagonalRule, GridConfig};
pub use error::{ErrorSeverity, GameError, TargetingError};
pub use grid::{Anchor, Coordinate, GridMetric, SelfSquare};
pub use scene::{
    ActorId, Character, Disposition, EntityIndex, EntityResolver, PlacedEntity, Scene, TokenId,
};
pub use targeting::{
    CharacterSelection, CharacterStep, FactionFilter, PickOutcome, PickStep, PointPickState,
    PointSelection, Rejection, Selection, TargetQuery,
};
