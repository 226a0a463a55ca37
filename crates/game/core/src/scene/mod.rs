//! Read-only view of the placed entities in the active scene.
//!
//! The host's scene is captured as a [`Scene`] snapshot and injected into an
//! [`EntityIndex`] at call time; nothing in this crate reads ambient state.
mod index;
mod resolver;
mod types;

pub use index::EntityIndex;
pub use resolver::{Character, EntityResolver};
pub use types::{ActorId, Disposition, PlacedEntity, Scene, TokenId};
