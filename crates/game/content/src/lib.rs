//! Data-driven content definitions and loaders.
//!
//! This crate houses the static data a table brings to a session and the
//! loaders that read it from disk:
//! - Actor sheets (ability modifiers, defenses, healing surges)
//! - Scene snapshots (data-driven via RON or JSON)
//! - Grid configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime's host collaborators; the targeting core
//! only ever sees the resulting [`tactics_core::Scene`] and
//! [`tactics_core::GridConfig`] values.

pub mod sheets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use sheets::{Ability, ActorSheet, Defense, HitPoints, SurgePool};

#[cfg(feature = "loaders")]
pub use loaders::{ActorLoader, ConfigLoader, ContentFactory, SceneLoader};
