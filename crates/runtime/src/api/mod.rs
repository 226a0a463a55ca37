//! Public runtime API surface.
//!
//! This module gathers the seams power scripts and front-ends plug into: the
//! error type, the pick source that stands in for the UI cursor, and the
//! notifier that displays warnings.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{Notice, NoticeLevel, Notifier, PickRequest, PickSource, ScriptedPickSource};
