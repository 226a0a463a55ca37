//! Async runtime for interactive targeting and power scripts.
//!
//! This crate drives the pure selection state machines of `tactics-core`
//! with user input, and wires power scripts to the host application through
//! collaborator traits. Consumers plug in a [`PickSource`] and a [`Host`],
//! then run a power from [`powers`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the error type and the pick/notice seams
//! - [`picker`] runs the pick protocol with one warning per rejected pick
//! - [`host`] defines the collaborator traits and an in-memory host
//! - [`events`] provides a topic-based bus for notices and chat
//! - [`combat`], [`effects`], [`chat`] and [`vfx`] are the building blocks
//!   power scripts are written with
//! - [`powers`] holds the power scripts themselves
pub mod api;
pub mod chat;
pub mod combat;
pub mod effects;
pub mod events;
pub mod host;
pub mod picker;
pub mod powers;
pub mod vfx;

mod utils;

pub use api::{
    Notice, NoticeLevel, Notifier, PickRequest, PickSource, Result, RuntimeError,
    ScriptedPickSource,
};
pub use chat::ChatMessage;
pub use combat::{AttackOptions, AttackOutcome, AttackResult, DamageResult, Power};
pub use effects::{DurationKind, EffectData, EffectLibrary, EffectTemplate};
pub use events::{Event, EventBus, Topic};
pub use host::{Collaborator, Host, HostError, InMemoryHost};
pub use picker::InteractivePicker;
pub use powers::{PowerContext, PowerReport, PowerSummary};
pub use vfx::{PowerSource, VfxSequence, VfxStep};
