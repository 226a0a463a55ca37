//! Topic-based event bus for runtime events.
//!
//! Notices and chat lines are published to topics, and front-ends subscribe
//! only to the topics they display.

mod bus;

pub use bus::{Event, EventBus, Topic};
