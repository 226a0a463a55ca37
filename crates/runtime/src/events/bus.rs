//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::api::{Notice, Notifier};
use crate::chat::ChatMessage;
use crate::host::ChatSink;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// User-facing warnings and info notices
    Notice,
    /// Chat lines posted by powers
    Chat,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Notice(Notice),
    Chat(ChatMessage),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Notice(_) => Topic::Notice,
            Event::Chat(_) => Topic::Chat,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    notice: broadcast::Sender<Event>,
    chat: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            notice: broadcast::channel(capacity).0,
            chat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Notice => &self.notice,
            Topic::Chat => &self.chat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for EventBus {
    fn notify(&self, notice: Notice) {
        self.publish(Event::Notice(notice));
    }
}

impl ChatSink for EventBus {
    fn post(&self, message: ChatMessage) {
        self.publish(Event::Chat(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut notices = bus.subscribe(Topic::Notice);
        let mut chat = bus.subscribe(Topic::Chat);

        bus.notify(Notice::warning("Please target one valid token."));
        bus.post(ChatMessage::new("GM", "Round 2"));

        match notices.recv().await.unwrap() {
            Event::Notice(notice) => assert_eq!(notice.message, "Please target one valid token."),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(chat.recv().await.unwrap(), Event::Chat(_)));
        assert!(notices.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        EventBus::with_capacity(4).notify(Notice::info("nobody listens"));
    }
}
