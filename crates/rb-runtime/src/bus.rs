//! Presentation events.
//!
//! The runtime never talks to a UI directly. It publishes [`GameEvent`]s to
//! an [`EventSink`]; the production sink is a broadcast [`EventBus`] and
//! tests substitute a [`RecordingSink`].

use std::sync::{Arc, Mutex};

use rb_core::{ChatChoice, ChatMessage, Stage};
use rb_mechanics::CheckResult;
use rb_save::SlotId;
use tokio::sync::broadcast;

/// Something a presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The stage moved.
    StageChanged {
        /// Previous stage.
        from: Stage,
        /// New stage.
        to: Stage,
    },
    /// A line landed in the transcript.
    MessageRevealed(ChatMessage),
    /// The player has choices to make.
    OptionsPublished(Vec<ChatChoice>),
    /// Shake the screen.
    ScreenJitter {
        /// Effect strength.
        intensity: u8,
    },
    /// Draw the rabbit.
    AsciiRabbit,
    /// The chat surface closed.
    ChatClosed,
    /// The handbook sidebar opened.
    SidebarOpened,
    /// A slot was written.
    Saved {
        /// Which slot.
        slot: SlotId,
    },
    /// A slot was restored.
    Loaded {
        /// Which slot.
        slot: SlotId,
    },
    /// A skill check was rolled.
    CheckRolled(CheckResult),
    /// Boss pressure was shrugged off.
    HitDodged {
        /// The winning check total.
        total: i32,
    },
}

/// Receives published events.
pub trait EventSink {
    /// Deliver one event. Delivery is best-effort.
    fn publish(&self, event: GameEvent);
}

/// Broadcast bus. Every subscriber sees every event published after it
/// subscribed.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a bus whose subscribers lag after `capacity` unread events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: GameEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("no subscribers for game event");
        }
    }
}

/// Keeps every event in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_without_subscribers_drops_silently() {
        let bus = EventBus::new();
        bus.publish(GameEvent::AsciiRabbit);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn bus_delivers_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(GameEvent::ChatClosed);
        bus.publish(GameEvent::ScreenJitter { intensity: 2 });
        assert_eq!(rx.try_recv().unwrap(), GameEvent::ChatClosed);
        assert_eq!(
            rx.try_recv().unwrap(),
            GameEvent::ScreenJitter { intensity: 2 }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn recording_clones_share_log() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.publish(GameEvent::SidebarOpened);
        assert_eq!(handle.events(), vec![GameEvent::SidebarOpened]);
        assert_eq!(handle.take().len(), 1);
        assert!(sink.events().is_empty());
    }
}
