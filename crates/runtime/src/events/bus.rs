//! Per-topic broadcast channels for match events.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use arena_core::LogEntry;

use super::types::{BattleEvent, TurnEvent};

/// Event families a subscriber can listen to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Match log lines, in order
    Log,
    /// Battle lifecycle and action results
    Battle,
    /// Turn and active side changes
    Turn,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Log, Topic::Battle, Topic::Turn];
}

/// A published event; its variant decides the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Log(LogEntry),
    Battle(BattleEvent),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Battle(_) => Topic::Battle,
            Event::Turn(_) => Topic::Turn,
        }
    }
}

/// Fan-out bus with one broadcast channel per [`Topic`].
///
/// Cloning shares the channels. Late subscribers only see events published
/// after they subscribed.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Bus with room for 256 unread events per topic.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Bus with room for `capacity` unread events per topic (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            tracing::trace!(?topic, "event dropped, nobody listening");
        }
    }

    /// Receiver for a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created in `with_capacity`.
            None => broadcast::channel(1).1,
        }
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::Side;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);

        bus.publish(Event::Battle(BattleEvent::Reset));
        bus.publish(Event::Turn(TurnEvent {
            turn: 2,
            active_side: Side::Human,
        }));

        match turns.recv().await.unwrap() {
            Event::Turn(event) => assert_eq!(event.turn, 2),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Turn(TurnEvent {
            turn: 3,
            active_side: Side::Opponent,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
