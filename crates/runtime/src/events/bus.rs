//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ChallengeEvent, CombatEvent, GameStateEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Committed and rejected actions, game endings
    GameState,
    /// Async resolver dispatch and results
    Challenge,
    /// Combat rounds and results
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::GameState, Topic::Challenge, Topic::Combat];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Challenge(ChallengeEvent),
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Challenge(_) => Topic::Challenge,
            Event::Combat(_) => Topic::Combat,
        }
    }
}

struct Channels {
    game_state: broadcast::Sender<Event>,
    challenge: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Challenge => &self.challenge,
            Topic::Combat => &self.combat,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events published
/// while a topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                game_state: broadcast::channel(capacity).0,
                challenge: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
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

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut challenge = bus.subscribe(Topic::Challenge);

        bus.publish(Event::Challenge(ChallengeEvent::Dispatched {
            kind: "parley".into(),
        }));

        assert!(combat.try_recv().is_err());
        match challenge.recv().await.unwrap() {
            Event::Challenge(ChallengeEvent::Dispatched { kind }) => assert_eq!(kind, "parley"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Challenge(ChallengeEvent::Cancelled {
            kind: "parley".into(),
        }));
    }
}
