//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn changes and game over
    Turn,
    /// Unit moves, attacks, hits, deaths and rests
    Unit,
    /// Floating combat text
    Presentation,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Turn, Topic::Unit, Topic::Presentation];

    const fn index(self) -> usize {
        match self {
            Topic::Turn => 0,
            Topic::Unit => 1,
            Topic::Presentation => 2,
        }
    }
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::TurnChanged { .. } | GameEvent::GameOver { .. } => Topic::Turn,
            GameEvent::MoveStarted { .. }
            | GameEvent::MoveEnded { .. }
            | GameEvent::AttackStarted { .. }
            | GameEvent::ProjectileLaunched { .. }
            | GameEvent::UnitHit { .. }
            | GameEvent::UnitDied { .. }
            | GameEvent::UnitRested { .. } => Topic::Unit,
            GameEvent::TextPopup { .. } => Topic::Presentation,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels for every topic exist from construction
/// on, so publishing never allocates routing state.
pub struct EventBus {
    channels: Arc<[broadcast::Sender<GameEvent>; 3]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels[topic.index()].receiver_count()
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
    use game_core::{TileId, UnitId};

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut units = bus.subscribe(Topic::Unit);
        let mut turns = bus.subscribe(Topic::Turn);

        bus.publish(GameEvent::MoveEnded {
            unit: UnitId(1),
            tile: TileId(4),
        });

        assert_eq!(
            units.try_recv().unwrap(),
            GameEvent::MoveEnded {
                unit: UnitId(1),
                tile: TileId(4)
            }
        );
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let mut rx = clone.subscribe(Topic::Presentation);
        bus.publish(GameEvent::TextPopup {
            text: "3 DMG".into(),
            anchor: [0.0, 0.0],
        });
        assert!(rx.try_recv().is_ok());
        assert_eq!(bus.subscriber_count(Topic::Presentation), 1);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(GameEvent::UnitRested {
            unit: UnitId(0),
            recovered: 1.0,
        });
        let multi = bus.subscribe_multiple(&[Topic::Turn, Topic::Unit]);
        assert_eq!(multi.len(), 2);
    }
}
