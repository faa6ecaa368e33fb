//! Notification fan-out for game session events.
//!
//! A process-wide publish/subscribe bus keyed by event topic. Publishing
//! is fire-and-forget: the publisher never blocks on subscriber delivery,
//! and a failed delivery never fails the originating operation. Each
//! subscriber has its own bounded buffer — one that fills up is
//! disconnected rather than applying back-pressure to publishers.
//!
//! Delivery to a given subscriber follows publish order for its topic.
//! There is no ordering guarantee across topics and no delivery guarantee
//! across process restarts (the registry is in-memory only).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use trigrid_model::GameSession;

/// The fixed event categories the hub fans out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A second player joined a multiplayer session.
    PlayerJoined,
    /// A move was applied to a multiplayer session.
    MoveMade,
    /// A session was ended.
    GameEnded,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerJoined => write!(f, "player-joined"),
            Self::MoveMade => write!(f, "move-made"),
            Self::GameEnded => write!(f, "game-ended"),
        }
    }
}

/// Configuration for the hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Per-subscriber buffer capacity. A subscriber whose buffer is full
    /// when an event arrives is disconnected.
    pub buffer: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { buffer: 64 }
    }
}

struct Subscriber {
    id: u64,
    sender: mpsc::Sender<GameSession>,
}

/// Process-local publish/subscribe bus for session snapshots.
///
/// Shared by reference (`Arc`) between the engine (publisher) and the
/// transport layer (subscriber side). The registry is a lock-protected
/// map; the lock is held only to walk the subscriber list, never across
/// an await on delivery.
pub struct NotificationHub {
    config: HubConfig,
    next_id: AtomicU64,
    topics: Mutex<HashMap<Topic, Vec<Subscriber>>>,
}

impl NotificationHub {
    /// Creates a hub with the given configuration.
    pub fn new(config: HubConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1),
            topics: Mutex::new(HashMap::new()),
        }
    }

    /// Registers an independent listener for one topic.
    ///
    /// The subscription lives until it is dropped or [`Subscription::cancel`]ed;
    /// the hub prunes the dead registration on the next publish.
    pub async fn subscribe(&self, topic: Topic) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.config.buffer);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut topics = self.topics.lock().await;
        topics
            .entry(topic)
            .or_default()
            .push(Subscriber { id, sender });

        tracing::debug!(%topic, subscriber = id, "subscriber registered");
        Subscription {
            id,
            topic,
            receiver,
        }
    }

    /// Delivers a session snapshot to every live subscriber of the topic.
    ///
    /// Never blocks and never fails: closed subscribers are pruned, and a
    /// subscriber whose buffer is full is dropped from the registry.
    pub async fn publish(&self, topic: Topic, session: &GameSession) {
        let mut topics = self.topics.lock().await;
        let Some(subscribers) = topics.get_mut(&topic) else {
            tracing::debug!(%topic, game_id = %session.id, "no subscribers");
            return;
        };

        subscribers.retain(|sub| match sub.sender.try_send(session.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    %topic,
                    subscriber = sub.id,
                    "subscriber buffer full, disconnecting"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(%topic, subscriber = sub.id, "subscriber gone, pruning");
                false
            }
        });

        tracing::debug!(
            %topic,
            game_id = %session.id,
            delivered = subscribers.len(),
            "event published"
        );
    }

    /// Number of registered subscribers for a topic.
    ///
    /// Counts registrations that have not been pruned yet, so it may
    /// briefly include subscribers that were dropped since the last
    /// publish.
    pub async fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics
            .lock()
            .await
            .get(&topic)
            .map_or(0, |subs| subs.len())
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

/// A live listener registration for one topic.
///
/// Receives snapshots in publish order. Dropping the subscription closes
/// it; the publisher prunes the registration on its next publish for the
/// topic.
pub struct Subscription {
    id: u64,
    topic: Topic,
    receiver: mpsc::Receiver<GameSession>,
}

impl Subscription {
    /// The topic this subscription listens on.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// An identifier for this registration, unique within the hub.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the next event. Returns `None` once the subscription has
    /// been disconnected by the hub and the buffer is drained.
    pub async fn recv(&mut self) -> Option<GameSession> {
        self.receiver.recv().await
    }

    /// Returns a buffered event without waiting, if one is ready.
    pub fn try_recv(&mut self) -> Option<GameSession> {
        self.receiver.try_recv().ok()
    }

    /// Cancels the registration. Equivalent to dropping the subscription.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigrid_model::{
        GameId, GameStatus, GameType, GameWinner, PlayerId, Seat,
    };

    fn session(id: &str) -> GameSession {
        GameSession {
            id: GameId(id.into()),
            kind: GameType::MultiPlayer,
            status: GameStatus::Active,
            winner: GameWinner::Unknown,
            first: Seat {
                id: PlayerId("alice".into()),
                name: "Alice".into(),
            },
            second: None,
            first_moves: Vec::new(),
            second_moves: Vec::new(),
            all_moves: Vec::new(),
            turn: None,
            winning_line: None,
            version: 1,
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_no_op() {
        let hub = NotificationHub::default();
        hub.publish(Topic::MoveMade, &session("g-1")).await;
        assert_eq!(hub.subscriber_count(Topic::MoveMade).await, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_in_publish_order() {
        let hub = NotificationHub::default();
        let mut sub = hub.subscribe(Topic::MoveMade).await;

        hub.publish(Topic::MoveMade, &session("g-1")).await;
        hub.publish(Topic::MoveMade, &session("g-2")).await;
        hub.publish(Topic::MoveMade, &session("g-3")).await;

        assert_eq!(sub.recv().await.unwrap().id, GameId("g-1".into()));
        assert_eq!(sub.recv().await.unwrap().id, GameId("g-2".into()));
        assert_eq!(sub.recv().await.unwrap().id, GameId("g-3".into()));
    }

    #[tokio::test]
    async fn test_topics_are_independent() {
        let hub = NotificationHub::default();
        let mut joins = hub.subscribe(Topic::PlayerJoined).await;
        let mut moves = hub.subscribe(Topic::MoveMade).await;

        hub.publish(Topic::PlayerJoined, &session("g-join")).await;
        hub.publish(Topic::MoveMade, &session("g-move")).await;

        assert_eq!(joins.recv().await.unwrap().id, GameId("g-join".into()));
        assert_eq!(moves.recv().await.unwrap().id, GameId("g-move".into()));
        // Nothing crossed over.
        assert!(joins.try_recv().is_none());
        assert!(moves.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_receive() {
        let hub = NotificationHub::default();
        let mut a = hub.subscribe(Topic::GameEnded).await;
        let mut b = hub.subscribe(Topic::GameEnded).await;

        hub.publish(Topic::GameEnded, &session("g-1")).await;

        assert_eq!(a.recv().await.unwrap().id, GameId("g-1".into()));
        assert_eq!(b.recv().await.unwrap().id, GameId("g-1".into()));
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned_on_next_publish() {
        let hub = NotificationHub::default();
        let sub = hub.subscribe(Topic::MoveMade).await;
        assert_eq!(hub.subscriber_count(Topic::MoveMade).await, 1);

        drop(sub);
        hub.publish(Topic::MoveMade, &session("g-1")).await;

        assert_eq!(hub.subscriber_count(Topic::MoveMade).await, 0);
    }

    #[tokio::test]
    async fn test_cancel_behaves_like_drop() {
        let hub = NotificationHub::default();
        let sub = hub.subscribe(Topic::GameEnded).await;

        sub.cancel();
        hub.publish(Topic::GameEnded, &session("g-1")).await;

        assert_eq!(hub.subscriber_count(Topic::GameEnded).await, 0);
    }

    #[tokio::test]
    async fn test_slow_subscriber_is_disconnected_not_blocking() {
        let hub = NotificationHub::new(HubConfig { buffer: 2 });
        let mut slow = hub.subscribe(Topic::MoveMade).await;
        let mut healthy = hub.subscribe(Topic::MoveMade).await;

        // The healthy subscriber drains as events arrive; the slow one
        // never does.
        hub.publish(Topic::MoveMade, &session("g-1")).await;
        hub.publish(Topic::MoveMade, &session("g-2")).await;
        assert_eq!(healthy.recv().await.unwrap().id, GameId("g-1".into()));
        assert_eq!(healthy.recv().await.unwrap().id, GameId("g-2".into()));

        // The third publish overflows the slow buffer and disconnects it.
        hub.publish(Topic::MoveMade, &session("g-3")).await;
        assert_eq!(hub.subscriber_count(Topic::MoveMade).await, 1);

        // Buffered events are still readable, then the stream ends.
        assert_eq!(slow.recv().await.unwrap().id, GameId("g-1".into()));
        assert_eq!(slow.recv().await.unwrap().id, GameId("g-2".into()));
        assert!(slow.recv().await.is_none());

        // The healthy subscriber keeps receiving.
        assert_eq!(healthy.recv().await.unwrap().id, GameId("g-3".into()));
    }

    #[tokio::test]
    async fn test_subscription_ids_are_unique() {
        let hub = NotificationHub::default();
        let a = hub.subscribe(Topic::MoveMade).await;
        let b = hub.subscribe(Topic::PlayerJoined).await;
        assert_ne!(a.id(), b.id());
    }
}
