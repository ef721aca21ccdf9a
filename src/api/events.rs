//! Broadcast events and the fan-out hub
//!
//! Every event is created once, published once, and never mutated after
//! hand-off. The hub fans events out to all live subscribers without
//! letting any one of them stall the publisher: each subscriber owns a
//! bounded queue, sends are non-blocking, and a subscriber whose queue
//! is full or gone is deregistered instead of waited on.

use crate::types::MemoryCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;
use uuid::Uuid;

/// Event type discriminant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventType {
    /// Streaming session opened; always the first frame on the wire
    Connection {
        message: String,
        timestamp: DateTime<Utc>,
    },
    /// A record was created in the store
    MemoryAdded {
        record_id: String,
        category: MemoryCategory,
        timestamp: DateTime<Utc>,
    },
    /// A search ran against the store
    MemorySearch {
        query: String,
        result_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// Liveness signal emitted on idle streaming sessions
    Heartbeat { timestamp: DateTime<Utc> },
}

/// Event wrapper with a stable id for wire-level deduplication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event ID
    pub id: String,
    /// Event payload
    #[serde(flatten)]
    pub event_type: EventType,
}

impl Event {
    /// Create new event
    pub fn new(event_type: EventType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
        }
    }

    /// Create connection event
    pub fn connection() -> Self {
        Self::new(EventType::Connection {
            message: "MCP server connected".to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Create memory added event
    pub fn memory_added(record_id: String, category: MemoryCategory) -> Self {
        Self::new(EventType::MemoryAdded {
            record_id,
            category,
            timestamp: Utc::now(),
        })
    }

    /// Create memory search event
    pub fn memory_search(query: String, result_count: usize) -> Self {
        Self::new(EventType::MemorySearch {
            query,
            result_count,
            timestamp: Utc::now(),
        })
    }

    /// Create heartbeat event
    pub fn heartbeat() -> Self {
        Self::new(EventType::Heartbeat {
            timestamp: Utc::now(),
        })
    }
}

/// Subscriber identifier inside the hub
pub type SubscriberId = Uuid;

/// Fan-out hub distributing events to all live streaming sessions
///
/// The subscriber set is shared between publishers (every dispatch that
/// produces an event) and sessions (subscribe/unsubscribe). Publishing
/// snapshots the set under a read lock, releases it, then pushes without
/// blocking; dead entries are pruned afterwards under a write lock.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    capacity: usize,
    subscribers: RwLock<HashMap<SubscriberId, mpsc::Sender<Event>>>,
}

impl EventHub {
    /// Create a hub whose subscriber queues hold `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                capacity,
                subscribers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a new subscriber
    ///
    /// The returned receiver is owned by the session for its connection's
    /// lifetime; the guard deregisters the subscriber when dropped.
    pub fn subscribe(&self) -> (SubscriberGuard, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(self.inner.capacity);
        let id = Uuid::new_v4();

        self.inner.subscribers.write().unwrap().insert(id, tx);
        debug!("Subscriber {} registered", id);

        (
            SubscriberGuard {
                id,
                hub: self.clone(),
            },
            rx,
        )
    }

    /// Remove a subscriber; a no-op when it was never registered or is
    /// already gone
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self
            .inner
            .subscribers
            .write()
            .unwrap()
            .remove(&id)
            .is_some()
        {
            debug!("Subscriber {} deregistered", id);
        }
    }

    /// Deliver an event to every live subscriber, in publish order per
    /// subscriber, and return how many received it
    ///
    /// Never blocks and never errors: a subscriber that cannot accept
    /// the event without waiting is treated as disconnected and removed.
    pub fn publish(&self, event: Event) -> usize {
        let snapshot: Vec<(SubscriberId, mpsc::Sender<Event>)> = {
            let subscribers = self.inner.subscribers.read().unwrap();
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut dead = Vec::new();

        for (id, tx) in snapshot {
            match tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => dead.push(id),
            }
        }

        if !dead.is_empty() {
            let mut subscribers = self.inner.subscribers.write().unwrap();
            for id in dead {
                if subscribers.remove(&id).is_some() {
                    debug!("Subscriber {} dropped (queue full or closed)", id);
                }
            }
        }

        delivered
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().unwrap().len()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Registration handle held by a streaming session
///
/// Dropping the guard deregisters the subscriber, so a session that ends
/// for any reason releases its hub slot.
pub struct SubscriberGuard {
    id: SubscriberId,
    hub: EventHub,
}

impl SubscriberGuard {
    /// The subscriber id this guard controls
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
