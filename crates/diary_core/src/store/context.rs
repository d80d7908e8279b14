//! Storage contexts and cross-context change notifications.
//!
//! A `StorageContext` plays the role of one open window over shared storage.
//! Contexts created with `sibling()` share the same slot store and change hub,
//! so a write in one becomes a `StorageEvent` for subscribers in the others.
//!
//! # Invariants
//! - Events are never delivered back to the context that caused them.
//! - Writes that do not change the stored value produce no event.
//! - Dropping a `Subscription` removes it from the hub.

use super::{SlotStore, StorageEvent, StoreResult};
use log::debug;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Stable identity of one storage context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ContextId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Subscriber {
    id: u64,
    context: ContextId,
    key: String,
    sender: Sender<StorageEvent>,
}

/// Fan-out point for slot change notifications.
#[derive(Default)]
pub struct ChangeHub {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions across all contexts.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn subscribe(self: &Arc<Self>, context: ContextId, key: &str) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = channel();
        self.lock().push(Subscriber {
            id,
            context,
            key: key.to_string(),
            sender,
        });
        debug!("event=slot_subscribe module=store status=ok key={key} context={context}");
        Subscription {
            id,
            key: key.to_string(),
            hub: Arc::clone(self),
            receiver,
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().retain(|subscriber| subscriber.id != id);
    }

    fn publish(&self, origin: ContextId, event: &StorageEvent) -> usize {
        let subscribers = self.lock();
        let mut delivered = 0;
        for subscriber in subscribers
            .iter()
            .filter(|s| s.context != origin && s.key == event.key)
        {
            // A closed receiver only means the subscription is being dropped.
            if subscriber.sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped registration for change events on one key.
///
/// Unsubscribes from the hub when dropped.
pub struct Subscription {
    id: u64,
    key: String,
    hub: Arc<ChangeHub>,
    receiver: Receiver<StorageEvent>,
}

impl Subscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Takes every event received since the last call, oldest first.
    pub fn drain(&self) -> Vec<StorageEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}

/// One execution context over a shared slot store.
///
/// Cloning keeps the same identity; use `sibling()` for an independent
/// context that observes this one's writes.
#[derive(Clone)]
pub struct StorageContext {
    id: ContextId,
    store: Arc<dyn SlotStore>,
    hub: Arc<ChangeHub>,
}

impl StorageContext {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self {
            id: ContextId::new(),
            store,
            hub: Arc::new(ChangeHub::new()),
        }
    }

    /// Creates another context over the same store and hub.
    pub fn sibling(&self) -> Self {
        Self {
            id: ContextId::new(),
            store: Arc::clone(&self.store),
            hub: Arc::clone(&self.hub),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn hub(&self) -> &Arc<ChangeHub> {
        &self.hub
    }

    pub fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.store.get(key)
    }

    /// Writes one slot and notifies other contexts when the value changed.
    pub fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let old_value = self.previous_value(key);
        self.store.set(key, value)?;
        if old_value.as_deref() != Some(value) {
            self.announce(StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: Some(value.to_string()),
            });
        }
        Ok(())
    }

    /// Removes one slot and notifies other contexts when it existed.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let old_value = self.previous_value(key);
        self.store.remove(key)?;
        if old_value.is_some() {
            self.announce(StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: None,
            });
        }
        Ok(())
    }

    pub fn subscribe(&self, key: &str) -> Subscription {
        self.hub.subscribe(self.id, key)
    }

    fn previous_value(&self, key: &str) -> Option<String> {
        // The old value only decorates the event; a failed read must not block the write.
        self.store.get(key).ok().flatten()
    }

    fn announce(&self, event: StorageEvent) {
        let delivered = self.hub.publish(self.id, &event);
        debug!(
            "event=slot_change module=store status=ok key={} context={} delivered={delivered}",
            event.key, self.id
        );
    }
}
