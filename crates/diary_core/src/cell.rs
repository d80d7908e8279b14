//! Typed persistent state bound to one storage slot.
//!
//! # Responsibility
//! - Load a typed value from a named slot, falling back to a default.
//! - Persist every update as JSON before exposing it in memory.
//! - Apply changes written to the same slot by other storage contexts.
//!
//! # Invariants
//! - After a successful `set`/`update`/`clear`, `get()` reflects it at once.
//! - Storage and serialization failures are logged and swallowed; the
//!   in-memory value is left unchanged and nothing is retried.
//! - The cell holds its change subscription for its whole lifetime.

use crate::store::{StorageContext, StorageEvent, Subscription};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct PersistentCell<T> {
    key: String,
    default: T,
    value: T,
    context: StorageContext,
    subscription: Subscription,
}

impl<T> PersistentCell<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Binds a cell to slot `key` of `context`, reading the current value.
    pub fn open(context: &StorageContext, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let subscription = context.subscribe(&key);
        let value = load_slot(context, &key, &default);
        Self {
            key,
            default,
            value,
            context: context.clone(),
            subscription,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and persists it.
    pub fn set(&mut self, value: T) {
        let serialized = match serde_json::to_string(&value) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(
                    "event=cell_write module=cell status=error key={} error_code=serialize_failed error={}",
                    self.key, err
                );
                return;
            }
        };

        match self.context.write(&self.key, &serialized) {
            Ok(()) => self.value = value,
            Err(err) => warn!(
                "event=cell_write module=cell status=error key={} error_code=write_failed error={}",
                self.key, err
            ),
        }
    }

    /// Derives the next value from the current one and persists it.
    pub fn update(&mut self, next: impl FnOnce(&T) -> T) {
        let value = next(&self.value);
        self.set(value);
    }

    /// Removes the slot and resets the in-memory value to the default.
    pub fn clear(&mut self) {
        match self.context.remove(&self.key) {
            Ok(()) => self.value = self.default.clone(),
            Err(err) => warn!(
                "event=cell_clear module=cell status=error key={} error_code=remove_failed error={}",
                self.key, err
            ),
        }
    }

    /// Re-reads the slot from storage, discarding pending notifications.
    pub fn reload(&mut self) {
        let _ = self.subscription.drain();
        self.value = load_slot(&self.context, &self.key, &self.default);
    }

    /// Applies change notifications from other contexts.
    ///
    /// Returns how many notifications were applied; the last one wins.
    pub fn sync_external(&mut self) -> usize {
        let events = self.subscription.drain();
        for event in &events {
            self.value = self.decode_event(event);
        }
        events.len()
    }

    fn decode_event(&self, event: &StorageEvent) -> T {
        let Some(raw) = event.new_value.as_deref() else {
            return self.default.clone();
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=cell_sync module=cell status=error key={} error_code=parse_failed error={}",
                    self.key, err
                );
                self.default.clone()
            }
        }
    }
}

fn load_slot<T: DeserializeOwned + Clone>(context: &StorageContext, key: &str, default: &T) -> T {
    let raw = match context.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default.clone(),
        Err(err) => {
            warn!(
                "event=cell_read module=cell status=error key={key} error_code=read_failed error={err}"
            );
            return default.clone();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=cell_read module=cell status=error key={key} error_code=parse_failed error={err}"
            );
            default.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PersistentCell;
    use crate::store::{MemorySlotStore, StorageContext};
    use std::sync::Arc;

    #[test]
    fn set_is_visible_immediately_and_persisted_as_json() {
        let context = StorageContext::new(Arc::new(MemorySlotStore::new()));
        let mut cell = PersistentCell::open(&context, "counter", 0_u32);
        cell.set(7);
        assert_eq!(*cell.get(), 7);
        assert_eq!(context.read("counter").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn update_receives_previous_value() {
        let context = StorageContext::new(Arc::new(MemorySlotStore::new()));
        let mut cell = PersistentCell::open(&context, "list", Vec::<String>::new());
        cell.update(|prev| {
            let mut next = prev.clone();
            next.push("a".to_string());
            next
        });
        cell.update(|prev| {
            let mut next = prev.clone();
            next.push("b".to_string());
            next
        });
        assert_eq!(cell.get(), &vec!["a".to_string(), "b".to_string()]);
    }
}
