//! In-memory slot store with an optional byte quota.

use super::{SlotStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Volatile slot store. Useful for tests and throwaway sessions.
///
/// When a quota is set, the sum of key and value lengths across all slots
/// may not exceed it; offending writes fail with `QuotaExceeded` and leave
/// the previous value in place.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: Mutex::new(BTreeMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.slots.lock().map_err(|_| StoreError::Poisoned("memory"))
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.lock()?;
        if let Some(quota_bytes) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len() + stored.len())
                .sum();
            let requested_bytes = others + key.len() + value.len();
            if requested_bytes > quota_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    requested_bytes,
                    quota_bytes,
                });
            }
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
