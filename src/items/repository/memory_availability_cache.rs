use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use crate::core::repository::{AvailabilityStore, CacheEntry};
use crate::items::dto::StatusRecord;

#[derive(Debug, Default)]
pub struct MemoryAvailabilityCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryAvailabilityCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl AvailabilityStore for MemoryAvailabilityCache {
    fn get(&self, id: &str) -> CacheEntry {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(id).cloned().unwrap_or(CacheEntry::Unresolved)
    }

    fn mark_pending(&self, id: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.entry(id.to_string()).or_insert(CacheEntry::Pending);
    }

    fn resolve(&self, id: &str, record: StatusRecord) {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(CacheEntry::Resolved(_)) = entries.get(id) {
            debug!(item_id = id, "overwriting resolved availability");
        }
        entries.insert(id.to_string(), CacheEntry::Resolved(record));
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}
