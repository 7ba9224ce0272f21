use serde::{Deserialize, Serialize};
use crate::items::dto::StatusRecord;

// CacheEntry is the lifecycle of one item id within a page session
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum CacheEntry {
    Unresolved,
    Pending,
    Resolved(StatusRecord),
}

impl CacheEntry {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, CacheEntry::Unresolved)
    }

    pub fn record(&self) -> Option<&StatusRecord> {
        match self {
            CacheEntry::Resolved(record) => Some(record),
            _ => None,
        }
    }
}

// AvailabilityStore keeps resolved availability for the lifetime of a page session.
// Entries only move forward: Unresolved -> Pending -> Resolved, and a resolved entry
// may be overwritten by a newer record but never goes back to pending.
pub trait AvailabilityStore: Sync + Send {
    // get the entry of an item id
    fn get(&self, id: &str) -> CacheEntry;

    // marks an unresolved id as requested, resolved ids are left untouched
    fn mark_pending(&self, id: &str);

    // stores a record, last write wins
    fn resolve(&self, id: &str, record: StatusRecord);

    // number of known ids
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
