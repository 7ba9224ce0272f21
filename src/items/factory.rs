use std::sync::Arc;
use crate::core::repository::AvailabilityStore;
use crate::items::repository::memory_availability_cache::MemoryAvailabilityCache;

// one cache per page session, shared by every activation of that session
pub fn create_availability_cache() -> Arc<dyn AvailabilityStore> {
    Arc::new(MemoryAvailabilityCache::new())
}
