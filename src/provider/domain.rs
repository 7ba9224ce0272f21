pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::items::dto::{AvailabilityPayload, ItemId};

#[async_trait]
pub trait ProviderService: Sync + Send {
    async fn find_availability(&self, mode: &str, ids: &[ItemId]) -> LibraryResult<AvailabilityPayload>;
}
