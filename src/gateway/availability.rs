use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::items::dto::{AvailabilityPayload, ItemId};

pub const AVAILABILITY_SEGMENT: &str = "ding_availability";

// AvailabilityRequest describes one batched lookup
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRequest {
    pub base_path: String,
    pub path_prefix: String,
    pub mode: String,
    pub ids: Vec<ItemId>,
}

impl AvailabilityRequest {
    pub fn new(base_path: &str, path_prefix: &str, mode: &str, ids: &[ItemId]) -> Self {
        Self {
            base_path: base_path.to_string(),
            path_prefix: path_prefix.to_string(),
            mode: mode.to_string(),
            ids: ids.to_vec(),
        }
    }

    // e.g. /da/ding_availability/items/870970-basis:1,870970-basis:2
    pub fn path(&self) -> String {
        format!("{}{}{}/{}/{}", self.base_path, self.path_prefix, AVAILABILITY_SEGMENT,
                self.mode, self.ids.join(","))
    }
}

#[async_trait]
pub trait AvailabilityGateway: Sync + Send {
    async fn fetch(&self, request: &AvailabilityRequest) -> LibraryResult<AvailabilityPayload>;
}
