use std::path::Path;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use crate::core::library::LibraryResult;
use crate::gateway::availability::{AvailabilityGateway, AvailabilityRequest};
use crate::items::dto::{parse_payload, select_records, AvailabilityPayload};

/// Serves availability from a fixed payload, e.g. a JSON file captured from a
/// real source. Ids missing from the fixture are left out of the answer just
/// like a partial response would.
#[derive(Debug, Clone)]
pub struct FixtureAvailabilityGateway {
    records: AvailabilityPayload,
}

impl FixtureAvailabilityGateway {
    pub fn new(records: AvailabilityPayload) -> Self {
        Self {
            records,
        }
    }

    pub async fn load(path: &Path) -> LibraryResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(json.as_str())?;
        Ok(Self::new(parse_payload(value)?))
    }

    pub fn select(&self, ids: &[String]) -> AvailabilityPayload {
        select_records(&self.records, ids)
    }
}

#[async_trait]
impl AvailabilityGateway for FixtureAvailabilityGateway {
    async fn fetch(&self, request: &AvailabilityRequest) -> LibraryResult<AvailabilityPayload> {
        let payload = self.select(&request.ids);
        debug!(mode = request.mode.as_str(), requested = request.ids.len(), returned = payload.len(),
            "availability served from fixture");
        Ok(payload)
    }
}
