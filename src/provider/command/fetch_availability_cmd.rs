use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::dto::{AvailabilityPayload, ItemId};
use crate::provider::domain::ProviderService;

pub struct FetchAvailabilityCommand {
    provider_service: Box<dyn ProviderService>,
}

impl FetchAvailabilityCommand {
    pub fn new(provider_service: Box<dyn ProviderService>) -> Self {
        Self {
            provider_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchAvailabilityCommandRequest {
    pub mode: String,
    pub ids: Vec<ItemId>,
}

impl FetchAvailabilityCommandRequest {
    // ids arrive comma separated in the last path segment
    pub fn new(mode: &str, ids: &str) -> Self {
        Self {
            mode: mode.to_string(),
            ids: ids.split(',').map(str::trim).filter(|id| !id.is_empty()).map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct FetchAvailabilityCommandResponse {
    pub records: AvailabilityPayload,
}

impl FetchAvailabilityCommandResponse {
    pub fn new(records: AvailabilityPayload) -> Self {
        Self {
            records,
        }
    }
}

#[async_trait]
impl Command<FetchAvailabilityCommandRequest, FetchAvailabilityCommandResponse> for FetchAvailabilityCommand {
    async fn execute(&self, req: FetchAvailabilityCommandRequest) -> Result<FetchAvailabilityCommandResponse, CommandError> {
        self.provider_service.find_availability(req.mode.as_str(), &req.ids)
            .await.map_err(CommandError::from).map(FetchAvailabilityCommandResponse::new)
    }
}
