use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::availability::domain::AvailabilityService;
use crate::availability::domain::model::{ActivationReport, ActivationSettings};
use crate::core::command::{Command, CommandError};

pub struct ActivateCommand {
    availability_service: Box<dyn AvailabilityService>,
}

impl ActivateCommand {
    pub fn new(availability_service: Box<dyn AvailabilityService>) -> Self {
        Self {
            availability_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivateCommandRequest {
    pub settings: ActivationSettings,
}

impl ActivateCommandRequest {
    pub fn new(settings: ActivationSettings) -> Self {
        Self {
            settings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivateCommandResponse {
    pub report: ActivationReport,
}

impl ActivateCommandResponse {
    pub fn new(report: ActivationReport) -> Self {
        Self {
            report,
        }
    }
}

#[async_trait]
impl Command<ActivateCommandRequest, ActivateCommandResponse> for ActivateCommand {
    async fn execute(&self, req: ActivateCommandRequest) -> Result<ActivateCommandResponse, CommandError> {
        self.availability_service.activate(&req.settings)
            .await.map_err(CommandError::from).map(ActivateCommandResponse::new)
    }
}
