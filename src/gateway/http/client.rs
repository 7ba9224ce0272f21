use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::availability::{AvailabilityGateway, AvailabilityRequest};
use crate::items::dto::{parse_payload, AvailabilityPayload};

/// Fetches availability from the data source over HTTP.
///
/// The request path is resolved against `origin`, which is empty when the
/// base path of the settings is already absolute.
#[derive(Debug, Clone)]
pub struct HttpAvailabilityGateway {
    http: reqwest::Client,
    origin: String,
}

impl HttpAvailabilityGateway {
    pub fn new(origin: &str, timeout: Duration) -> LibraryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, request: &AvailabilityRequest) -> String {
        format!("{}{}", self.origin, request.path())
    }
}

#[async_trait]
impl AvailabilityGateway for HttpAvailabilityGateway {
    async fn fetch(&self, request: &AvailabilityRequest) -> LibraryResult<AvailabilityPayload> {
        let url = self.url(request);
        let response = self.http.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::from_status(url.as_str(), status.as_u16()));
        }
        let body: Value = response.json().await?;
        let payload = parse_payload(body)?;
        debug!(url = url.as_str(), requested = request.ids.len(), returned = payload.len(),
            "availability fetched");
        Ok(payload)
    }
}
