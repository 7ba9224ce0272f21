use std::time::Duration;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::availability::AvailabilityGateway;
use crate::gateway::fixture::client::FixtureAvailabilityGateway;
use crate::gateway::http::client::HttpAvailabilityGateway;
use crate::gateway::GatewayVia;

pub async fn create_gateway(config: &Configuration, via: &GatewayVia) -> LibraryResult<Box<dyn AvailabilityGateway>> {
    match via {
        GatewayVia::Http { origin } => {
            let timeout = Duration::from_secs(config.http_timeout_secs);
            Ok(Box::new(HttpAvailabilityGateway::new(origin.as_str(), timeout)?))
        }
        GatewayVia::Fixture { path } => {
            Ok(Box::new(FixtureAvailabilityGateway::load(path).await?))
        }
    }
}
