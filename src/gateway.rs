pub mod availability;
pub mod events;
pub mod factory;
pub mod fixture;
pub mod http;
pub mod logs;

use std::path::PathBuf;

#[derive(Debug, PartialEq, Clone)]
pub enum GatewayVia {
    Http { origin: String },
    Fixture { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::gateway::GatewayVia;

    #[tokio::test]
    async fn test_should_create_gateway_via() {
        let _ = GatewayVia::Http { origin: "http://localhost".to_string() };
        let _ = GatewayVia::Fixture { path: PathBuf::from("fixture.json") };
    }
}
