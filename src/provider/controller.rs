use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::provider::command::fetch_availability_cmd::{FetchAvailabilityCommand, FetchAvailabilityCommandRequest, FetchAvailabilityCommandResponse};
use crate::provider::factory;

pub async fn fetch_availability(
    State(state): State<AppState>,
    Path((mode, ids)): Path<(String, String)>) -> Result<Json<FetchAvailabilityCommandResponse>, ServerError> {
    let req = FetchAvailabilityCommandRequest::new(mode.as_str(), ids.as_str());
    let svc = factory::create_provider_service(&state);
    let res = FetchAvailabilityCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ding_availability/:mode/:ids", get(fetch_availability))
        .with_state(state)
}

// starts the provider on an ephemeral port and returns its origin
#[cfg(test)]
pub async fn serve_fixture(payload: crate::items::dto::AvailabilityPayload) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind listener");
    listener.set_nonblocking(true).expect("should set non blocking");
    let addr = listener.local_addr().expect("should have local addr");
    let app = build_router(AppState::new(payload));
    let server = axum::Server::from_tcp(listener).expect("should build server")
        .serve(app.into_make_service());
    tokio::spawn(server);
    format!("http://{}", addr)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use crate::provider::controller::serve_fixture;

    #[tokio::test]
    async fn test_should_serve_availability() {
        let records = json!({"a": {"available": true}, "b": {"reservable": true}});
        let origin = serve_fixture(records.as_object().cloned().unwrap_or_default()).await;
        let res = reqwest::get(format!("{}/ding_availability/items/a,c", origin))
            .await.expect("should call provider");
        assert!(res.status().is_success());
        let body: Value = res.json().await.expect("should parse body");
        assert_eq!(json!({"a": {"available": true}}), body);
    }

    #[tokio::test]
    async fn test_should_reject_empty_ids() {
        let origin = serve_fixture(Default::default()).await;
        let res = reqwest::get(format!("{}/ding_availability/items/,", origin))
            .await.expect("should call provider");
        assert_eq!(400, res.status().as_u16());
    }
}
