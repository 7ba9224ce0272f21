use std::sync::Arc;
use axum::http::StatusCode;
use crate::core::command::CommandError;
use crate::items::dto::AvailabilityPayload;

#[derive(Debug, Clone)]
pub struct AppState {
    pub records: Arc<AvailabilityPayload>,
}

impl AppState {
    pub fn new(records: AvailabilityPayload) -> AppState {
        AppState {
            records: Arc::new(records),
        }
    }
}

pub type ServerError = (StatusCode, String);

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, ServerError};
    use crate::items::dto::AvailabilityPayload;

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let (status, _) = ServerError::from(CommandError::Validation { message: "test".to_string(), reason_code: None });
        assert_eq!(StatusCode::BAD_REQUEST, status);
        let (status, _) = ServerError::from(CommandError::NotFound { message: "test".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_share_records_between_states() {
        let mut records = AvailabilityPayload::new();
        records.insert("a".to_string(), serde_json::json!({"available": true}));
        let state = AppState::new(records);
        let cloned = state.clone();
        assert_eq!(1, cloned.records.len());
        assert!(std::sync::Arc::ptr_eq(&state.records, &cloned.records));
    }
}
