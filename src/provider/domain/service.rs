use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::core::library::{LibraryError, LibraryResult};
use crate::items::dto::{select_records, AvailabilityPayload, ItemId};
use crate::provider::domain::ProviderService;

pub struct ProviderServiceImpl {
    records: Arc<AvailabilityPayload>,
}

impl ProviderServiceImpl {
    pub fn new(records: Arc<AvailabilityPayload>) -> Self {
        Self {
            records,
        }
    }
}

#[async_trait]
impl ProviderService for ProviderServiceImpl {
    async fn find_availability(&self, mode: &str, ids: &[ItemId]) -> LibraryResult<AvailabilityPayload> {
        if mode.is_empty() {
            return Err(LibraryError::validation("availability mode is missing", Some("400".to_string())));
        }
        if ids.is_empty() {
            return Err(LibraryError::validation("no item ids requested", Some("400".to_string())));
        }
        let payload = select_records(&self.records, ids);
        info!(mode, requested = ids.len(), returned = payload.len(), "serving availability");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::items::dto::AvailabilityPayload;
    use crate::provider::domain::ProviderService;
    use crate::provider::domain::service::ProviderServiceImpl;

    fn sut() -> ProviderServiceImpl {
        let mut records = AvailabilityPayload::new();
        records.insert("a".to_string(), json!({"available": true}));
        ProviderServiceImpl::new(Arc::new(records))
    }

    #[tokio::test]
    async fn test_should_find_availability() {
        let payload = sut().find_availability("items", &["a".to_string(), "b".to_string()])
            .await.expect("should find availability");
        assert_eq!(1, payload.len());
    }

    #[tokio::test]
    async fn test_should_reject_empty_request() {
        assert!(sut().find_availability("items", &[]).await.is_err());
        assert!(sut().find_availability("", &["a".to_string()]).await.is_err());
    }
}
