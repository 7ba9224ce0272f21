use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::items::dto::AvailabilityPayload;
use crate::utils::date::serializer;

pub const MATERIALS_STATUS: &str = "materials_status";

// StatusEvent is handed to listeners after a fetched batch was merged into the cache
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct StatusEvent {
    pub event_id: String,
    pub name: String,
    pub mode: String,
    pub payload: AvailabilityPayload,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl StatusEvent {
    pub fn materials_status(mode: &str, payload: &AvailabilityPayload) -> Self {
        StatusEvent {
            event_id: Uuid::new_v4().to_string(),
            name: MATERIALS_STATUS.to_string(),
            mode: mode.to_string(),
            payload: payload.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.payload.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::core::events::{MATERIALS_STATUS, StatusEvent};
    use crate::items::dto::AvailabilityPayload;

    #[tokio::test]
    async fn test_should_build_materials_status() {
        let mut payload = AvailabilityPayload::new();
        payload.insert("a".to_string(), json!({"available": true}));
        payload.insert("b".to_string(), json!({"reservable": true}));
        let event = StatusEvent::materials_status("items", &payload);
        assert_eq!(MATERIALS_STATUS, event.name.as_str());
        assert_eq!("items", event.mode.as_str());
        assert_eq!(vec!["a".to_string(), "b".to_string()], event.item_ids());
        assert!(!event.event_id.is_empty());
    }

    #[tokio::test]
    async fn test_should_serialize_event() {
        let event = StatusEvent::materials_status("periodical", &AvailabilityPayload::new());
        let json = serde_json::to_value(&event).expect("should serialize event");
        assert_eq!("materials_status", json["name"]);
        assert!(json["created_at"].is_string());
    }
}
