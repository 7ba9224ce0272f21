use std::sync::Arc;
use tracing::{debug, warn};
use crate::availability::domain::model::GroupMapping;
use crate::core::library::LibraryResult;
use crate::core::repository::AvailabilityStore;
use crate::gateway::availability::{AvailabilityGateway, AvailabilityRequest};
use crate::items::dto::{AvailabilityPayload, ItemId, StatusRecord};
use crate::utils::json::parse_bool_value;

// FetchPlan is the outcome of collecting the ids of one activation
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub requested: Vec<ItemId>,
    pub needs_fetch: Vec<ItemId>,
}

impl FetchPlan {
    pub fn is_empty(&self) -> bool {
        self.needs_fetch.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.needs_fetch.iter().any(|other| other == id)
    }
}

pub struct FetchCoordinator {
    store: Arc<dyn AvailabilityStore>,
    gateway: Box<dyn AvailabilityGateway>,
}

impl FetchCoordinator {
    pub fn new(store: Arc<dyn AvailabilityStore>, gateway: Box<dyn AvailabilityGateway>) -> Self {
        Self {
            store,
            gateway,
        }
    }

    // Collects the ids nobody asked for yet and marks them pending right away, so an
    // overlapping activation does not request them a second time.
    pub fn plan(&self, mapping: &GroupMapping) -> FetchPlan {
        let requested = mapping.item_ids();
        let needs_fetch: Vec<ItemId> = requested.iter()
            .filter(|id| self.store.get(id).is_unresolved())
            .cloned()
            .collect();
        for id in &needs_fetch {
            self.store.mark_pending(id);
        }
        debug!(requested = requested.len(), needs_fetch = needs_fetch.len(), "collected item ids");
        FetchPlan { requested, needs_fetch }
    }

    pub async fn fetch(&self, request: &AvailabilityRequest) -> LibraryResult<AvailabilityPayload> {
        self.gateway.fetch(request).await
    }

    // Resolves every returned record. A truthy value that is not an object counts as a
    // record with all flags off, falsy values and ids missing from the payload stay pending.
    pub fn merge(&self, plan: &FetchPlan, payload: &AvailabilityPayload) -> Vec<ItemId> {
        let mut resolved = vec![];
        for (id, value) in payload {
            let record = match StatusRecord::from_value(value) {
                Some(record) => record,
                None if parse_bool_value(value) => {
                    debug!(item_id = id.as_str(), "availability record is not an object");
                    StatusRecord::default()
                }
                None => {
                    warn!(item_id = id.as_str(), "skipping empty availability record");
                    continue;
                }
            };
            self.store.resolve(id, record);
            resolved.push(id.to_string());
        }
        let missing = plan.needs_fetch.iter().filter(|id| !payload.contains_key(id.as_str())).count();
        if missing > 0 {
            debug!(missing, "requested ids absent from availability response");
        }
        resolved
    }
}
