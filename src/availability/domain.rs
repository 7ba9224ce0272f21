pub mod aggregator;
pub mod fetcher;
pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::availability::domain::model::{ActivationReport, ActivationSettings, AggregatedStatus};
use crate::core::library::LibraryResult;
use crate::gateway::events::StatusListener;
use crate::items::dto::ItemId;

#[async_trait]
pub trait AvailabilityService: Sync + Send {
    // resolves and displays every group of the settings
    async fn activate(&self, settings: &ActivationSettings) -> LibraryResult<ActivationReport>;

    // current status of a set of items as known to the session cache
    fn status(&self, ids: &[ItemId]) -> AggregatedStatus;

    // registers a collaborator notified after every fetched batch
    fn subscribe(&mut self, listener: Box<dyn StatusListener>);
}
