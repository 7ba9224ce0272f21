use std::sync::Arc;
use crate::availability::domain::AvailabilityService;
use crate::availability::domain::fetcher::FetchCoordinator;
use crate::availability::domain::service::AvailabilityServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::AvailabilityStore;
use crate::display::page::Page;
use crate::display::updater::DisplayUpdater;
use crate::gateway::factory::create_gateway;
use crate::gateway::GatewayVia;

pub async fn create_availability_service(config: &Configuration, store: Arc<dyn AvailabilityStore>,
                                                page: Arc<dyn Page>, via: &GatewayVia) -> LibraryResult<Box<dyn AvailabilityService>> {
    let gateway = create_gateway(config, via).await?;
    let fetcher = FetchCoordinator::new(store.clone(), gateway);
    let updater = DisplayUpdater::new(page, &config.labels);
    Ok(Box::new(AvailabilityServiceImpl::new(config, store, fetcher, updater)))
}
