use crate::core::controller::AppState;
use crate::provider::domain::ProviderService;
use crate::provider::domain::service::ProviderServiceImpl;

pub fn create_provider_service(state: &AppState) -> Box<dyn ProviderService> {
    Box::new(ProviderServiceImpl::new(state.records.clone()))
}
