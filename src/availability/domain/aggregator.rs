use crate::availability::domain::model::{AggregatedStatus, RawStatus};
use crate::core::repository::AvailabilityStore;
use crate::items::dto::ItemId;

// Combines the cached records of a group into one status. Ids that are not resolved
// yet count as false, so a group without any resolved item is unavailable.
pub fn aggregate(ids: &[ItemId], store: &dyn AvailabilityStore) -> AggregatedStatus {
    let raw = ids.iter()
        .filter_map(|id| store.get(id).record().cloned())
        .fold(RawStatus::default(), |acc, record| RawStatus {
            available: acc.available || record.available,
            reservable: acc.reservable || record.reservable,
            show_reservation_button: acc.show_reservation_button || record.show_reservation_button,
        });
    AggregatedStatus::from_raw(raw)
}
