use std::sync::Arc;
use tracing::debug;
use crate::availability::domain::model::{AggregatedStatus, DisplayGroup, Rendered};
use crate::core::domain::Labels;
use crate::core::library::{GroupKind, RESERVATION_PREFIX};
use crate::core::repository::AvailabilityStore;
use crate::display::page::Page;
use crate::items::dto::Holdings;

pub const PENDING_CLASS: &str = "pending";
pub const PROCESSED_CLASS: &str = "processed";
pub const AVAILABLE_CLASS: &str = "available";
pub const RESERVABLE_CLASS: &str = "reservable";
pub const HIDDEN_CLASS: &str = "hidden";
pub const TITLE_ATTRIBUTE: &str = "title";

/// Writes the aggregated status of a display group into the page.
///
/// Indicator groups get status classes and a title on their own region and may
/// reveal the reservation control of their first item. Holdings groups render
/// branch level detail for their last item. The updater only decorates
/// existing regions and never hides a reservation control again.
pub struct DisplayUpdater {
    page: Arc<dyn Page>,
    labels: Labels,
}

impl DisplayUpdater {
    pub fn new(page: Arc<dyn Page>, labels: &Labels) -> Self {
        Self {
            page,
            labels: labels.clone(),
        }
    }

    pub fn mark_pending(&self, group_id: &str) {
        self.page.add_class(group_id, PENDING_CLASS);
    }

    pub fn display(&self, group_id: &str, group: &DisplayGroup,
                          status: &AggregatedStatus, store: &dyn AvailabilityStore) -> Rendered {
        if !self.page.has_region(group_id) {
            debug!(group_id, "display region is missing from the page");
            return Rendered::MissingRegion;
        }
        match group.kind {
            GroupKind::Indicator => {
                let rendered = self.update_availability(group_id, status);
                if let Some(first) = group.first() {
                    self.update_reservation(format!("{}{}", RESERVATION_PREFIX, first).as_str(), status);
                }
                rendered
            }
            GroupKind::Holdings => {
                self.update_holdings(group_id, group, status, store)
            }
        }
    }

    fn update_availability(&self, id: &str, status: &AggregatedStatus) -> Rendered {
        self.page.remove_class(id, PENDING_CLASS);
        self.page.add_class(id, PROCESSED_CLASS);

        if status.raw.available {
            self.page.add_class(id, AVAILABLE_CLASS);
        }
        if status.raw.reservable {
            self.page.add_class(id, RESERVABLE_CLASS);
        }

        let state = status.state();
        self.page.set_attribute(id, TITLE_ATTRIBUTE, state.label(&self.labels).as_str());
        Rendered::Indicator(state)
    }

    fn update_reservation(&self, id: &str, status: &AggregatedStatus) {
        if !status.show_reservation_button() {
            return;
        }
        if self.page.has_region(id) {
            self.page.remove_class(id, HIDDEN_CLASS);
        } else {
            debug!(reservation_id = id, "reservation region is missing from the page");
        }
    }

    fn update_holdings(&self, id: &str, group: &DisplayGroup,
                       status: &AggregatedStatus, store: &dyn AvailabilityStore) -> Rendered {
        let Some(item_id) = group.representative() else {
            return Rendered::Nothing;
        };
        let entry = store.get(item_id);
        let Some(record) = entry.record().filter(|r| r.has_holdings()) else {
            return Rendered::Nothing;
        };

        let length = record.display_holdings().map(Holdings::len).unwrap_or_default();
        match &record.html {
            Some(html) if record.total_count > 0 => {
                self.page.append_html(id, format!("<h2>{}</h2>", self.labels.holdings_heading).as_str());
                self.page.append_html(id, html.as_str());
                match self.update_availability(id, status) {
                    Rendered::Indicator(state) => Rendered::HoldingsStatus(state),
                    other => other,
                }
            }
            _ if length > 0 => {
                debug!(group_id = id, item_id = item_id.as_str(), "holdings without rendered markup");
                self.page.append_html(id, format!("<h2>{}</h2>", self.labels.no_holdings).as_str());
                Rendered::NoHoldings
            }
            _ => Rendered::Nothing,
        }
    }
}
