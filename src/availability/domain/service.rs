use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::availability::domain::AvailabilityService;
use crate::availability::domain::aggregator::aggregate;
use crate::availability::domain::fetcher::{FetchCoordinator, FetchPlan};
use crate::availability::domain::model::{ActivationReport, ActivationSettings, AggregatedStatus, FetchOutcome, GroupDisplay, GroupMapping};
use crate::core::domain::Configuration;
use crate::core::events::StatusEvent;
use crate::core::library::LibraryResult;
use crate::core::repository::AvailabilityStore;
use crate::display::updater::DisplayUpdater;
use crate::gateway::availability::AvailabilityRequest;
use crate::gateway::events::StatusListener;
use crate::items::dto::ItemId;

pub struct AvailabilityServiceImpl {
    default_mode: String,
    store: Arc<dyn AvailabilityStore>,
    fetcher: FetchCoordinator,
    updater: DisplayUpdater,
    listeners: Vec<Box<dyn StatusListener>>,
}

impl AvailabilityServiceImpl {
    pub fn new(config: &Configuration, store: Arc<dyn AvailabilityStore>,
                      fetcher: FetchCoordinator, updater: DisplayUpdater) -> Self {
        Self {
            default_mode: config.default_mode.to_string(),
            store,
            fetcher,
            updater,
            listeners: vec![],
        }
    }

    fn mark_pending(&self, mapping: &GroupMapping, plan: &FetchPlan) {
        for (group_id, group) in mapping.iter() {
            if group.items.iter().any(|id| plan.contains(id)) {
                self.updater.mark_pending(group_id);
            }
        }
    }

    fn notify(&self, event: &StatusEvent) {
        for listener in &self.listeners {
            if let Err(err) = listener.on_status(event) {
                warn!(event_id = event.event_id.as_str(), error = %err, "status listener failed");
            }
        }
    }

    // groups depending on a failed batch keep their pending look
    fn display(&self, mapping: &GroupMapping, failed: Option<&FetchPlan>) -> Vec<GroupDisplay> {
        mapping.iter()
            .filter(|(_, group)| match failed {
                Some(plan) => !group.items.iter().any(|id| plan.contains(id)),
                None => true,
            })
            .map(|(group_id, group)| {
                let status = aggregate(&group.items, self.store.as_ref());
                let rendered = self.updater.display(group_id, group, &status, self.store.as_ref());
                GroupDisplay { group_id: group_id.to_string(), rendered }
            })
            .collect()
    }
}

#[async_trait]
impl AvailabilityService for AvailabilityServiceImpl {
    async fn activate(&self, settings: &ActivationSettings) -> LibraryResult<ActivationReport> {
        let mapping = &settings.group_mapping;
        let plan = self.fetcher.plan(mapping);
        self.mark_pending(mapping, &plan);

        if plan.is_empty() {
            let displayed = self.display(mapping, None);
            info!(groups = displayed.len(), "availability displayed from cache");
            return Ok(ActivationReport {
                requested: plan.requested,
                fetch: FetchOutcome::Skipped,
                resolved: vec![],
                displayed,
            });
        }

        let mode = settings.mode_or(self.default_mode.as_str());
        let request = AvailabilityRequest::new(
            settings.base_path.as_str(), settings.path_prefix.as_str(), mode.as_str(), &plan.needs_fetch);
        match self.fetcher.fetch(&request).await {
            Ok(payload) => {
                let resolved = self.fetcher.merge(&plan, &payload);
                self.notify(&StatusEvent::materials_status(mode.as_str(), &payload));
                let displayed = self.display(mapping, None);
                info!(mode = mode.as_str(), requested = plan.needs_fetch.len(), resolved = resolved.len(),
                    groups = displayed.len(), "availability fetched and displayed");
                Ok(ActivationReport {
                    fetch: FetchOutcome::Fetched { requested: plan.needs_fetch.len(), returned: payload.len() },
                    requested: plan.requested.clone(),
                    resolved,
                    displayed,
                })
            }
            Err(err) => {
                warn!(mode = mode.as_str(), requested = plan.needs_fetch.len(), error = %err,
                    "availability fetch failed");
                let displayed = self.display(mapping, Some(&plan));
                Ok(ActivationReport {
                    fetch: FetchOutcome::Failed { message: err.to_string() },
                    requested: plan.requested.clone(),
                    resolved: vec![],
                    displayed,
                })
            }
        }
    }

    fn status(&self, ids: &[ItemId]) -> AggregatedStatus {
        aggregate(ids, self.store.as_ref())
    }

    fn subscribe(&mut self, listener: Box<dyn StatusListener>) {
        self.listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use serde_json::json;
    use crate::availability::domain::AvailabilityService;
    use crate::availability::domain::fetcher::FetchCoordinator;
    use crate::availability::domain::model::{ActivationSettings, DisplayGroup, FetchOutcome, GroupMapping, Rendered};
    use crate::availability::domain::service::AvailabilityServiceImpl;
    use crate::core::domain::Configuration;
    use crate::core::events::StatusEvent;
    use crate::core::library::{AvailabilityState, LibraryError, LibraryResult};
    use crate::core::repository::{AvailabilityStore, CacheEntry};
    use crate::display::page::{MemoryPage, Region};
    use crate::display::updater::DisplayUpdater;
    use crate::gateway::availability::{AvailabilityGateway, AvailabilityRequest};
    use crate::items::dto::{AvailabilityPayload, StatusRecord};
    use crate::items::factory::create_availability_cache;

    struct CountingGateway {
        records: AvailabilityPayload,
        fail: bool,
        calls: Arc<Mutex<Vec<AvailabilityRequest>>>,
    }

    #[async_trait]
    impl AvailabilityGateway for CountingGateway {
        async fn fetch(&self, request: &AvailabilityRequest) -> LibraryResult<AvailabilityPayload> {
            self.calls.lock().expect("should lock calls").push(request.clone());
            if self.fail {
                return Err(LibraryError::transport("connection refused", None, true));
            }
            Ok(request.ids.iter()
                .filter_map(|id| self.records.get(id).map(|v| (id.to_string(), v.clone())))
                .collect())
        }
    }

    struct Fixture {
        store: Arc<dyn AvailabilityStore>,
        page: Arc<MemoryPage>,
        calls: Arc<Mutex<Vec<AvailabilityRequest>>>,
    }

    impl Fixture {
        fn new() -> Self {
            let page = Arc::new(MemoryPage::new());
            for id in ["availability-1", "availability-2", "holdings-1"] {
                page.add_region(id, Region::default());
            }
            page.add_region("reservation-itemA", Region::with_classes(&["hidden"]));
            Self {
                store: create_availability_cache(),
                page,
                calls: Arc::new(Mutex::new(vec![])),
            }
        }

        fn service(&self, records: serde_json::Value, fail: bool) -> AvailabilityServiceImpl {
            let config = Configuration::new();
            let gateway = CountingGateway {
                records: records.as_object().cloned().unwrap_or_default(),
                fail,
                calls: self.calls.clone(),
            };
            let fetcher = FetchCoordinator::new(self.store.clone(), Box::new(gateway));
            let updater = DisplayUpdater::new(self.page.clone(), &config.labels);
            AvailabilityServiceImpl::new(&config, self.store.clone(), fetcher, updater)
        }

        fn calls(&self) -> usize {
            self.calls.lock().expect("should lock calls").len()
        }
    }

    fn settings(groups: &[(&str, DisplayGroup)]) -> ActivationSettings {
        let mut mapping = GroupMapping::new();
        for (id, group) in groups {
            mapping.insert(id, group.clone());
        }
        ActivationSettings::new(mapping, "/", "")
    }

    #[tokio::test]
    async fn test_should_display_fetched_indicator() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({
            "itemA": {"available": true, "reservable": true, "show_reservation_button": true}
        }), false);

        let report = sut.activate(&settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]))
            .await.expect("should activate");

        assert_eq!(FetchOutcome::Fetched { requested: 1, returned: 1 }, report.fetch);
        assert_eq!(Some(&Rendered::Indicator(AvailabilityState::Available)), report.rendered("availability-1"));
        let region = fixture.page.region("availability-1").expect("should have region");
        assert!(region.has_class("available") && region.has_class("reservable"));
        assert!(!region.has_class("pending"));
        assert_eq!(Some("available"), region.attribute("title"));
        assert!(!fixture.page.region("reservation-itemA").expect("should have region").has_class("hidden"));
        let calls = fixture.calls.lock().expect("should lock calls");
        assert_eq!("/ding_availability/items/itemA", calls[0].path());
    }

    #[tokio::test]
    async fn test_should_fetch_each_id_once_per_session() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({
            "itemA": {"available": true},
            "itemB": {"reservable": true}
        }), false);

        let first = settings(&[
            ("availability-1", DisplayGroup::indicator(&["itemA", "itemB"])),
            ("holdings-1", DisplayGroup::holdings(&["itemB"])),
        ]);
        let _ = sut.activate(&first).await.expect("should activate");
        let second = settings(&[
            ("availability-2", DisplayGroup::indicator(&["itemB", "itemC"])),
        ]);
        let _ = sut.activate(&second).await.expect("should activate");

        let calls = fixture.calls.lock().expect("should lock calls");
        assert_eq!(2, calls.len());
        assert_eq!(vec!["itemA".to_string(), "itemB".to_string()], calls[0].ids);
        assert_eq!(vec!["itemC".to_string()], calls[1].ids);
    }

    #[tokio::test]
    async fn test_should_skip_fetch_when_everything_is_cached() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({"itemA": {"available": false, "reservable": true}}), false);
        let settings = settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]);
        let _ = sut.activate(&settings).await.expect("should activate");

        let report = sut.activate(&settings).await.expect("should activate again");
        assert_eq!(FetchOutcome::Skipped, report.fetch);
        assert_eq!(1, fixture.calls());
        assert_eq!(Some(&Rendered::Indicator(AvailabilityState::OnLoan)), report.rendered("availability-1"));
    }

    #[tokio::test]
    async fn test_should_not_refetch_pending_ids() {
        let fixture = Fixture::new();
        fixture.store.mark_pending("itemA");
        let sut = fixture.service(json!({"itemA": {"available": true}}), false);

        let report = sut.activate(&settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]))
            .await.expect("should activate");
        assert_eq!(FetchOutcome::Skipped, report.fetch);
        assert_eq!(0, fixture.calls());
        assert_eq!(Some(&Rendered::Indicator(AvailabilityState::Unavailable)), report.rendered("availability-1"));
    }

    #[tokio::test]
    async fn test_should_show_no_holdings_for_last_item() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({"itemB": {"holdings": [{"branch": "Main"}]}}), false);
        let settings = settings(&[("holdings-1", DisplayGroup::holdings(&["itemA", "itemB"]))]);

        let report = sut.activate(&settings).await.expect("should activate");
        assert_eq!(Some(&Rendered::NoHoldings), report.rendered("holdings-1"));
        assert_eq!(CacheEntry::Pending, fixture.store.get("itemA"));
        let region = fixture.page.region("holdings-1").expect("should have region");
        assert_eq!("<h2>No holdings available</h2>", region.html());
        assert!(region.has_class("pending"));
        assert_eq!(2, settings.group_mapping.get("holdings-1").expect("should have group").items.len());
    }

    #[tokio::test]
    async fn test_should_leave_cache_untouched_on_failure() {
        let fixture = Fixture::new();
        fixture.store.resolve("itemZ", StatusRecord::new(true, true, false));
        let sut = fixture.service(json!({}), true);
        let settings = settings(&[
            ("availability-1", DisplayGroup::indicator(&["itemA"])),
            ("availability-2", DisplayGroup::indicator(&["itemZ"])),
        ]);

        let report = sut.activate(&settings).await.expect("should activate");
        assert!(matches!(report.fetch, FetchOutcome::Failed { .. }));
        assert_eq!(CacheEntry::Pending, fixture.store.get("itemA"));
        assert_eq!(None, report.rendered("availability-1"));
        assert_eq!(Some(&Rendered::Indicator(AvailabilityState::Available)), report.rendered("availability-2"));
        let region = fixture.page.region("availability-1").expect("should have region");
        assert!(region.has_class("pending"));
        assert!(!region.has_class("processed"));

        let _ = sut.activate(&settings).await.expect("should activate again");
        assert_eq!(1, fixture.calls());
    }

    #[tokio::test]
    async fn test_should_notify_listeners_with_payload() {
        let fixture = Fixture::new();
        let mut sut = fixture.service(json!({"itemA": {"available": true}}), false);
        let events = Arc::new(Mutex::new(vec![]));
        let seen = events.clone();
        sut.subscribe(Box::new(move |event: &StatusEvent| {
            seen.lock().expect("should lock events").push(event.clone());
        }));
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        sut.subscribe(Box::new(move |_: &StatusEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let settings = settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]);
        let _ = sut.activate(&settings).await.expect("should activate");
        let _ = sut.activate(&settings).await.expect("should activate again");

        let events = events.lock().expect("should lock events");
        assert_eq!(1, events.len());
        assert_eq!("materials_status", events[0].name.as_str());
        assert_eq!(json!({"available": true}), events[0].payload["itemA"]);
        assert_eq!(1, notified.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_should_not_notify_listeners_when_fetch_fails() {
        let fixture = Fixture::new();
        let mut sut = fixture.service(json!({"itemA": {"available": true}}), true);
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        sut.subscribe(Box::new(move |_: &StatusEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let settings = settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]);
        let report = sut.activate(&settings).await.expect("should activate");
        assert!(matches!(report.fetch, FetchOutcome::Failed { .. }));
        assert_eq!(1, fixture.calls());
        assert_eq!(0, notified.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_should_use_requested_mode() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({}), false);
        let mut settings = settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]);
        settings.mode = Some("periodical".to_string());
        settings.path_prefix = "da/".to_string();

        let report = sut.activate(&settings).await.expect("should activate");
        assert_eq!(FetchOutcome::Fetched { requested: 1, returned: 0 }, report.fetch);
        let calls = fixture.calls.lock().expect("should lock calls");
        assert_eq!("/da/ding_availability/periodical/itemA", calls[0].path());
    }

    #[tokio::test]
    async fn test_should_expose_cached_status() {
        let fixture = Fixture::new();
        let sut = fixture.service(json!({"itemA": {"available": true, "reservable": false}}), false);
        let _ = sut.activate(&settings(&[("availability-1", DisplayGroup::indicator(&["itemA"]))]))
            .await.expect("should activate");
        assert_eq!(AvailabilityState::NotReservable, sut.status(&["itemA".to_string()]).state());
    }
}
