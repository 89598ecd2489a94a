//! Runs gateway calls and keeps the view state in step with the server.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::services::notification_manager::NotificationManager;
use crate::application::services::sync_policy::reload_after;
use crate::application::services::view_store::{ApplyOutcome, RequestToken, Slice, ViewStore};
use crate::domain::entities::{Aircraft, Company, ManufacturerFilter};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ApiOutcome, CatalogQuery, FleetApiPort, Mutation, MutationKind};

/// Completion of a request issued by [`FleetSync`].
#[derive(Debug)]
pub enum SyncEvent {
    /// A catalog listing finished.
    CatalogLoaded {
        token: RequestToken,
        query: CatalogQuery,
        result: Result<Vec<Aircraft>, ApiError>,
    },
    /// A company listing finished.
    CompaniesLoaded {
        token: RequestToken,
        result: Result<Vec<Company>, ApiError>,
    },
    /// A mutation finished.
    MutationFinished {
        mutation: Mutation,
        result: Result<ApiOutcome, ApiError>,
    },
}

/// Issues requests on background tasks and applies their completions.
///
/// Requests never touch the store directly: each task reports a
/// [`SyncEvent`] on the channel, and the owner of the store hands it back
/// to [`FleetSync::apply`] on its own task.
pub struct FleetSync {
    api: Arc<dyn FleetApiPort>,
    events: mpsc::UnboundedSender<SyncEvent>,
    in_flight: usize,
}

impl FleetSync {
    /// Creates a synchronizer reporting on `events`.
    #[must_use]
    pub fn new(api: Arc<dyn FleetApiPort>, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self {
            api,
            events,
            in_flight: 0,
        }
    }

    /// Returns the number of issued requests whose completion has not been
    /// applied yet.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetches the full catalog and the companies.
    pub fn initial_load(&mut self, store: &mut ViewStore) {
        info!("Loading catalog and companies");
        self.reload(Slice::Catalog, store);
        self.reload(Slice::Companies, store);
    }

    /// Reloads a slice. The catalog is reloaded in full.
    pub fn reload(&mut self, slice: Slice, store: &mut ViewStore) -> RequestToken {
        match slice {
            Slice::Catalog => self.load_catalog(CatalogQuery::Sorted, store),
            Slice::Companies => self.load_companies(store),
        }
    }

    /// Switches the manufacturer filter and loads the matching listing.
    pub fn change_filter(&mut self, filter: ManufacturerFilter, store: &mut ViewStore) {
        debug!(filter = %filter, "Manufacturer filter changed");
        let query = CatalogQuery::for_filter(&filter);
        store.set_filter(filter);
        self.load_catalog(query, store);
    }

    fn load_catalog(&mut self, query: CatalogQuery, store: &mut ViewStore) -> RequestToken {
        let token = store.begin_load(Slice::Catalog);
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = api.list_aircraft(query.clone()).await;
            match &result {
                Ok(items) => debug!(count = items.len(), ?query, "Catalog fetched"),
                Err(e) => warn!(error = %e, ?query, "Catalog fetch failed"),
            }
            let _ = tx.send(SyncEvent::CatalogLoaded {
                token,
                query,
                result,
            });
        });

        token
    }

    fn load_companies(&mut self, store: &mut ViewStore) -> RequestToken {
        let token = store.begin_load(Slice::Companies);
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = api.list_companies().await;
            match &result {
                Ok(items) => debug!(count = items.len(), "Companies fetched"),
                Err(e) => warn!(error = %e, "Companies fetch failed"),
            }
            let _ = tx.send(SyncEvent::CompaniesLoaded { token, result });
        });

        token
    }

    /// Sends a mutation to the API.
    pub fn dispatch(&mut self, mutation: Mutation) {
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        self.in_flight += 1;
        debug!(kind = %mutation.kind(), "Dispatching mutation");

        tokio::spawn(async move {
            let result = match &mutation {
                Mutation::Create(aircraft) => api.create_aircraft(aircraft).await,
                Mutation::Delete { icao } => api.delete_aircraft(icao).await,
                Mutation::Buy {
                    company_icao,
                    aircraft_icao,
                } => api.buy(company_icao, aircraft_icao).await,
                Mutation::Sell {
                    company_icao,
                    aircraft_icao,
                } => api.sell(company_icao, aircraft_icao).await,
            };
            let _ = tx.send(SyncEvent::MutationFinished { mutation, result });
        });
    }

    /// Validates the form draft and posts it.
    ///
    /// Returns `false` when the draft is rejected locally; nothing is sent
    /// in that case.
    pub fn submit_draft(
        &mut self,
        store: &ViewStore,
        notifications: &mut NotificationManager,
    ) -> bool {
        match store.draft().to_aircraft() {
            Ok(aircraft) => {
                self.dispatch(Mutation::Create(aircraft));
                true
            }
            Err(e) => {
                warn!(error = %e, "Draft rejected");
                notifications.warn("Invalid aircraft", e.to_string());
                false
            }
        }
    }

    /// Deletes a catalog aircraft.
    pub fn delete(&mut self, icao: impl Into<String>) {
        self.dispatch(Mutation::Delete { icao: icao.into() });
    }

    /// Buys one unit of an aircraft for a company.
    pub fn buy(&mut self, company_icao: impl Into<String>, aircraft_icao: impl Into<String>) {
        self.dispatch(Mutation::Buy {
            company_icao: company_icao.into(),
            aircraft_icao: aircraft_icao.into(),
        });
    }

    /// Sells one unit of an aircraft from a company.
    pub fn sell(&mut self, company_icao: impl Into<String>, aircraft_icao: impl Into<String>) {
        self.dispatch(Mutation::Sell {
            company_icao: company_icao.into(),
            aircraft_icao: aircraft_icao.into(),
        });
    }

    /// Buys one unit of the selected catalog aircraft for a company.
    ///
    /// Returns `false` without sending anything when no aircraft is selected.
    pub fn buy_selected(
        &mut self,
        company_icao: impl Into<String>,
        store: &ViewStore,
        notifications: &mut NotificationManager,
    ) -> bool {
        match store.selection() {
            Some(icao) => {
                let icao = icao.to_string();
                self.buy(company_icao, icao);
                true
            }
            None => {
                notifications.warn("Buy", "Select an aircraft in the catalog first");
                false
            }
        }
    }

    /// Applies a completion to the store and runs the reload policy.
    pub fn apply(
        &mut self,
        event: SyncEvent,
        store: &mut ViewStore,
        notifications: &mut NotificationManager,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            SyncEvent::CatalogLoaded {
                token,
                query,
                result,
            } => {
                let retryable = is_retryable(&result);
                if let ApplyOutcome::Failed(message) = store.apply_catalog(token, &query, result) {
                    notifications.error("Catalog unavailable", load_failure(&message, retryable));
                }
            }
            SyncEvent::CompaniesLoaded { token, result } => {
                let retryable = is_retryable(&result);
                if let ApplyOutcome::Failed(message) = store.apply_companies(token, result) {
                    notifications.error("Companies unavailable", load_failure(&message, retryable));
                }
            }
            SyncEvent::MutationFinished { mutation, result } => {
                self.finish_mutation(&mutation, &result, store, notifications);
            }
        }
    }

    fn finish_mutation(
        &mut self,
        mutation: &Mutation,
        result: &Result<ApiOutcome, ApiError>,
        store: &mut ViewStore,
        notifications: &mut NotificationManager,
    ) {
        let kind = mutation.kind();
        let succeeded = matches!(result, Ok(outcome) if outcome.accepted);

        match result {
            Ok(outcome) if outcome.accepted => {
                info!(kind = %kind, status = outcome.status, "Mutation accepted");
            }
            Ok(outcome) => {
                warn!(kind = %kind, status = outcome.status, body = %outcome.body, "Mutation rejected");
            }
            Err(e) => warn!(kind = %kind, error = %e, "Mutation failed"),
        }

        let title = notification_title(kind);
        match result {
            Ok(outcome) if outcome.accepted => {
                notifications.success(title, success_message(mutation, outcome));
            }
            Ok(outcome) => notifications.error(title, failure_message(outcome)),
            Err(e) => notifications.error(title, e.to_string()),
        }

        if kind == MutationKind::Create && succeeded {
            store.reset_draft();
        }

        if let Some(slice) = reload_after(kind, succeeded) {
            self.reload(slice, store);
        }
    }
}

fn is_retryable<T>(result: &Result<T, ApiError>) -> bool {
    result.as_ref().err().is_some_and(ApiError::is_recoverable)
}

fn load_failure(message: &str, retryable: bool) -> String {
    if retryable {
        format!("{message}\nPress r to retry")
    } else {
        message.to_string()
    }
}

const fn notification_title(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Create => "Create aircraft",
        MutationKind::Delete => "Delete aircraft",
        MutationKind::Buy => "Buy",
        MutationKind::Sell => "Sell",
    }
}

fn success_message(mutation: &Mutation, outcome: &ApiOutcome) -> String {
    match mutation {
        Mutation::Create(_) => format!("Status {} : created", outcome.status),
        Mutation::Delete { icao } => {
            format!("{} | Aircraft {icao} has been deleted", outcome.status_line())
        }
        Mutation::Buy {
            company_icao,
            aircraft_icao,
        } => format!(
            "{} | Buy one {aircraft_icao} for {company_icao}",
            outcome.status_line()
        ),
        Mutation::Sell {
            company_icao,
            aircraft_icao,
        } => format!(
            "{} | Sell one {aircraft_icao} for {company_icao}",
            outcome.status_line()
        ),
    }
}

fn failure_message(outcome: &ApiOutcome) -> String {
    let body = outcome.body.trim();
    if body.is_empty() {
        format!("Status {}", outcome.status_line())
    } else {
        format!("Status {}\n{body}", outcome.status_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::view_store::SliceStatus;
    use crate::domain::NotificationLevel;
    use crate::domain::entities::{DraftField, FleetEntry};
    use crate::domain::ports::mocks::{ApiCall, MockFleetApi};
    use test_case::test_case;

    struct Harness {
        api: Arc<MockFleetApi>,
        sync: FleetSync,
        rx: mpsc::UnboundedReceiver<SyncEvent>,
        store: ViewStore,
        notifications: NotificationManager,
    }

    impl Harness {
        fn new(api: MockFleetApi) -> Self {
            let api = Arc::new(api);
            let (tx, rx) = mpsc::unbounded_channel();
            Self {
                sync: FleetSync::new(api.clone(), tx),
                api,
                rx,
                store: ViewStore::new(),
                notifications: NotificationManager::default(),
            }
        }

        async fn loaded(api: MockFleetApi) -> Self {
            let mut harness = Self::new(api);
            harness.sync.initial_load(&mut harness.store);
            harness.settle().await;
            harness
        }

        async fn settle(&mut self) {
            while self.sync.in_flight() > 0 {
                let event = self.rx.recv().await.unwrap();
                self.sync
                    .apply(event, &mut self.store, &mut self.notifications);
            }
        }

        fn messages(&self) -> Vec<(NotificationLevel, String)> {
            self.notifications
                .pending()
                .map(|n| (n.level, n.message.clone()))
                .collect()
        }

        fn last_message(&self) -> (NotificationLevel, String) {
            self.messages().pop().unwrap()
        }
    }

    fn catalog() -> Vec<Aircraft> {
        vec![
            Aircraft::new("A320", "Airbus", 6000, 180),
            Aircraft::new("B738", "Boeing", 5765, 189),
            Aircraft::new("E190", "Embraer", 4500, 114),
        ]
    }

    fn companies() -> Vec<Company> {
        vec![
            Company::new("EZY", "easyJet", "UK").with_fleet(vec![FleetEntry::new("A320", 4)]),
            Company::new("SWR", "Swiss", "CH").with_fleet(vec![FleetEntry::new("A320", 12)]),
        ]
    }

    fn api() -> MockFleetApi {
        MockFleetApi::new()
            .with_aircraft(catalog())
            .with_companies(companies())
    }

    fn fill_a320(store: &mut ViewStore) {
        store.set_draft_field(DraftField::Icao, "A320");
        store.set_draft_field(DraftField::Constructor, "Airbus");
        store.set_draft_field(DraftField::MaxCapacity, "180");
        store.set_draft_field(DraftField::Range, "6000");
    }

    #[tokio::test]
    async fn test_initial_load_fills_store() {
        let h = Harness::loaded(api()).await;

        assert_eq!(
            h.api.calls(),
            vec![ApiCall::ListAircraft(CatalogQuery::Sorted), ApiCall::ListCompanies]
        );
        assert_eq!(h.store.catalog().len(), 3);
        assert_eq!(h.store.companies().len(), 2);
        assert_eq!(h.store.manufacturers().len(), 4);
        assert_eq!(h.store.manufacturers()[0], ManufacturerFilter::All);
    }

    #[tokio::test]
    async fn test_initial_load_failure_is_recoverable() {
        let mock = api();
        mock.fail_queries_with(Some(503));
        let mut h = Harness::loaded(mock).await;

        assert!(h.store.status(Slice::Catalog).error().is_some());
        assert!(h.store.status(Slice::Companies).error().is_some());
        assert_eq!(h.messages().len(), 2);
        assert!(h.messages()[0].1.contains("Press r to retry"));

        h.api.fail_queries_with(None);
        h.sync.reload(Slice::Catalog, &mut h.store);
        h.settle().await;

        assert_eq!(h.store.status(Slice::Catalog), &SliceStatus::Ready);
        assert_eq!(h.store.catalog().len(), 3);
    }

    #[test_case(201 ; "created")]
    #[test_case(500 ; "server_error")]
    #[tokio::test]
    async fn test_submit_posts_draft_and_reloads_once(status: u16) {
        let mut h = Harness::new(api());
        h.api.respond_with(status, "");
        fill_a320(&mut h.store);

        assert!(h.sync.submit_draft(&h.store, &mut h.notifications));
        h.settle().await;

        assert_eq!(
            h.api.calls(),
            vec![
                ApiCall::Create(Aircraft::new("A320", "Airbus", 6000, 180)),
                ApiCall::ListAircraft(CatalogQuery::Sorted),
            ]
        );
    }

    #[tokio::test]
    async fn test_successful_create_resets_draft() {
        let mut h = Harness::new(api());
        fill_a320(&mut h.store);

        h.sync.submit_draft(&h.store, &mut h.notifications);
        h.settle().await;

        assert_eq!(h.store.draft().get(DraftField::Icao), "");
        assert_eq!(
            h.last_message(),
            (NotificationLevel::Success, "Status 201 : created".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_create_keeps_draft_and_reports_body() {
        let mut h = Harness::new(api());
        h.api.respond_with(409, "ICAO already exists");
        fill_a320(&mut h.store);

        h.sync.submit_draft(&h.store, &mut h.notifications);
        h.settle().await;

        assert_eq!(h.store.draft().get(DraftField::Icao), "A320");
        assert_eq!(
            h.last_message(),
            (
                NotificationLevel::Error,
                "Status 409 : Conflict\nICAO already exists".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let mut h = Harness::new(api());
        fill_a320(&mut h.store);
        h.store.set_draft_field(DraftField::Range, "far");

        assert!(!h.sync.submit_draft(&h.store, &mut h.notifications));

        assert_eq!(h.sync.in_flight(), 0);
        assert!(h.api.calls().is_empty());
        assert_eq!(h.last_message().0, NotificationLevel::Warn);
    }

    #[tokio::test]
    async fn test_delete_success_reloads_catalog() {
        let mut h = Harness::loaded(api()).await;

        h.sync.delete("B738");
        h.settle().await;

        assert_eq!(h.api.count(|c| *c == ApiCall::ListAircraft(CatalogQuery::Sorted)), 2);
        assert!(h.store.catalog().iter().all(|a| a.icao() != "B738"));
        assert_eq!(
            h.last_message(),
            (
                NotificationLevel::Success,
                "200 : OK | Aircraft B738 has been deleted".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_delete_failure_does_not_reload() {
        let mut h = Harness::loaded(api()).await;
        h.api.respond_with(404, "");

        h.sync.delete("ZZZZ");
        h.settle().await;

        assert_eq!(h.api.count(|c| matches!(c, ApiCall::ListAircraft(_))), 1);
        assert_eq!(
            h.last_message(),
            (NotificationLevel::Error, "Status 404 : Not Found".to_string())
        );
    }

    #[tokio::test]
    async fn test_buy_accepted_reloads_companies() {
        let mut h = Harness::loaded(api()).await;

        h.sync.buy("SWR", "A320");
        h.settle().await;

        assert_eq!(h.api.count(|c| *c == ApiCall::ListCompanies), 2);
        let swiss = &h.store.companies()[1];
        assert_eq!(swiss.fleet()[0].quantity(), 13);
        assert_eq!(
            h.last_message(),
            (
                NotificationLevel::Success,
                "202 : Accepted | Buy one A320 for SWR".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_buy_with_plain_ok_is_a_failure() {
        let mut h = Harness::loaded(api()).await;
        h.api.respond_with(200, "quota exceeded");
        let before = h.store.companies().to_vec();

        h.sync.buy("SWR", "A320");
        h.settle().await;

        assert_eq!(h.api.count(|c| *c == ApiCall::ListCompanies), 1);
        assert_eq!(h.store.companies(), before.as_slice());
        assert_eq!(
            h.last_message(),
            (
                NotificationLevel::Error,
                "Status 200 : OK\nquota exceeded".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_sell_accepted_decrements_fleet() {
        let mut h = Harness::loaded(api()).await;

        h.sync.sell("EZY", "A320");
        h.settle().await;

        assert_eq!(h.store.companies()[0].fleet()[0].quantity(), 3);
        assert!(h.last_message().1.ends_with("Sell one A320 for EZY"));
    }

    #[tokio::test]
    async fn test_sell_without_response_notifies_only() {
        let mut h = Harness::loaded(api()).await;
        h.api.set_offline(true);

        h.sync.sell("EZY", "A320");
        h.settle().await;

        assert_eq!(h.api.count(|c| *c == ApiCall::ListCompanies), 1);
        assert_eq!(
            h.last_message(),
            (
                NotificationLevel::Error,
                "network error: connection refused".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_buy_selected_uses_selection() {
        let mut h = Harness::loaded(api()).await;
        h.store.select("E190");

        assert!(h.sync.buy_selected("EZY", &h.store, &mut h.notifications));
        h.settle().await;

        assert!(h.api.calls().contains(&ApiCall::Buy("EZY".into(), "E190".into())));
        assert_eq!(h.store.companies()[0].fleet().len(), 2);
    }

    #[tokio::test]
    async fn test_buy_selected_without_selection_warns() {
        let mut h = Harness::loaded(api()).await;
        let calls_before = h.api.calls().len();

        assert!(!h.sync.buy_selected("EZY", &h.store, &mut h.notifications));

        assert_eq!(h.api.calls().len(), calls_before);
        assert_eq!(h.last_message().0, NotificationLevel::Warn);
    }

    #[tokio::test]
    async fn test_filter_change_scopes_listing() {
        let mut h = Harness::loaded(api()).await;

        h.sync
            .change_filter(ManufacturerFilter::Only("Boeing".into()), &mut h.store);
        h.settle().await;

        assert_eq!(
            h.api.calls().last(),
            Some(&ApiCall::ListAircraft(CatalogQuery::Manufacturer(
                "Boeing".into()
            )))
        );
        assert_eq!(h.store.catalog().len(), 1);
        assert_eq!(h.store.manufacturers().len(), 4);
        assert_eq!(
            h.store.active_filter(),
            &ManufacturerFilter::Only("Boeing".into())
        );

        h.sync.change_filter(ManufacturerFilter::All, &mut h.store);
        h.settle().await;

        assert_eq!(
            h.api.calls().last(),
            Some(&ApiCall::ListAircraft(CatalogQuery::Sorted))
        );
        assert_eq!(h.store.catalog().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_change_failure_keeps_catalog() {
        let mut h = Harness::loaded(api()).await;
        h.api.fail_queries_with(Some(500));

        h.sync
            .change_filter(ManufacturerFilter::Only("Airbus".into()), &mut h.store);
        h.settle().await;

        assert_eq!(h.store.catalog().len(), 3);
        assert!(h.store.status(Slice::Catalog).error().is_some());
        assert_eq!(h.store.active_filter(), &ManufacturerFilter::All);
        assert_eq!(h.last_message().0, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_rejected_listing_is_not_offered_for_retry() {
        let mock = api();
        mock.fail_queries_with(Some(400));
        let h = Harness::loaded(mock).await;

        assert_eq!(h.messages().len(), 2);
        assert!(h.messages().iter().all(|(level, message)| {
            *level == NotificationLevel::Error && !message.contains("Press r to retry")
        }));
    }

    #[tokio::test]
    async fn test_overlapping_reloads_apply_latest_only() {
        let mut h = Harness::loaded(api()).await;

        h.sync
            .change_filter(ManufacturerFilter::Only("Embraer".into()), &mut h.store);
        h.sync.change_filter(ManufacturerFilter::All, &mut h.store);
        h.settle().await;

        assert_eq!(h.store.catalog().len(), 3);
        assert_eq!(h.store.active_filter(), &ManufacturerFilter::All);
    }
}
