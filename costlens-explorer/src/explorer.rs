use chrono::{DateTime, Utc};
use costlens_base_schema::EventCategory;
use costlens_config::ExplorerConfig;
use costlens_event_schema::AggregatedEvents;
use costlens_filter::{
    BadgeCount, FacetBadges, FilterState, FilterUpdate, GithubAvailability, QueryFilters,
    Repository, RepositoryChip, SearchQuery, SourceSelector, build_query, repository_chips,
};
use costlens_log::LogError;

use crate::{EventCreationTrigger, EventsFetcher, FetchError, RepositoryLister};

/// The state of the event data behind the current query.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    /// No response has arrived for the current query yet.
    #[default]
    NotReady,
    /// The response for the current query.
    Ready(AggregatedEvents),
    /// Fetching the current query failed.
    Failed(FetchError),
}

impl LoadState {
    /// Returns the loaded events, if any.
    pub fn events(&self) -> Option<&AggregatedEvents> {
        match self {
            Self::Ready(events) => Some(events),
            Self::NotReady | Self::Failed(_) => None,
        }
    }

    /// Returns `true` if a response for the current query has been applied.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Marks an outstanding fetch with the query it was issued for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchTicket {
    query: SearchQuery,
}

impl FetchTicket {
    /// The query to fetch.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// The outcome of resolving a [`FetchTicket`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The result belonged to the current query and has been stored.
    Applied,
    /// The query changed since the ticket was issued. The result was dropped.
    Stale,
}

/// A single events explorer session.
#[derive(Debug)]
pub struct Explorer {
    state: FilterState,
    filters: QueryFilters,
    query: SearchQuery,
    data: LoadState,
    repositories: Option<Vec<Repository>>,
}

impl Explorer {
    /// Creates a session with all facets disabled.
    pub fn new(filters: QueryFilters) -> Self {
        let state = FilterState::new();
        let query = build_query(&state, &filters);

        Self {
            state,
            filters,
            query,
            data: LoadState::NotReady,
            repositories: None,
        }
    }

    /// Creates a session with the configured defaults, ending at `now`.
    pub fn from_config(config: &ExplorerConfig, now: DateTime<Utc>) -> Self {
        Self::new(config.query_filters(now))
    }

    /// The current facet selection.
    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// The current date range and granularity.
    pub fn query_filters(&self) -> &QueryFilters {
        &self.filters
    }

    /// The query describing the data the session currently shows.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// The state of the event data for [`query`](Self::query).
    pub fn load_state(&self) -> &LoadState {
        &self.data
    }

    /// Applies a single facet update.
    pub fn update(&mut self, update: FilterUpdate) {
        self.state = self.state.apply(update);
        self.settle();
    }

    /// Adds `repo` to the GitHub selection, or removes it if already selected.
    pub fn toggle_repo(&mut self, repo: &str) {
        self.state = self.state.toggle_repo(repo);
        self.settle();
    }

    /// Replaces the date range and granularity.
    pub fn set_query_filters(&mut self, filters: QueryFilters) {
        self.filters = filters;
        self.settle();
    }

    /// Rebuilds the query from the settled state. Data of a previous query is discarded.
    fn settle(&mut self) {
        let query = build_query(&self.state, &self.filters);
        if query != self.query {
            costlens_log::trace!("explorer query changed");
            self.query = query;
            self.data = LoadState::NotReady;
        }
    }

    /// Issues a ticket for fetching the current query.
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            query: self.query.clone(),
        }
    }

    /// Stores the result of a fetch if its ticket still matches the current query.
    ///
    /// A failed fetch is kept as [`LoadState::Failed`] and counts as no data.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<AggregatedEvents, FetchError>,
    ) -> Resolution {
        if ticket.query != self.query {
            costlens_log::debug!("discarding events for outdated query");
            return Resolution::Stale;
        }

        self.data = match result {
            Ok(events) => {
                costlens_log::debug!(events = events.len(), "events loaded");
                LoadState::Ready(events)
            }
            Err(error) => {
                costlens_log::warn!(error = %LogError(&error), "failed to fetch events");
                LoadState::Failed(error)
            }
        };

        Resolution::Applied
    }

    /// Fetches the current query and resolves the result.
    pub async fn refresh(&mut self, fetcher: &impl EventsFetcher) -> Resolution {
        let ticket = self.ticket();
        let result = fetcher.fetch(ticket.query()).await;
        self.resolve(ticket, result)
    }

    /// Loads the repositories available for the GitHub facet.
    ///
    /// A failed listing is treated as empty, which leaves the facet unavailable.
    pub async fn load_repositories(&mut self, lister: &impl RepositoryLister) -> GithubAvailability {
        let repositories = match lister.list().await {
            Ok(repositories) => repositories,
            Err(error) => {
                costlens_log::warn!(error = %LogError(&error), "failed to list repositories");
                Vec::new()
            }
        };

        self.repositories = Some(repositories);
        self.github_availability()
    }

    /// The repositories loaded by [`load_repositories`](Self::load_repositories).
    pub fn repositories(&self) -> Option<&[Repository]> {
        self.repositories.as_deref()
    }

    /// Whether the GitHub facet can be used.
    pub fn github_availability(&self) -> GithubAvailability {
        GithubAvailability::of(self.repositories())
    }

    /// The available repositories with their selection state.
    pub fn repository_chips(&self) -> Vec<RepositoryChip<'_>> {
        repository_chips(self.repositories().unwrap_or_default(), &self.state)
    }

    /// Badge counts of all facets for the current data.
    pub fn badges(&self) -> FacetBadges {
        FacetBadges::compute(self.data.events())
    }

    /// Counts the loaded events matching both selectors.
    pub fn count(
        &self,
        category: Option<EventCategory>,
        source: Option<SourceSelector>,
    ) -> BadgeCount {
        costlens_filter::count(self.data.events(), category, source)
    }

    /// The error of the last fetch for the current query, if it failed.
    pub fn last_error(&self) -> Option<&FetchError> {
        match &self.data {
            LoadState::Failed(error) => Some(error),
            LoadState::NotReady | LoadState::Ready(_) => None,
        }
    }

    /// Asks the application to open the creation flow for a new event in `category`.
    pub fn request_new_event(&self, trigger: &impl EventCreationTrigger, category: EventCategory) {
        costlens_log::debug!(%category, "requesting new event");
        trigger.open_creation(category);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use costlens_base_schema::{AggBy, EventSource};
    use costlens_event_schema::{EventBucket, EventRecord};
    use costlens_filter::Facet;
    use similar_asserts::assert_eq;

    use super::*;

    fn filters() -> QueryFilters {
        QueryFilters {
            from: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
            agg_by: AggBy::Day,
        }
    }

    fn events() -> AggregatedEvents {
        let date = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let business = (0..3)
            .map(|i| EventRecord::new(format!("biz_{i}"), EventCategory::Business, date))
            .collect();
        let technical = vec![
            EventRecord::new("tech_0", EventCategory::Technical, date),
            EventRecord::new("tech_1", EventCategory::Technical, date)
                .with_source(EventSource::Github),
        ];

        AggregatedEvents::empty()
            .with_bucket(EventCategory::Business, EventBucket::new(date, business))
            .with_bucket(EventCategory::Technical, EventBucket::new(date, technical))
    }

    struct RecordingFetcher {
        result: Result<AggregatedEvents, FetchError>,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl RecordingFetcher {
        fn new(result: Result<AggregatedEvents, FetchError>) -> Self {
            Self {
                result,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EventsFetcher for RecordingFetcher {
        async fn fetch(&self, query: &SearchQuery) -> Result<AggregatedEvents, FetchError> {
            self.queries.lock().unwrap().push(query.clone());
            self.result.clone()
        }
    }

    struct StaticLister(Result<Vec<Repository>, FetchError>);

    #[async_trait]
    impl RepositoryLister for StaticLister {
        async fn list(&self) -> Result<Vec<Repository>, FetchError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingTrigger(RefCell<Vec<EventCategory>>);

    impl EventCreationTrigger for RecordingTrigger {
        fn open_creation(&self, category: EventCategory) {
            self.0.borrow_mut().push(category);
        }
    }

    #[test]
    fn test_initial_state() {
        let explorer = Explorer::new(filters());

        assert_eq!(explorer.load_state(), &LoadState::NotReady);
        assert!(explorer.filter_state().is_empty());
        assert_eq!(explorer.query(), &build_query(&FilterState::new(), &filters()));
        assert_eq!(explorer.badges(), FacetBadges::default());
        assert_eq!(explorer.last_error(), None);
    }

    #[test]
    fn test_from_config() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        let config = ExplorerConfig {
            agg_by: AggBy::Day,
            lookback_days: 30,
        };

        let explorer = Explorer::from_config(&config, now);
        assert_eq!(explorer.query_filters(), &filters());
    }

    #[tokio::test]
    async fn test_refresh_fetches_current_query() {
        costlens_log::init_test!();

        let fetcher = RecordingFetcher::new(Ok(events()));
        let mut explorer = Explorer::new(filters());
        explorer.update(FilterUpdate::CustomBusinessEnabled(true));

        assert_eq!(explorer.refresh(&fetcher).await, Resolution::Applied);
        assert!(explorer.load_state().is_ready());

        let queries = fetcher.queries.lock().unwrap();
        assert_eq!(*queries, vec![explorer.query().clone()]);
        assert!(queries[0].search_events.custom_business_enabled());
    }

    #[tokio::test]
    async fn test_badges_after_refresh() {
        let mut explorer = Explorer::new(filters());
        explorer.refresh(&RecordingFetcher::new(Ok(events()))).await;

        let badges = explorer.badges();
        assert_eq!(badges.overall.get(), 5);
        assert_eq!(badges.get(Facet::CustomBusiness).get(), 3);
        assert_eq!(badges.get(Facet::CustomTechnical).get(), 1);
        assert_eq!(badges.get(Facet::Github).get(), 1);
        assert_eq!(badges.get(Facet::Provider).get(), 0);

        assert_eq!(
            explorer.count(Some(EventCategory::Technical), None).get(),
            2
        );
    }

    #[test]
    fn test_stale_response_is_discarded() {
        costlens_log::init_test!();

        let mut explorer = Explorer::new(filters());
        let ticket = explorer.ticket();

        explorer.update(FilterUpdate::ProviderEnabled(true));

        assert_eq!(explorer.resolve(ticket, Ok(events())), Resolution::Stale);
        assert_eq!(explorer.load_state(), &LoadState::NotReady);
        assert_eq!(explorer.badges().overall.get(), 0);
    }

    #[test]
    fn test_ticket_for_equal_query_is_applied() {
        let mut explorer = Explorer::new(filters());
        let ticket = explorer.ticket();

        // Enabling and disabling again yields an equal query.
        explorer.update(FilterUpdate::ProviderEnabled(true));
        explorer.update(FilterUpdate::ProviderEnabled(false));

        assert_eq!(explorer.resolve(ticket, Ok(events())), Resolution::Applied);
        assert!(explorer.load_state().is_ready());
    }

    #[test]
    fn test_query_change_resets_data() {
        let mut explorer = Explorer::new(filters());
        let ticket = explorer.ticket();
        explorer.resolve(ticket, Ok(events()));
        assert_eq!(explorer.badges().overall.get(), 5);

        explorer.toggle_repo("web");
        assert_eq!(explorer.load_state(), &LoadState::NotReady);
        assert_eq!(explorer.badges().overall.get(), 0);

        let ticket = explorer.ticket();
        explorer.resolve(ticket, Ok(events()));

        let mut range = filters();
        range.agg_by = AggBy::Week;
        explorer.set_query_filters(range);
        assert_eq!(explorer.load_state(), &LoadState::NotReady);
    }

    #[test]
    fn test_unchanged_query_keeps_data() {
        let mut explorer = Explorer::new(filters());
        let ticket = explorer.ticket();
        explorer.resolve(ticket, Ok(events()));

        explorer.update(FilterUpdate::CustomTechnicalEnabled(false));
        explorer.set_query_filters(filters());

        assert!(explorer.load_state().is_ready());
    }

    #[tokio::test]
    async fn test_failed_fetch() {
        costlens_log::init_test!();

        let fetcher = RecordingFetcher::new(Err(FetchError::Network("connection reset".into())));
        let mut explorer = Explorer::new(filters());

        assert_eq!(explorer.refresh(&fetcher).await, Resolution::Applied);
        assert_eq!(
            explorer.last_error(),
            Some(&FetchError::Network("connection reset".into()))
        );
        assert_eq!(explorer.badges(), FacetBadges::default());
        assert_eq!(explorer.count(None, None).to_string(), "0");

        // A later success clears the error.
        explorer.refresh(&RecordingFetcher::new(Ok(events()))).await;
        assert_eq!(explorer.last_error(), None);
    }

    #[tokio::test]
    async fn test_load_repositories() {
        let mut explorer = Explorer::new(filters());
        assert_eq!(explorer.github_availability(), GithubAvailability::Unavailable);
        assert!(explorer.repository_chips().is_empty());

        let lister = StaticLister(Ok(vec![Repository::new("web"), Repository::new("api")]));
        let availability = explorer.load_repositories(&lister).await;
        assert_eq!(availability, GithubAvailability::Available);

        explorer.toggle_repo("api");
        assert_eq!(
            explorer.repository_chips(),
            vec![
                RepositoryChip {
                    name: "web",
                    selected: false,
                },
                RepositoryChip {
                    name: "api",
                    selected: true,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_listing_is_unavailable() {
        let mut explorer = Explorer::new(filters());
        let availability = explorer.load_repositories(&StaticLister(Ok(Vec::new()))).await;

        assert_eq!(availability, GithubAvailability::Unavailable);
        assert_eq!(explorer.repositories(), Some([].as_slice()));
    }

    #[tokio::test]
    async fn test_failed_listing_is_unavailable() {
        costlens_log::init_test!();

        let mut explorer = Explorer::new(filters());
        let availability = explorer
            .load_repositories(&StaticLister(Err(FetchError::Unauthorized)))
            .await;

        assert_eq!(availability, GithubAvailability::Unavailable);
        assert!(explorer.repository_chips().is_empty());
    }

    #[test]
    fn test_request_new_event() {
        let trigger = RecordingTrigger::default();
        let explorer = Explorer::new(filters());

        explorer.request_new_event(&trigger, EventCategory::Technical);
        explorer.request_new_event(&trigger, EventCategory::Business);

        assert_eq!(
            trigger.0.into_inner(),
            vec![EventCategory::Technical, EventCategory::Business]
        );
        assert_eq!(explorer.load_state(), &LoadState::NotReady);
    }
}
