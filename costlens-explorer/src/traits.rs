use async_trait::async_trait;
use costlens_base_schema::EventCategory;
use costlens_event_schema::AggregatedEvents;
use costlens_filter::{Repository, SearchQuery};

use crate::FetchError;

/// Fetches aggregated events from the aggregation endpoint.
///
/// Queries are deterministic, so implementations may cache or deduplicate requests keyed by the
/// query.
#[async_trait]
pub trait EventsFetcher: Send + Sync {
    /// Fetches the events matching `query`.
    async fn fetch(&self, query: &SearchQuery) -> Result<AggregatedEvents, FetchError>;
}

/// Lists the repositories available through the GitHub integration.
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    /// Returns the available repositories in display order.
    async fn list(&self) -> Result<Vec<Repository>, FetchError>;
}

/// Opens the flow for authoring a new custom event.
pub trait EventCreationTrigger {
    /// Requests creation of an event in `category`. No result is reported back.
    fn open_creation(&self, category: EventCategory);
}
