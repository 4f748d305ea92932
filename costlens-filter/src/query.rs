//! Translates a [`FilterState`] into the descriptor sent to the aggregation endpoint.

use chrono::{DateTime, Utc};
use costlens_base_schema::AggBy;
use serde::{Deserialize, Serialize};

use crate::FilterState;

/// The date range and granularity that surround every events query.
///
/// Bounds are passed through as given. Validating that `from` precedes `to` is up to whoever
/// produces the range.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    /// Start of the range.
    pub from: DateTime<Utc>,
    /// End of the range.
    pub to: DateTime<Utc>,
    /// Bucket granularity.
    pub agg_by: AggBy,
}

/// The descriptor of an aggregated events fetch.
///
/// Descriptors built from equal inputs are equal and hash equally, which allows the fetch layer to
/// cache and deduplicate requests by descriptor.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Date range and granularity.
    pub filters: QueryFilters,
    /// The full facet configuration.
    pub search_events: FilterState,
}

/// Bundles the filter state and the surrounding date range into a [`SearchQuery`].
pub fn build_query(state: &FilterState, filters: &QueryFilters) -> SearchQuery {
    SearchQuery {
        filters: filters.clone(),
        search_events: state.clone(),
    }
}
