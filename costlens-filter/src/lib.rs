//! Implements the events explorer filter model.
//!
//! Events may be shown in the explorer based on the following independently toggleable facets:
//!
//! * custom business events (business events authored by users)
//! * custom technical events (technical events authored by users)
//! * provider events (reported by the cloud provider, with commitment, marketplace purchase and
//!   reservation sub-filters)
//! * GitHub events (technical events imported from a selection of GitHub repositories)
//!
//! The facets are composed into a [`FilterState`], which together with the date range forms the
//! [`SearchQuery`] sent to the aggregation endpoint. The aggregated response is then partitioned by
//! category and [`SourceSelector`] to derive a [`BadgeCount`] per facet.
//!
//! ```
//! use costlens_filter::{count, EventCategory, SourceSelector};
//!
//! // No data loaded yet counts as zero.
//! let badge = count(None, Some(EventCategory::Business), Some(SourceSelector::Custom));
//! assert_eq!(badge.to_string(), "0");
//! ```
#![warn(missing_docs)]

mod badge;
mod config;
mod facets;
mod github;
mod partition;
mod query;

pub use crate::badge::*;
pub use crate::config::*;
pub use crate::facets::*;
pub use crate::github::*;
pub use crate::partition::*;
pub use crate::query::*;

pub use costlens_base_schema::{AggBy, EventCategory, EventSource};
pub use costlens_event_schema::{AggregatedEvents, EventRecord};
