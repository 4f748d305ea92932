//! The events explorer session.
//!
//! An [`Explorer`] owns the facet selection, the date range and the most recent aggregated
//! response. Every mutation recomputes the [`SearchQuery`](costlens_filter::SearchQuery). Data
//! loaded for an older query is dropped, so counts stay at zero until a matching response
//! arrives.
//!
//! Fetching is delegated to the embedding application through [`EventsFetcher`] and
//! [`RepositoryLister`]. Both are asynchronous and may fail with a [`FetchError`]. Failures never
//! propagate into counting: the affected data is treated as empty.
//!
//! ```ignore
//! let mut explorer = Explorer::from_config(config.explorer(), Utc::now());
//! explorer.update(FilterUpdate::CustomBusinessEnabled(true));
//! explorer.refresh(&fetcher).await;
//!
//! let badges = explorer.badges();
//! ```
#![warn(missing_docs)]

mod error;
mod explorer;
mod traits;

pub use crate::error::*;
pub use crate::explorer::*;
pub use crate::traits::*;
