//! Event records and the aggregated events response.
//!
//! The aggregation endpoint buckets events by time and groups the buckets by
//! [`EventCategory`]. This crate models that response as read-only input:
//!
//! ```json
//! {
//!   "BUSINESS": [
//!     {"date": "2024-03-01T00:00:00Z", "events": [{"id": "evt_1", "category": "BUSINESS", ...}]}
//!   ],
//!   "TECHNICAL": [],
//!   "PROVIDER": []
//! }
//! ```
#![warn(missing_docs)]

mod aggregated;
mod record;

pub use self::aggregated::*;
pub use self::record::*;

pub use costlens_base_schema::{EventCategory, EventSource};
