//! Configuration for the Costlens events explorer.
//!
//! The configuration is loaded from a YAML file. All keys are optional:
//!
//! ```yaml
//! logging:
//!   level: debug
//!   format: json
//! explorer:
//!   agg_by: WEEK
//!   lookback_days: 90
//! ```
#![warn(missing_docs)]

mod config;

pub use crate::config::*;
