//! Basic types for the Costlens events API schema used across multiple crates.
//!
//! The enumerations in this crate are closed: every variant has a canonical name that is used on
//! the wire, and parsing any other name fails with a dedicated error type.
#![warn(missing_docs)]

mod agg_by;
mod event_category;
mod event_source;

pub use self::agg_by::*;
pub use self::event_category::*;
pub use self::event_source::*;
