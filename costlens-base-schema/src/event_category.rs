//! Defines the [`EventCategory`] type that classifies events shown in the explorer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classifies an event.
///
/// Every event carries exactly one category. The category is independent of the event's
/// [`EventSource`](crate::EventSource): a GitHub sourced event may be filed under any category.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    /// Business milestones such as launches or campaigns.
    Business,
    /// Technical changes such as deployments or migrations.
    Technical,
    /// Events reported by the cloud provider, for instance commitments or reservations.
    Provider,
}

impl EventCategory {
    /// All categories in their canonical iteration order.
    pub const ALL: [Self; 3] = [Self::Business, Self::Technical, Self::Provider];

    /// Returns the canonical name of this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Business => "BUSINESS",
            Self::Technical => "TECHNICAL",
            Self::Provider => "PROVIDER",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error used when parsing [`EventCategory`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid event category")]
pub struct ParseEventCategoryError;

impl FromStr for EventCategory {
    type Err = ParseEventCategoryError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(match string {
            "BUSINESS" => Self::Business,
            "TECHNICAL" => Self::Technical,
            "PROVIDER" => Self::Provider,
            _ => return Err(ParseEventCategoryError),
        })
    }
}
