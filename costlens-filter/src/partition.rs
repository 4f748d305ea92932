//! Partitions an aggregated events response by category and source.

use std::fmt;
use std::str::FromStr;

use costlens_base_schema::{EventCategory, EventSource};
use costlens_event_schema::{AggregatedEvents, EventRecord};
use serde::{Deserialize, Serialize};

/// Selects events by their origin.
///
/// Every event matches exactly one selector, which makes the selectors a disjoint cover of any
/// set of events.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelector {
    /// Events imported from GitHub.
    Github,
    /// Events reported by the cloud provider.
    Provider,
    /// Events authored by users, which carry no source tag.
    Custom,
}

impl SourceSelector {
    /// Returns the selector that matches events with the given source tag.
    pub fn of(source: Option<EventSource>) -> Self {
        match source {
            Some(EventSource::Github) => Self::Github,
            Some(EventSource::Provider) => Self::Provider,
            None => Self::Custom,
        }
    }

    /// Returns `true` if an event with the given source tag is selected.
    pub fn matches(self, source: Option<EventSource>) -> bool {
        Self::of(source) == self
    }

    /// Returns the canonical name of this selector.
    pub fn name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Provider => "provider",
            Self::Custom => "custom",
        }
    }
}

impl From<EventSource> for SourceSelector {
    fn from(source: EventSource) -> Self {
        Self::of(Some(source))
    }
}

impl fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error used when parsing [`SourceSelector`].
///
/// A selector outside of `github`, `provider` and `custom` indicates a defect in the caller.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid source selector {0:?}")]
pub struct ParseSourceSelectorError(String);

impl FromStr for SourceSelector {
    type Err = ParseSourceSelectorError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(match string {
            "github" => Self::Github,
            "provider" => Self::Provider,
            "custom" => Self::Custom,
            other => return Err(ParseSourceSelectorError(other.to_owned())),
        })
    }
}

/// Returns an iterator over the records matching both selectors.
///
/// A missing response yields no records. Without a category, all categories are considered;
/// without a source selector, records of every source are kept.
pub fn matching(
    events: Option<&AggregatedEvents>,
    category: Option<EventCategory>,
    source: Option<SourceSelector>,
) -> impl Iterator<Item = &EventRecord> {
    events
        .into_iter()
        .flat_map(move |events| events.records(category))
        .filter(move |record| source.is_none_or(|selector| selector.matches(record.source())))
}

/// Returns the flat list of records matching both selectors.
///
/// Records are ordered by category, then bucket, then position within the bucket.
pub fn partition(
    events: Option<&AggregatedEvents>,
    category: Option<EventCategory>,
    source: Option<SourceSelector>,
) -> Vec<&EventRecord> {
    matching(events, category, source).collect()
}
