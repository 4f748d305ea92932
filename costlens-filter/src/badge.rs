//! Counts matching events and caps the displayed count for badges.

use std::fmt;

use costlens_base_schema::EventCategory;
use costlens_event_schema::AggregatedEvents;
use serde::{Serialize, Serializer};

use crate::{SourceSelector, matching};

/// The largest count that is displayed literally. Larger counts show as `9+`.
pub const MAX_DISPLAYED_COUNT: usize = 9;

/// A count of matching events, displayed with a cap to fit a badge.
///
/// ```
/// use costlens_filter::BadgeCount;
///
/// assert_eq!(BadgeCount::new(9).to_string(), "9");
/// assert_eq!(BadgeCount::new(10).to_string(), "9+");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BadgeCount(usize);

impl BadgeCount {
    /// Creates a badge for the given exact count.
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    /// Returns the exact count.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if the count exceeds [`MAX_DISPLAYED_COUNT`] and is shown as `9+`.
    pub fn is_capped(self) -> bool {
        self.0 > MAX_DISPLAYED_COUNT
    }
}

impl From<usize> for BadgeCount {
    fn from(count: usize) -> Self {
        Self::new(count)
    }
}

impl fmt::Display for BadgeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_capped() {
            write!(f, "{MAX_DISPLAYED_COUNT}+")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for BadgeCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Counts the events matching both selectors for display in a badge.
///
/// A missing response counts as zero.
pub fn count(
    events: Option<&AggregatedEvents>,
    category: Option<EventCategory>,
    source: Option<SourceSelector>,
) -> BadgeCount {
    BadgeCount::new(matching(events, category, source).count())
}
