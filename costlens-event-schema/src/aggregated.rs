use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use costlens_base_schema::EventCategory;
use serde::{Deserialize, Serialize};

use crate::EventRecord;

/// A time bucket of the aggregated events response.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EventBucket {
    /// Start of the bucket.
    pub date: DateTime<Utc>,
    /// Events aggregated into this bucket, in response order.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl EventBucket {
    /// Creates a bucket from its start date and events.
    pub fn new(date: DateTime<Utc>, events: Vec<EventRecord>) -> Self {
        Self { date, events }
    }
}

/// The response of the aggregation endpoint: time buckets grouped by category.
///
/// Categories are iterated in their canonical order (`BUSINESS`, `TECHNICAL`, `PROVIDER`), buckets
/// in response order. A category missing from the response behaves like a category without
/// buckets.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AggregatedEvents {
    categories: BTreeMap<EventCategory, Vec<EventBucket>>,
}

impl AggregatedEvents {
    /// Returns the response used while no data has been loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a bucket to the given category.
    pub fn push(&mut self, category: EventCategory, bucket: EventBucket) {
        self.categories.entry(category).or_default().push(bucket);
    }

    /// Builder variant of [`push`](Self::push).
    #[must_use]
    pub fn with_bucket(mut self, category: EventCategory, bucket: EventBucket) -> Self {
        self.push(category, bucket);
        self
    }

    /// Returns the buckets of a single category, or of all categories if `category` is `None`.
    pub fn buckets(&self, category: Option<EventCategory>) -> impl Iterator<Item = &EventBucket> {
        self.categories
            .iter()
            .filter(move |(key, _)| category.is_none_or(|selected| selected == **key))
            .flat_map(|(_, buckets)| buckets.iter())
    }

    /// Returns all records of the selected buckets, flattened.
    ///
    /// Records are yielded in category order, then bucket order, then in the order within their
    /// bucket.
    pub fn records(&self, category: Option<EventCategory>) -> impl Iterator<Item = &EventRecord> {
        self.buckets(category)
            .flat_map(|bucket| bucket.events.iter())
    }

    /// Returns the total number of records across all categories and buckets.
    pub fn len(&self) -> usize {
        self.buckets(None).map(|bucket| bucket.events.len()).sum()
    }

    /// Returns `true` if the response contains no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
