use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use costlens_base_schema::{EventCategory, EventSource};
use serde::{Deserialize, Serialize};

/// Additional information attached to an event.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct EventMetadata {
    /// The integration that produced the event.
    ///
    /// Absent for events created by users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,

    /// Additional arbitrary fields for forwards compatibility.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// A single event within a time bucket.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique identifier of the event.
    pub id: String,

    /// Display name of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The category this event is filed under.
    pub category: EventCategory,

    /// Timestamp of the event, or the start of the bucket it was aggregated into.
    pub date: DateTime<Utc>,

    /// Cost amount associated with the event, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Source tag and other metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl EventRecord {
    /// Creates a custom event without a name, amount or metadata.
    pub fn new(id: impl Into<String>, category: EventCategory, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            category,
            date,
            amount: None,
            metadata: None,
        }
    }

    /// Sets the source tag of this event.
    #[must_use]
    pub fn with_source(mut self, source: EventSource) -> Self {
        self.metadata.get_or_insert_with(Default::default).source = Some(source);
        self
    }

    /// Returns the source tag, or `None` for user-authored events.
    pub fn source(&self) -> Option<EventSource> {
        self.metadata.as_ref().and_then(|metadata| metadata.source)
    }

    /// Returns `true` if this event was authored by a user.
    pub fn is_custom(&self) -> bool {
        self.source().is_none()
    }
}
