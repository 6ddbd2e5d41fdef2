//! Timeline entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Document;

/// A single entry in the operations timeline. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    /// Entry tag, e.g. ingest/match/dispatch.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl TimelineItem {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: kind.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

impl From<TimelineCreate> for TimelineItem {
    fn from(body: TimelineCreate) -> Self {
        Self::new(body.kind, body.text)
    }
}

impl Document for TimelineItem {
    const COLLECTION: &'static str = "timelines";
    const TIMESTAMP_FIELD: &'static str = "created_at";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for appending a timeline entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineCreate {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}
