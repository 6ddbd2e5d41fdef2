//! Intelligence event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Document;

/// A single intelligence event. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelItem {
    pub id: String,
    pub title: String,
    /// Severity label (low/medium/high/critical by convention, not enforced).
    pub severity: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl IntelItem {
    /// Build a new event with a fresh id and creation timestamp.
    pub fn new(
        title: impl Into<String>,
        severity: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            severity: severity.into(),
            tags,
            created_at: Utc::now(),
        }
    }
}

impl From<IntelCreate> for IntelItem {
    fn from(body: IntelCreate) -> Self {
        Self::new(body.title, body.severity, body.tags)
    }
}

impl Document for IntelItem {
    const COLLECTION: &'static str = "intel_events";
    const TIMESTAMP_FIELD: &'static str = "created_at";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for recording an intelligence event.
#[derive(Debug, Clone, Deserialize)]
pub struct IntelCreate {
    pub title: String,
    pub severity: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
