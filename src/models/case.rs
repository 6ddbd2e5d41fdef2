//! Case model. The only mutable record kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Document;

/// An investigative case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseItem {
    pub id: String,
    pub title: String,
    /// Workflow status (active/backlog/archived by convention).
    pub status: String,
    /// Priority label, e.g. P1 through P4.
    pub priority: String,
    pub owner: String,
    /// Running note counter.
    #[serde(default)]
    pub notes: i64,
    /// Set at creation and re-stamped on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl CaseItem {
    pub fn new(
        title: impl Into<String>,
        status: impl Into<String>,
        priority: impl Into<String>,
        owner: impl Into<String>,
        notes: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            status: status.into(),
            priority: priority.into(),
            owner: owner.into(),
            notes,
            updated_at: Utc::now(),
        }
    }
}

impl From<CaseCreate> for CaseItem {
    fn from(body: CaseCreate) -> Self {
        Self::new(body.title, body.status, body.priority, body.owner, body.notes)
    }
}

impl Document for CaseItem {
    const COLLECTION: &'static str = "cases";
    const TIMESTAMP_FIELD: &'static str = "updated_at";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for opening a case.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseCreate {
    pub title: String,
    pub status: String,
    pub priority: String,
    pub owner: String,
    #[serde(default)]
    pub notes: i64,
}

/// Partial update for a case. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub notes: Option<i64>,
}

impl CaseUpdate {
    /// Collect only the fields present in the request into a merge patch.
    pub fn into_patch(self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".to_string(), Value::String(title));
        }
        if let Some(status) = self.status {
            patch.insert("status".to_string(), Value::String(status));
        }
        if let Some(priority) = self.priority {
            patch.insert("priority".to_string(), Value::String(priority));
        }
        if let Some(owner) = self.owner {
            patch.insert("owner".to_string(), Value::String(owner));
        }
        if let Some(notes) = self.notes {
            patch.insert("notes".to_string(), Value::from(notes));
        }
        patch
    }
}
