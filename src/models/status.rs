//! Legacy status-check model, predating the domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Document;

/// A client health-check ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl From<StatusCheckCreate> for StatusCheck {
    fn from(body: StatusCheckCreate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: body.client_name,
            timestamp: Utc::now(),
        }
    }
}

impl Document for StatusCheck {
    const COLLECTION: &'static str = "status_checks";
    const TIMESTAMP_FIELD: &'static str = "timestamp";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for recording a status check.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}
