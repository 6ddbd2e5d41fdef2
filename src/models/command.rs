//! Command transmission model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Document;

/// A transmission logged through the command center. Immutable after
/// creation; the collection starts empty and is never seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandItem {
    pub id: String,
    pub codename: String,
    pub agent: String,
    pub channel: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommandCreate> for CommandItem {
    fn from(body: CommandCreate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            codename: body.codename,
            agent: body.agent,
            channel: body.channel,
            message: body.message,
            created_at: Utc::now(),
        }
    }
}

impl Document for CommandItem {
    const COLLECTION: &'static str = "transmissions";
    const TIMESTAMP_FIELD: &'static str = "created_at";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for logging a transmission.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandCreate {
    pub codename: String,
    pub agent: String,
    pub channel: String,
    pub message: String,
}
