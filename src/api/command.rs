//! Command center endpoints.
//!
//! Transmissions are never seeded; the collection starts empty.

use axum::{extract::State, Json};

use super::{created, ApiResult, CreatedResult};
use crate::db::DocQuery;
use crate::errors::AppError;
use crate::models::{CommandCreate, CommandItem};
use crate::AppState;

/// GET /api/command - List logged transmissions, newest first.
pub async fn list_command(State(state): State<AppState>) -> ApiResult<Vec<CommandItem>> {
    let rows = state.store.find::<CommandItem>(&DocQuery::new()).await?;
    Ok(Json(rows))
}

/// POST /api/command - Log a transmission.
pub async fn create_command(
    State(state): State<AppState>,
    Json(body): Json<CommandCreate>,
) -> CreatedResult<CommandItem> {
    if body.codename.trim().is_empty() {
        return Err(AppError::Validation("Codename is required".to_string()));
    }
    if body.agent.trim().is_empty() {
        return Err(AppError::Validation("Agent is required".to_string()));
    }
    if body.channel.trim().is_empty() {
        return Err(AppError::Validation("Channel is required".to_string()));
    }
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let item = CommandItem::from(body);
    state.store.insert_one(&item).await?;
    created(item)
}
