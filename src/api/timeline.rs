//! Timeline endpoints.

use axum::{extract::State, Json};

use super::{created, ApiResult, CreatedResult};
use crate::db::DocQuery;
use crate::errors::AppError;
use crate::models::{TimelineCreate, TimelineItem};
use crate::seed;
use crate::AppState;

/// GET /api/timeline - List timeline entries, newest first.
pub async fn list_timeline(State(state): State<AppState>) -> ApiResult<Vec<TimelineItem>> {
    seed::ensure_seed_data(&state.store).await?;

    let rows = state.store.find::<TimelineItem>(&DocQuery::new()).await?;
    Ok(Json(rows))
}

/// POST /api/timeline - Append a timeline entry.
pub async fn create_timeline(
    State(state): State<AppState>,
    Json(body): Json<TimelineCreate>,
) -> CreatedResult<TimelineItem> {
    if body.kind.trim().is_empty() {
        return Err(AppError::Validation("Type is required".to_string()));
    }
    if body.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let item = TimelineItem::from(body);
    state.store.insert_one(&item).await?;
    created(item)
}
