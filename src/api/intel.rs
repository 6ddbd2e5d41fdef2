//! Intelligence event endpoints.

use axum::{extract::State, Json};

use super::{created, ApiResult, CreatedResult};
use crate::db::DocQuery;
use crate::errors::AppError;
use crate::models::{IntelCreate, IntelItem};
use crate::seed;
use crate::AppState;

/// GET /api/intel - List all intel events, newest first.
pub async fn list_intel(State(state): State<AppState>) -> ApiResult<Vec<IntelItem>> {
    seed::ensure_seed_data(&state.store).await?;

    let rows = state.store.find::<IntelItem>(&DocQuery::new()).await?;
    Ok(Json(rows))
}

/// POST /api/intel - Record a new intel event.
pub async fn create_intel(
    State(state): State<AppState>,
    Json(body): Json<IntelCreate>,
) -> CreatedResult<IntelItem> {
    // Validate required fields
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if body.severity.trim().is_empty() {
        return Err(AppError::Validation("Severity is required".to_string()));
    }

    let item = IntelItem::from(body);
    state.store.insert_one(&item).await?;
    created(item)
}
