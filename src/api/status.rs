//! Legacy status-check endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::db::DocQuery;
use crate::errors::AppError;
use crate::models::{StatusCheck, StatusCheckCreate};
use crate::AppState;

/// POST /api/status - Record a client status check.
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(body): Json<StatusCheckCreate>,
) -> ApiResult<StatusCheck> {
    if body.client_name.trim().is_empty() {
        return Err(AppError::Validation("Client name is required".to_string()));
    }

    let check = StatusCheck::from(body);
    state.store.insert_one(&check).await?;
    Ok(Json(check))
}

/// GET /api/status - List recorded status checks, newest first.
pub async fn get_status_checks(State(state): State<AppState>) -> ApiResult<Vec<StatusCheck>> {
    let rows = state.store.find::<StatusCheck>(&DocQuery::new()).await?;
    Ok(Json(rows))
}
