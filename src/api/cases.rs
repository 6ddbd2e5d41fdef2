//! Case endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{created, ApiResult, CreatedResult};
use crate::db::DocQuery;
use crate::errors::AppError;
use crate::models::{CaseCreate, CaseItem, CaseUpdate};
use crate::seed;
use crate::AppState;

/// Query parameters for case listing.
#[derive(Debug, Deserialize)]
pub struct ListCasesParams {
    pub status: Option<String>,
}

/// GET /api/cases - List cases, optionally filtered by exact status.
pub async fn list_cases(
    State(state): State<AppState>,
    Query(params): Query<ListCasesParams>,
) -> ApiResult<Vec<CaseItem>> {
    seed::ensure_seed_data(&state.store).await?;

    let mut query = DocQuery::new();
    // An empty ?status= behaves like no filter
    if let Some(status) = params.status.filter(|s| !s.is_empty()) {
        query = query.eq("status", status);
    }

    let rows = state.store.find::<CaseItem>(&query).await?;
    Ok(Json(rows))
}

/// POST /api/cases - Open a new case.
pub async fn create_case(
    State(state): State<AppState>,
    Json(body): Json<CaseCreate>,
) -> CreatedResult<CaseItem> {
    // Validate required fields
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if body.status.trim().is_empty() {
        return Err(AppError::Validation("Status is required".to_string()));
    }
    if body.priority.trim().is_empty() {
        return Err(AppError::Validation("Priority is required".to_string()));
    }
    if body.owner.trim().is_empty() {
        return Err(AppError::Validation("Owner is required".to_string()));
    }

    let item = CaseItem::from(body);
    state.store.insert_one(&item).await?;
    created(item)
}

/// PATCH /api/cases/{id} - Apply a partial update and re-stamp updated_at.
pub async fn update_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(body): Json<CaseUpdate>,
) -> ApiResult<CaseItem> {
    let mut patch = body.into_patch();
    if patch.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    patch.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);

    match state
        .store
        .find_one_and_update::<CaseItem>(&case_id, &patch)
        .await?
    {
        Some(case) => Ok(Json(case)),
        None => Err(AppError::NotFound("Case not found".to_string())),
    }
}
