//! Health and root endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub database_configured: bool,
}

/// GET /api/health - Fixed-shape liveness probe.
pub async fn health_check(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        service: "crimeconnect-backend",
        database_configured: state.config.db_path_from_env,
    })
}

/// GET /api/ - Root greeting kept for dashboard connectivity checks.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}
