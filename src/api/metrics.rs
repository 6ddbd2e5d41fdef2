//! Aggregate metrics endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiResult;
use crate::db::DocQuery;
use crate::models::{CaseItem, IntelItem};
use crate::seed;
use crate::AppState;

/// Summary counters derived from live collection counts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Metrics {
    pub open_cases: i64,
    pub active_ops: i64,
    pub alerts_today: i64,
    pub resolution_rate: i64,
}

/// GET /api/metrics - Recompute the dashboard counters.
pub async fn get_metrics(State(state): State<AppState>) -> ApiResult<Metrics> {
    seed::ensure_seed_data(&state.store).await?;

    let store = &state.store;
    let total_cases = store.count::<CaseItem>(&DocQuery::new()).await?;
    let active_ops = store
        .count::<CaseItem>(&DocQuery::new().eq("status", "active"))
        .await?;
    let backlog = store
        .count::<CaseItem>(&DocQuery::new().eq("status", "backlog"))
        .await?;
    let archived = store
        .count::<CaseItem>(&DocQuery::new().eq("status", "archived"))
        .await?;

    // Alerts today from intel events created today
    let (start, end) = today_bounds();
    let alerts_today = store
        .count::<IntelItem>(&DocQuery::new().between("created_at", start, end))
        .await?;

    // Simple resolution rate = archived / total (as %)
    let resolution_rate = if total_cases > 0 {
        archived * 100 / total_cases
    } else {
        0
    };

    Ok(Json(Metrics {
        open_cases: active_ops + backlog,
        active_ops,
        alerts_today,
        resolution_rate,
    }))
}

/// Inclusive bounds of the current UTC calendar day.
fn today_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::microseconds(1);
    (start, end)
}
