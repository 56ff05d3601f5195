use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use insights::build_snapshot;
use rowtable::DateRange;
use tracing::{debug, info};

use crate::state::SharedState;
use crate::types::{ApiError, DashboardQuery, DashboardResponse};

pub async fn get_dashboard(
    State(state): State<SharedState>,
    Query(q): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ApiError>)> {
    let full = state.table().full_range();
    let start = q.start_date.unwrap_or(full.start());
    let end = q.end_date.unwrap_or(full.end());

    let range = DateRange::new(start, end)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError { error: e.to_string() })))?;

    let snapshot = build_snapshot(state.table(), range);
    match snapshot.dashboard() {
        Some(d) => info!(%range, rows = d.rows, "dashboard: ready"),
        None => info!(%range, "dashboard: no data in range"),
    }
    debug!(performance = ?snapshot.dashboard().map(|d| d.response.performance), "dashboard built");

    Ok(Json(snapshot.into()))
}
