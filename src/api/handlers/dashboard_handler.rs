//! Dashboard handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::DashboardStats;
use crate::errors::AppResult;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

/// Headline figures for the landing screen
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Current store totals", body = DashboardStats),
        (status = 502, description = "A source collection failed to load")
    ),
    security(("bearer_auth" = []))
)]
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.dashboard.stats().await?;
    Ok(Json(stats))
}
