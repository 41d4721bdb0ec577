use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use seatline_core::OccupancySummary;
use crate::error::AppError;
use crate::seats::{SeatMapResponse, SeatView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub message: String,
    pub purged: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/seats", get(list_seats))
        .route("/v1/admin/summary", get(summary))
        .route("/v1/admin/bookings/expired", delete(purge_expired))
}

/// GET /v1/admin/seats
async fn list_seats(State(state): State<AppState>) -> Result<Json<SeatMapResponse>, AppError> {
    let seats = state.seats.seat_map().await?;
    Ok(Json(SeatMapResponse {
        seats: seats.iter().map(SeatView::full).collect(),
    }))
}

/// GET /v1/admin/summary
async fn summary(State(state): State<AppState>) -> Result<Json<OccupancySummary>, AppError> {
    Ok(Json(state.seats.summary().await?))
}

/// DELETE /v1/admin/bookings/expired
/// Frees every seat whose booking has outlived the retention window.
async fn purge_expired(State(state): State<AppState>) -> Result<Json<PurgeResponse>, AppError> {
    let purged = state.seats.purge_expired(Utc::now()).await?;
    let hours = state.seats.policy().retention.num_hours();

    Ok(Json(PurgeResponse {
        message: format!("Removed {} bookings older than {} hours", purged, hours),
        purged,
    }))
}
