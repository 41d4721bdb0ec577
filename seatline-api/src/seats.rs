use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use seatline_core::{BookingRecord, CandidateData, Gender, RuleViolation, Seat, SeatSide};
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// One seat as sent to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: u32,
    pub row: u32,
    pub side: SeatSide,
    pub column: u32,
    pub is_booked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<DateTime<Utc>>,
}

impl SeatView {
    /// Everything the admin dashboard needs.
    pub fn full(seat: &Seat) -> Self {
        let passenger = seat.passenger.as_ref();
        Self {
            id: seat.id,
            row: seat.position.row,
            side: seat.position.side,
            column: seat.position.column,
            is_booked: seat.is_booked(),
            gender: passenger.map(|p| p.gender),
            passenger_name: passenger.map(|p| p.full_name.clone()),
            registration_no: passenger.map(|p| p.registration_no.clone()),
            booked_at: passenger.map(|p| p.booked_at),
        }
    }

    /// Public grid: occupancy and gender only, plus the name of male passengers.
    pub fn public(seat: &Seat) -> Self {
        let passenger = seat.passenger.as_ref();
        Self {
            passenger_name: passenger
                .filter(|p| p.gender == Gender::Male)
                .map(|p| p.full_name.clone()),
            registration_no: None,
            booked_at: None,
            ..Self::full(seat)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub seats: Vec<SeatView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatRequest {
    pub seat_id: Option<i64>,
    #[serde(flatten)]
    pub passenger: CandidateData,
}

#[derive(Debug, Serialize)]
pub struct BookSeatResponse {
    pub success: bool,
    pub booking: BookingRecord,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/seats", get(list_seats))
        .route("/v1/seats/{seat_id}", get(get_seat))
        .route("/v1/bookings", post(book_seat))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/seats
async fn list_seats(State(state): State<AppState>) -> Result<Json<SeatMapResponse>, AppError> {
    let seats = state.seats.seat_map().await?;
    Ok(Json(SeatMapResponse {
        seats: seats.iter().map(SeatView::public).collect(),
    }))
}

/// GET /v1/seats/{seat_id}
async fn get_seat(
    State(state): State<AppState>,
    seat_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SeatView>, AppError> {
    let Path(seat_id) = seat_id?;
    let seat = state.seats.seat(seat_id).await?;
    Ok(Json(SeatView::public(&seat)))
}

/// POST /v1/bookings
async fn book_seat(
    State(state): State<AppState>,
    payload: Result<Json<BookSeatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookSeatResponse>), AppError> {
    let Json(req) = payload?;
    let seat_id = req.seat_id.ok_or(RuleViolation::MissingFields)?;
    let booking = state.seats.book(seat_id, &req.passenger, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookSeatResponse {
            success: true,
            booking,
        }),
    ))
}
