use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use crate::policy::SeatingPolicy;
use crate::seat::{BookingRecord, Gender, Seat};

/// Passenger details as submitted, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateData {
    pub full_name: Option<String>,
    pub registration_no: Option<String>,
    pub gender: Option<String>,
}

/// Why a booking attempt was refused. Each variant names one rule so the
/// passenger can fix the right thing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("Seat {seat_id} does not exist on this bus (valid seats are 1-{total})")]
    InvalidSeat { seat_id: i64, total: u32 },
    #[error("Missing required fields: full name, registration number and gender (male or female) are required")]
    MissingFields,
    #[error("Seat {seat_id} is already booked")]
    SeatAlreadyBooked { seat_id: u32 },
    #[error("Only female passengers can book seats 1-{through}")]
    RowRestrictionViolated { seat_id: u32, through: u32 },
}

impl RuleViolation {
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::InvalidSeat { .. } => "INVALID_SEAT",
            RuleViolation::MissingFields => "MISSING_FIELDS",
            RuleViolation::SeatAlreadyBooked { .. } => "SEAT_ALREADY_BOOKED",
            RuleViolation::RowRestrictionViolated { .. } => "ROW_RESTRICTION_VIOLATED",
        }
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Checks a booking attempt against the current seat map.
///
/// Rules run in a fixed order and stop at the first failure: seat exists,
/// fields present, seat free, women-only rows. On success the returned
/// record is ready to persist; persisting it is up to the caller.
pub fn validate_booking(
    policy: &SeatingPolicy,
    seat_id: i64,
    candidate: &CandidateData,
    seats: &[Seat],
    now: DateTime<Utc>,
) -> Result<BookingRecord, RuleViolation> {
    if !policy.contains(seat_id) {
        return Err(RuleViolation::InvalidSeat {
            seat_id,
            total: policy.total_seats,
        });
    }
    let seat_id = seat_id as u32;

    let (Some(full_name), Some(registration_no), Some(gender)) = (
        required(&candidate.full_name),
        required(&candidate.registration_no),
        required(&candidate.gender).and_then(|g| g.parse::<Gender>().ok()),
    ) else {
        return Err(RuleViolation::MissingFields);
    };

    let already_booked = seats
        .iter()
        .find(|s| s.id == seat_id)
        .is_some_and(Seat::is_booked);
    if already_booked {
        return Err(RuleViolation::SeatAlreadyBooked { seat_id });
    }

    if policy.is_women_only(seat_id) && gender != Gender::Female {
        return Err(RuleViolation::RowRestrictionViolated {
            seat_id,
            through: policy.women_only_through,
        });
    }

    Ok(BookingRecord {
        id: Uuid::new_v4(),
        seat_id,
        full_name: full_name.to_string(),
        registration_no: registration_no.to_string(),
        gender,
        created_at: now,
    })
}
