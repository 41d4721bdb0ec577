pub mod seat;
pub mod policy;
pub mod reconcile;
pub mod rules;
pub mod repository;
pub mod expiry;
pub mod service;

pub use policy::SeatingPolicy;
pub use reconcile::reconcile;
pub use repository::{SeatStore, StoreError};
pub use rules::{validate_booking, CandidateData, RuleViolation};
pub use seat::{BookingRecord, Gender, Passenger, Seat, SeatPosition, SeatSide};
pub use service::{OccupancySummary, SeatService};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;
