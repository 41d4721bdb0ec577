use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::seat::BookingRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store's uniqueness constraint on the seat id rejected the insert.
    #[error("Seat {seat_id} already has a booking")]
    Conflict { seat_id: u32 },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store query failed: {0}")]
    Query(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for booking records.
///
/// Implementations do no validation of their own, but must reject a second
/// record for the same seat atomically with `StoreError::Conflict`.
#[async_trait]
pub trait SeatStore: Send + Sync {
    async fn list_bookings(&self) -> StoreResult<Vec<BookingRecord>>;

    async fn insert_booking(&self, record: &BookingRecord) -> StoreResult<BookingRecord>;

    /// Removes every booking created strictly before `cutoff`, returning how many went.
    async fn delete_bookings_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64>;
}
