use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use seatline_core::repository::{SeatStore, StoreError, StoreResult};
use seatline_core::seat::BookingRecord;

/// Process-local booking store. Inserts are serialized behind a write lock,
/// which gives the same one-booking-per-seat guarantee as the SQL unique
/// constraint.
#[derive(Default)]
pub struct MemorySeatStore {
    bookings: RwLock<Vec<BookingRecord>>,
}

impl MemorySeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store without any uniqueness check, e.g. to replay dirty data.
    pub fn with_bookings(bookings: Vec<BookingRecord>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

#[async_trait]
impl SeatStore for MemorySeatStore {
    async fn list_bookings(&self) -> StoreResult<Vec<BookingRecord>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn insert_booking(&self, record: &BookingRecord) -> StoreResult<BookingRecord> {
        let mut bookings = self.bookings.write().await;
        if bookings.iter().any(|b| b.seat_id == record.seat_id) {
            return Err(StoreError::Conflict { seat_id: record.seat_id });
        }
        bookings.push(record.clone());
        debug!("Stored booking {} for seat {}", record.id, record.seat_id);
        Ok(record.clone())
    }

    async fn delete_bookings_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|b| b.created_at >= cutoff);
        Ok((before - bookings.len()) as u64)
    }
}
