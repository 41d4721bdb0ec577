use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use seatline_shared::pii::Masked;
use crate::expiry::ExpirySweeper;
use crate::policy::SeatingPolicy;
use crate::reconcile::reconcile;
use crate::repository::{SeatStore, StoreError, StoreResult};
use crate::rules::{validate_booking, CandidateData, RuleViolation};
use crate::seat::{BookingRecord, Gender, Seat};
use crate::BookingResult;

/// Occupancy counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub total: u32,
    pub available: u32,
    pub booked: u32,
    pub male: u32,
    pub female: u32,
}

impl OccupancySummary {
    pub fn from_seats(seats: &[Seat]) -> Self {
        let count = |gender: Gender| seats.iter().filter(|s| s.gender() == Some(gender)).count() as u32;
        let booked = seats.iter().filter(|s| s.is_booked()).count() as u32;
        let total = seats.len() as u32;

        Self {
            total,
            available: total - booked,
            booked,
            male: count(Gender::Male),
            female: count(Gender::Female),
        }
    }
}

/// Request-scoped entry point for everything that reads or changes seats.
/// Holds no seat state of its own; every call starts from the store.
#[derive(Clone)]
pub struct SeatService {
    store: Arc<dyn SeatStore>,
    policy: SeatingPolicy,
}

impl SeatService {
    pub fn new(store: Arc<dyn SeatStore>, policy: SeatingPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &SeatingPolicy {
        &self.policy
    }

    pub async fn seat_map(&self) -> StoreResult<Vec<Seat>> {
        let records = self.store.list_bookings().await?;
        Ok(reconcile(&records, &self.policy))
    }

    pub async fn seat(&self, seat_id: i64) -> BookingResult<Seat> {
        if !self.policy.contains(seat_id) {
            return Err(RuleViolation::InvalidSeat {
                seat_id,
                total: self.policy.total_seats,
            }
            .into());
        }

        let seats = self.seat_map().await?;
        seats
            .into_iter()
            .find(|s| s.id as i64 == seat_id)
            .ok_or_else(|| StoreError::Query(format!("seat {} missing from seat map", seat_id)).into())
    }

    pub async fn summary(&self) -> StoreResult<OccupancySummary> {
        Ok(OccupancySummary::from_seats(&self.seat_map().await?))
    }

    /// Validates and stores one booking.
    ///
    /// The store's unique constraint is what actually settles two concurrent
    /// bookings for the same seat; the loser gets `SeatAlreadyBooked` too.
    pub async fn book(
        &self,
        seat_id: i64,
        candidate: &CandidateData,
        now: DateTime<Utc>,
    ) -> BookingResult<BookingRecord> {
        let seats = self.seat_map().await?;
        let approved = validate_booking(&self.policy, seat_id, candidate, &seats, now).map_err(|violation| {
            info!("Booking for seat {} refused: {}", seat_id, violation);
            violation
        })?;

        match self.store.insert_booking(&approved).await {
            Ok(stored) => {
                info!(
                    "Seat {} booked for {} ({})",
                    stored.seat_id,
                    Masked(stored.registration_no.as_str()),
                    stored.gender
                );
                Ok(stored)
            }
            Err(StoreError::Conflict { seat_id }) => {
                warn!("Seat {} was taken by a concurrent booking", seat_id);
                Err(RuleViolation::SeatAlreadyBooked { seat_id }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn purge_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        ExpirySweeper::new(self.store.clone(), self.policy.retention)
            .sweep(now)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store whose list is frozen, so a second insert for a seat only fails
    /// at the store's own constraint check.
    struct StaleListStore {
        inserted: Mutex<Vec<BookingRecord>>,
    }

    #[async_trait]
    impl SeatStore for StaleListStore {
        async fn list_bookings(&self) -> StoreResult<Vec<BookingRecord>> {
            Ok(vec![])
        }

        async fn insert_booking(&self, record: &BookingRecord) -> StoreResult<BookingRecord> {
            let mut inserted = self.inserted.lock().unwrap();
            if inserted.iter().any(|r| r.seat_id == record.seat_id) {
                return Err(StoreError::Conflict { seat_id: record.seat_id });
            }
            inserted.push(record.clone());
            Ok(record.clone())
        }

        async fn delete_bookings_older_than(&self, _cutoff: DateTime<Utc>) -> StoreResult<u64> {
            Ok(0)
        }
    }

    fn candidate(gender: &str) -> CandidateData {
        CandidateData {
            full_name: Some("Alex Doe".to_string()),
            registration_no: Some("REG100".to_string()),
            gender: Some(gender.to_string()),
        }
    }

    #[tokio::test]
    async fn test_store_conflict_maps_to_seat_already_booked() {
        let service = SeatService::new(
            Arc::new(StaleListStore { inserted: Mutex::new(vec![]) }),
            SeatingPolicy::default(),
        );

        service.book(30, &candidate("male"), Utc::now()).await.unwrap();
        let err = service.book(30, &candidate("female"), Utc::now()).await.unwrap_err();

        assert!(matches!(
            err,
            BookingError::Rule(RuleViolation::SeatAlreadyBooked { seat_id: 30 })
        ));
    }

    #[tokio::test]
    async fn test_seat_lookup_rejects_unknown_ids() {
        let service = SeatService::new(
            Arc::new(StaleListStore { inserted: Mutex::new(vec![]) }),
            SeatingPolicy::default(),
        );

        assert_eq!(service.seat(55).await.unwrap().id, 55);
        assert!(matches!(
            service.seat(56).await.unwrap_err(),
            BookingError::Rule(RuleViolation::InvalidSeat { seat_id: 56, total: 55 })
        ));
    }

    #[test]
    fn test_summary_counts() {
        let policy = SeatingPolicy::default();
        let now = Utc::now();
        let records: Vec<BookingRecord> = [(1, Gender::Female), (3, Gender::Female), (30, Gender::Male)]
            .into_iter()
            .map(|(seat_id, gender)| BookingRecord {
                id: uuid::Uuid::new_v4(),
                seat_id,
                full_name: "P".to_string(),
                registration_no: "R".to_string(),
                gender,
                created_at: now,
            })
            .collect();

        let summary = OccupancySummary::from_seats(&reconcile(&records, &policy));
        assert_eq!(
            summary,
            OccupancySummary { total: 55, available: 52, booked: 3, male: 1, female: 2 }
        );
    }
}
