use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use seatline_core::repository::{SeatStore, StoreError, StoreResult};
use seatline_core::seat::{BookingRecord, Gender};

pub struct PostgresSeatStore {
    pool: PgPool,
}

impl PostgresSeatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    seat_id: i32,
    full_name: String,
    registration_no: String,
    gender: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let seat_id = u32::try_from(row.seat_id)
            .map_err(|_| StoreError::Query(format!("booking {} has negative seat id {}", row.id, row.seat_id)))?;
        let gender = row
            .gender
            .parse::<Gender>()
            .map_err(|e| StoreError::Query(format!("booking {}: {}", row.id, e)))?;

        Ok(BookingRecord {
            id: row.id,
            seat_id,
            full_name: row.full_name,
            registration_no: row.registration_no,
            gender,
            created_at: row.created_at,
        })
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}

#[async_trait]
impl SeatStore for PostgresSeatStore {
    async fn list_bookings(&self) -> StoreResult<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, seat_id, full_name, registration_no, gender, created_at
            FROM seat_bookings
            ORDER BY seat_id, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(BookingRecord::try_from).collect()
    }

    async fn insert_booking(&self, record: &BookingRecord) -> StoreResult<BookingRecord> {
        let seat_id = i32::try_from(record.seat_id)
            .map_err(|_| StoreError::Query(format!("seat id {} out of range", record.seat_id)))?;

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO seat_bookings (id, seat_id, full_name, registration_no, gender, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, seat_id, full_name, registration_no, gender, created_at
            "#,
        )
        .bind(record.id)
        .bind(seat_id)
        .bind(&record.full_name)
        .bind(&record.registration_no)
        .bind(record.gender.as_str())
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Conflict { seat_id: record.seat_id };
                }
            }
            store_error(e)
        })?;

        BookingRecord::try_from(row)
    }

    async fn delete_bookings_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM seat_bookings WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}
