use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::info;
use crate::repository::{SeatStore, StoreResult};

/// Frees seats whose booking is older than the retention window.
pub struct ExpirySweeper {
    store: Arc<dyn SeatStore>,
    retention: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn SeatStore>, retention: Duration) -> Self {
        Self { store, retention }
    }

    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.retention
    }

    /// Purges bookings created before `now - retention`.
    pub async fn sweep(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let cutoff = self.cutoff(now);
        let purged = self.store.delete_bookings_older_than(cutoff).await?;
        if purged > 0 {
            info!("Expired {} bookings created before {}", purged, cutoff.to_rfc3339());
        }
        Ok(purged)
    }
}
