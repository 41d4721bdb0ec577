use chrono::Utc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};
use seatline_core::SeatService;

/// Runs the expiry sweep every `period` until the task is dropped.
pub async fn start_expiry_worker(seats: SeatService, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Expiry worker started, sweeping every {:?}", period);

    loop {
        ticker.tick().await;
        match seats.purge_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(purged) => info!("Expiry worker freed {} seats", purged),
            Err(e) => error!("Expiry sweep failed: {}", e),
        }
    }
}
