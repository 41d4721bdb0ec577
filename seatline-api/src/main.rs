use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use seatline_api::{app, worker, AppState};
use seatline_core::{SeatService, SeatStore};
use seatline_store::app_config::{Config, StorageBackend};
use seatline_store::{DbClient, MemorySeatStore, PostgresSeatStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatline_api=debug,seatline_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let policy = config.seating.to_policy().context("Invalid seating policy")?;
    tracing::info!(
        "Starting Seatline API on port {} ({} seats, women-only through seat {})",
        config.server.port,
        policy.total_seats,
        policy.women_only_through
    );

    let store: Arc<dyn SeatStore> = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database.url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(PostgresSeatStore::new(db.pool.clone()))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; bookings are lost on restart");
            Arc::new(MemorySeatStore::new())
        }
    };

    let seats = SeatService::new(store, policy);

    if let Some(period) = config.sweeper.interval() {
        tokio::spawn(worker::start_expiry_worker(seats.clone(), period));
    }

    let app = app(AppState::new(seats));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
