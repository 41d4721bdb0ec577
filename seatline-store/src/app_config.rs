use serde::Deserialize;
use std::env;
use seatline_core::policy::{
    PolicyError, SeatingPolicy, DEFAULT_BACK_ROW_SEATS, DEFAULT_RETENTION_HOURS, DEFAULT_TOTAL_SEATS,
    DEFAULT_WOMEN_ONLY_THROUGH,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seating: SeatingConfig,
    #[serde(default)]
    pub sweeper: SweeperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Bookings live in process memory and vanish on restart
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatingConfig {
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
    #[serde(default = "default_women_only_through")]
    pub women_only_through: u32,
    #[serde(default = "default_back_row_seats")]
    pub back_row_seats: u32,
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,
}

fn default_total_seats() -> u32 { DEFAULT_TOTAL_SEATS }
fn default_women_only_through() -> u32 { DEFAULT_WOMEN_ONLY_THROUGH }
fn default_back_row_seats() -> u32 { DEFAULT_BACK_ROW_SEATS }
fn default_retention_hours() -> i64 { DEFAULT_RETENTION_HOURS }

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            total_seats: default_total_seats(),
            women_only_through: default_women_only_through(),
            back_row_seats: default_back_row_seats(),
            retention_hours: default_retention_hours(),
        }
    }
}

impl SeatingConfig {
    pub fn to_policy(&self) -> Result<SeatingPolicy, PolicyError> {
        SeatingPolicy::with_retention_hours(
            self.total_seats,
            self.women_only_through,
            self.back_row_seats,
            self.retention_hours,
        )
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SweeperConfig {
    /// Seconds between background sweeps; unset or 0 leaves sweeping to the admin endpoint
    pub interval_seconds: Option<u64>,
}

impl SweeperConfig {
    pub fn interval(&self) -> Option<std::time::Duration> {
        self.interval_seconds
            .filter(|secs| *secs > 0)
            .map(std::time::Duration::from_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SEATLINE__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("SEATLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_minimal_config_uses_bus_defaults() {
        let cfg = parse(
            r#"
            [server]
            port = 3000
            [database]
            url = "postgres://localhost/seatline"
            "#,
        );

        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.storage.backend, StorageBackend::Postgres);
        assert_eq!(cfg.seating.to_policy().unwrap(), SeatingPolicy::default());
        assert!(cfg.sweeper.interval().is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = parse(
            r#"
            [server]
            port = 8080
            [database]
            url = "postgres://db/seatline"
            max_connections = 10
            [storage]
            backend = "memory"
            [seating]
            total_seats = 40
            women_only_through = 10
            retention_hours = 2
            [sweeper]
            interval_seconds = 600
            "#,
        );

        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        let policy = cfg.seating.to_policy().unwrap();
        assert_eq!(policy.total_seats, 40);
        assert_eq!(policy.women_only_through, 10);
        assert_eq!(policy.back_row_seats, 5);
        assert_eq!(policy.retention, chrono::Duration::hours(2));
        assert_eq!(cfg.sweeper.interval(), Some(std::time::Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_interval_disables_worker() {
        let sweeper = SweeperConfig { interval_seconds: Some(0) };
        assert!(sweeper.interval().is_none());
    }

    #[test]
    fn test_invalid_seating_is_rejected() {
        let seating = SeatingConfig { women_only_through: 60, ..Default::default() };
        assert!(matches!(
            seating.to_policy(),
            Err(PolicyError::WomenOnlyOutOfRange { through: 60, total: 55 })
        ));
    }

    #[test]
    fn test_huge_retention_is_rejected_not_panicking() {
        let seating = SeatingConfig { retention_hours: i64::MAX, ..Default::default() };
        assert!(matches!(
            seating.to_policy(),
            Err(PolicyError::RetentionOutOfRange { hours: i64::MAX })
        ));
    }
}
