pub mod app_config;
pub mod database;
pub mod seat_repo;
pub mod memory_repo;

pub use database::DbClient;
pub use memory_repo::MemorySeatStore;
pub use seat_repo::PostgresSeatStore;
