//! External concerns: database, payment gateway, notification relay

pub mod database;
pub mod gateway;
pub mod notifier;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
