//! PostgreSQL pool construction and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config_with_retry, connect_with_options};
pub use health::check_health;

pub use sea_orm::{DatabaseConnection, DbErr};
