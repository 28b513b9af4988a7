//! Application state management

use database::postgres::DatabaseConnection;
use database::redis::RedisPool;

/// Connections shared by every route and the queue consumer
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub redis: RedisPool,
}
