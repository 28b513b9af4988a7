//! Redis connection pooling and health checks.

mod config;
mod connector;
mod health;

pub use config::RedisConfig;
pub use connector::{RedisConnectionManager, RedisPool, connect, connect_from_config_with_retry};
pub use health::check_health;

pub use redis::{AsyncCommands, RedisError};
