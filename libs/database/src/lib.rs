//! Connectors for the stores the inventory service depends on.
//!
//! - `postgres` (default): SeaORM connection pool, config, health check
//! - `redis` (default): bb8 pool of multiplexed Redis connections, config, health check
//!
//! ```ignore
//! use database::{postgres, redis};
//! use core_config::FromEnv;
//!
//! let db = postgres::connect_from_config_with_retry(postgres::PostgresConfig::from_env()?, None).await?;
//! let pool = redis::connect_from_config_with_retry(&redis::RedisConfig::from_env()?, None).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
