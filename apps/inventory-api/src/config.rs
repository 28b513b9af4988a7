//! Configuration for the Inventory API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;
use domain_products::{ConsumerConfig, DEFAULT_QUEUE_NAME};
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub queue: QueueConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            queue: QueueConfig::from_env()?,
        })
    }
}

/// Product work queue settings
#[derive(Clone, Debug)]
pub struct QueueConfig {
    pub name: String,
    pub pop_timeout: Duration,
    pub max_consecutive_errors: u32,
}

impl QueueConfig {
    pub fn consumer_config(&self) -> ConsumerConfig {
        ConsumerConfig {
            pop_timeout: self.pop_timeout,
            max_consecutive_errors: self.max_consecutive_errors,
            ..ConsumerConfig::default()
        }
    }
}

impl FromEnv for QueueConfig {
    /// - PRODUCT_QUEUE_NAME: defaults to `product_queue`
    /// - PRODUCT_QUEUE_POP_TIMEOUT_SECS: defaults to 5
    /// - PRODUCT_QUEUE_MAX_ERRORS: defaults to 10
    fn from_env() -> Result<Self, ConfigError> {
        let name = env_or_default("PRODUCT_QUEUE_NAME", DEFAULT_QUEUE_NAME);
        let pop_timeout = Duration::from_secs(env_parse_or("PRODUCT_QUEUE_POP_TIMEOUT_SECS", 5u64)?);
        let max_consecutive_errors = env_parse_or("PRODUCT_QUEUE_MAX_ERRORS", 10u32)?;

        Ok(Self {
            name,
            pop_timeout,
            max_consecutive_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_defaults() {
        temp_env::with_vars_unset(
            [
                "PRODUCT_QUEUE_NAME",
                "PRODUCT_QUEUE_POP_TIMEOUT_SECS",
                "PRODUCT_QUEUE_MAX_ERRORS",
            ],
            || {
                let config = QueueConfig::from_env().unwrap();
                assert_eq!(config.name, "product_queue");
                assert_eq!(config.pop_timeout, Duration::from_secs(5));
                assert_eq!(config.max_consecutive_errors, 10);
            },
        );
    }

    #[test]
    fn test_queue_config_overrides_flow_into_consumer() {
        temp_env::with_vars(
            [
                ("PRODUCT_QUEUE_NAME", Some("staging_products")),
                ("PRODUCT_QUEUE_POP_TIMEOUT_SECS", Some("2")),
                ("PRODUCT_QUEUE_MAX_ERRORS", Some("3")),
            ],
            || {
                let config = QueueConfig::from_env().unwrap();
                assert_eq!(config.name, "staging_products");

                let consumer = config.consumer_config();
                assert_eq!(consumer.pop_timeout, Duration::from_secs(2));
                assert_eq!(consumer.max_consecutive_errors, 3);
                assert_eq!(consumer.max_backoff, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("REDIS_URL", Some("redis://localhost:6379")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/inventory")),
                ("REDIS_URL", Some("redis://localhost:6379")),
                ("PORT", Some("8080")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "inventory_api");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.url, "postgres://localhost/inventory");
                assert_eq!(config.redis.url, "redis://localhost:6379");
            },
        );
    }
}
