use core_config::{ConfigError, FromEnv, env_parse_or};

/// Redis connection and pool settings.
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub url: String,
    /// Maximum pooled connections. Blocking commands hold one for their full duration.
    pub pool_size: u32,
    /// Seconds to wait for a free pooled connection.
    pub connection_timeout_secs: u64,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            pool_size: 16,
            connection_timeout_secs: 10,
        }
    }
}

/// Environment variables:
/// - `REDIS_URL` or `REDIS_HOST` (required)
/// - `REDIS_POOL_SIZE` (default 16)
/// - `REDIS_CONNECTION_TIMEOUT` (seconds, default 10)
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_HOST"))
            .map_err(|_| ConfigError::MissingEnvVar("REDIS_URL or REDIS_HOST".to_string()))?;
        let defaults = Self::default();

        Ok(Self {
            url,
            pool_size: env_parse_or("REDIS_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: env_parse_or(
                "REDIS_CONNECTION_TIMEOUT",
                defaults.connection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_config_new() {
        let config = RedisConfig::new("redis://localhost:6379").with_pool_size(4);
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.connection_timeout_secs, 10);
    }

    #[test]
    fn test_redis_config_from_env_with_redis_url() {
        temp_env::with_vars(
            [
                ("REDIS_URL", Some("redis://localhost:6379")),
                ("REDIS_POOL_SIZE", None),
            ],
            || {
                let config = RedisConfig::from_env().unwrap();
                assert_eq!(config.url, "redis://localhost:6379");
                assert_eq!(config.pool_size, 16);
            },
        );
    }

    #[test]
    fn test_redis_config_from_env_falls_back_to_redis_host() {
        temp_env::with_vars(
            [("REDIS_URL", None::<&str>), ("REDIS_HOST", Some("redis://cache:6379"))],
            || {
                let config = RedisConfig::from_env().unwrap();
                assert_eq!(config.url, "redis://cache:6379");
            },
        );
    }

    #[test]
    fn test_redis_config_from_env_missing() {
        temp_env::with_vars([("REDIS_URL", None::<&str>), ("REDIS_HOST", None)], || {
            let err = RedisConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("REDIS_URL"));
        });
    }

    #[test]
    fn test_redis_config_from_env_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("REDIS_URL", Some("redis://localhost:6379")),
                ("REDIS_POOL_SIZE", Some("-1")),
            ],
            || {
                let err = RedisConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("REDIS_POOL_SIZE"));
            },
        );
    }
}
