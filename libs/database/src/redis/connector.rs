use std::time::Duration;

use bb8::ManageConnection;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, RedisError};
use tracing::info;

use super::RedisConfig;
use crate::common::{DatabaseResult, RetryConfig, retry_with_backoff};

pub type RedisPool = bb8::Pool<RedisConnectionManager>;

/// bb8 manager handing out [`ConnectionManager`] handles.
///
/// Each handle reconnects on its own after the server drops the socket, and
/// checkout runs a `PING` so a handle that cannot reach the server is replaced
/// instead of being lent out. Responses never time out so blocking commands
/// (`BRPOP`, `BLPOP`) can wait for their own server-side timeout.
#[derive(Clone, Debug)]
pub struct RedisConnectionManager {
    client: Client,
    connection_timeout: Duration,
}

impl RedisConnectionManager {
    pub fn new(url: &str) -> Result<Self, RedisError> {
        Ok(Self {
            client: Client::open(url)?,
            connection_timeout: Duration::from_secs(RedisConfig::default().connection_timeout_secs),
        })
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

impl ManageConnection for RedisConnectionManager {
    type Connection = ConnectionManager;
    type Error = RedisError;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        // A failed reconnect is retried once; after that the pool swaps the handle out.
        let config = ConnectionManagerConfig::new()
            .set_response_timeout(None)
            .set_connection_timeout(Some(self.connection_timeout))
            .set_number_of_retries(1);
        self.client.get_connection_manager_with_config(config).await
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        let pong: String = redis::cmd("PING").query_async(conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(RedisError::from((
                redis::ErrorKind::Client,
                "unexpected PING response",
                pong,
            )))
        }
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

/// Build a pool and verify one connection with `PING`.
pub async fn connect(config: &RedisConfig) -> DatabaseResult<RedisPool> {
    let connection_timeout = Duration::from_secs(config.connection_timeout_secs);
    let manager = RedisConnectionManager::new(&config.url)?.with_connection_timeout(connection_timeout);
    let pool = bb8::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(connection_timeout)
        .test_on_check_out(true)
        .build(manager)
        .await?;

    super::check_health(&pool).await?;
    info!(pool_size = config.pool_size, "Connected to Redis");
    Ok(pool)
}

/// [`connect`] with exponential backoff; `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: &RedisConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<RedisPool> {
    retry_with_backoff(|| connect(config), retry_config.unwrap_or_default()).await
}
