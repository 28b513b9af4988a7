use tracing::debug;

use super::RedisPool;
use crate::common::{DatabaseError, DatabaseResult};

/// Check out a pooled connection and `PING` it.
pub async fn check_health(pool: &RedisPool) -> DatabaseResult<()> {
    let mut conn = pool
        .get()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("Redis pool: {e}")))?;

    let response: String = redis::cmd("PING")
        .query_async(&mut *conn)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("Redis: {e}")))?;

    if response != "PONG" {
        return Err(DatabaseError::HealthCheckFailed(format!(
            "Redis PING returned unexpected response: {response}"
        )));
    }

    debug!("Redis health check passed");
    Ok(())
}
