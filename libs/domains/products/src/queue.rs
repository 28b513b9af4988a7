//! Work queue of newly created product ids.
//!
//! Producers append to the tail, the consumer pops from the head. Entries are
//! bare ids; nothing is acknowledged or redelivered.

use async_trait::async_trait;
use database::redis::{AsyncCommands, RedisPool};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::error::{QueueError, QueueResult};

pub const DEFAULT_QUEUE_NAME: &str = "product_queue";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQueue: Send + Sync {
    /// Append `product_id` to the tail. Never waits on queue depth.
    async fn push(&self, product_id: i32) -> QueueResult<()>;

    /// Take the oldest id, waiting up to `timeout`. `Ok(None)` means the wait expired.
    async fn pop(&self, timeout: Duration) -> QueueResult<Option<i32>>;
}

/// Redis list queue: `LPUSH` to enqueue, `BRPOP` to dequeue.
///
/// Each call checks a connection out of the pool for its own duration only.
#[derive(Clone)]
pub struct RedisProductQueue {
    pool: RedisPool,
    name: String,
}

impl RedisProductQueue {
    pub fn new(pool: RedisPool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ProductQueue for RedisProductQueue {
    async fn push(&self, product_id: i32) -> QueueResult<()> {
        let mut conn = self.pool.get().await?;
        let _: i64 = conn.lpush(&self.name, product_id).await?;
        tracing::debug!(queue = %self.name, product_id, "Pushed product id");
        Ok(())
    }

    async fn pop(&self, timeout: Duration) -> QueueResult<Option<i32>> {
        let mut conn = self.pool.get().await?;
        let entry: Option<(String, String)> = conn.brpop(&self.name, timeout.as_secs_f64()).await?;

        match entry {
            Some((_, raw)) => raw
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| QueueError::Decode(raw)),
            None => Ok(None),
        }
    }
}

/// Unbounded in-process queue with the same FIFO semantics.
#[derive(Debug, Default)]
pub struct InMemoryProductQueue {
    entries: Mutex<VecDeque<i32>>,
    notify: Notify,
}

impl InMemoryProductQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl ProductQueue for InMemoryProductQueue {
    async fn push(&self, product_id: i32) -> QueueResult<()> {
        self.entries.lock().await.push_back(product_id);
        self.notify.notify_one();
        Ok(())
    }

    async fn pop(&self, timeout: Duration) -> QueueResult<Option<i32>> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            // Register interest before checking so a push in between is not missed.
            let notified = self.notify.notified();
            if let Some(id) = self.entries.lock().await.pop_front() {
                return Ok(Some(id));
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Ok(self.entries.lock().await.pop_front());
            }
        }
    }
}
