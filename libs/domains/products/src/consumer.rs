//! Background consumer for the product work queue.

use async_trait::async_trait;
use database::common::Backoff;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::{ProductResult, QueueResult};
use crate::queue::ProductQueue;

/// Hook invoked once for every id taken off the queue.
#[async_trait]
pub trait ProductCreatedHandler: Send + Sync {
    async fn handle(&self, product_id: i32) -> ProductResult<()>;
}

/// Default handler: acknowledges the id and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProductHandler;

#[async_trait]
impl ProductCreatedHandler for NoopProductHandler {
    async fn handle(&self, product_id: i32) -> ProductResult<()> {
        debug!(product_id, "Received created product");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// How long a single pop may block
    pub pop_timeout: Duration,
    /// Consecutive queue failures tolerated before the loop gives up
    pub max_consecutive_errors: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            pop_timeout: Duration::from_secs(5),
            max_consecutive_errors: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Drains the queue and hands every id to a [`ProductCreatedHandler`].
pub struct QueueConsumer {
    queue: Arc<dyn ProductQueue>,
    handler: Arc<dyn ProductCreatedHandler>,
    config: ConsumerConfig,
}

impl QueueConsumer {
    pub fn new(
        queue: Arc<dyn ProductQueue>,
        handler: Arc<dyn ProductCreatedHandler>,
        config: ConsumerConfig,
    ) -> Self {
        Self {
            queue,
            handler,
            config,
        }
    }

    /// Run until `shutdown` turns `true` (or its sender is dropped).
    ///
    /// Shutdown is checked between pops and cuts the backoff sleep short. An
    /// in-flight pop always runs to completion (a dropped `BRPOP` stays armed
    /// server-side), so stopping takes up to `pop_timeout`.
    ///
    /// Empty pops loop straight back. Queue failures back off exponentially
    /// and the last error is returned once `max_consecutive_errors` is hit.
    /// Handler failures are logged and the id is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> QueueResult<()> {
        let mut backoff = Backoff::new(self.config.initial_backoff, self.config.max_backoff);
        let mut consecutive_errors = 0u32;

        info!(
            pop_timeout = ?self.config.pop_timeout,
            max_consecutive_errors = self.config.max_consecutive_errors,
            "Queue consumer started"
        );

        loop {
            if stop_requested(&shutdown) {
                break;
            }

            match self.queue.pop(self.config.pop_timeout).await {
                Ok(Some(product_id)) => {
                    consecutive_errors = 0;
                    backoff.reset();
                    self.dispatch(product_id).await;
                }
                Ok(None) => {
                    consecutive_errors = 0;
                    backoff.reset();
                }
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.config.max_consecutive_errors {
                        error!(error = %e, consecutive_errors, "Queue unavailable, stopping consumer");
                        return Err(e);
                    }

                    let delay = backoff.next_delay();
                    warn!(error = %e, consecutive_errors, ?delay, "Queue pop failed, backing off");
                    tokio::select! {
                        _ = shutdown.wait_for(|stop| *stop) => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        info!("Queue consumer stopped");
        Ok(())
    }

    async fn dispatch(&self, product_id: i32) {
        if let Err(e) = self.handler.handle(product_id).await {
            error!(product_id, error = %e, "Product handler failed, dropping entry");
        }
    }
}

/// `true` once shutdown was signalled or the sender is gone.
fn stop_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}
