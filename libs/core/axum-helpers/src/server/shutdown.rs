use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Fans a single shutdown event out to the HTTP server and background tasks.
///
/// Background loops take a [`watch::Receiver<bool>`] from [`subscribe`](Self::subscribe)
/// and stop once it reads `true`.
#[derive(Clone, Debug)]
pub struct ShutdownCoordinator {
    tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark shutdown as started. Only the first call notifies subscribers.
    pub fn shutdown(&self) {
        let initiated = self.tx.send_if_modified(|state| !std::mem::replace(state, true));
        if initiated {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolve once [`shutdown`](Self::shutdown) has been called.
    pub async fn wait(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so this only fails if it is dropped mid-wait.
        let _ = rx.wait_for(|stopping| *stopping).await;
    }

    /// Wait for SIGINT or SIGTERM, then call [`shutdown`](Self::shutdown).
    pub async fn wait_for_signal(&self) {
        tokio::select! {
            _ = ctrl_c() => info!("Received SIGINT (Ctrl+C)"),
            _ = terminate() => info!("Received SIGTERM"),
            _ = self.wait() => return,
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscribers_observe_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();
        assert!(!*rx.borrow());
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();

        rx.changed().await.unwrap();
        assert!(*rx.borrow());
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn test_shutdown_notifies_once() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();

        coordinator.shutdown();
        rx.changed().await.unwrap();
        coordinator.shutdown();

        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_wait_resolves_after_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let waiter = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.wait().await })
        };

        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_signal_returns_on_programmatic_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let listener = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.wait_for_signal().await })
        };

        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(1), listener)
            .await
            .expect("listener should stop")
            .unwrap();
    }
}
