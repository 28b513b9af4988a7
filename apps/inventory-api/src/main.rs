//! Inventory Manager API - REST server and product queue consumer

use axum_helpers::server::{ShutdownCoordinator, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{NoopProductHandler, QueueConsumer};
use std::sync::Arc;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(app = config.app.name, version = config.app.version, "Starting");

    let (db, redis) = tokio::try_join!(
        async {
            database::postgres::connect_from_config_with_retry(config.database.clone(), None)
                .await
                .map_err(eyre::Report::from)
        },
        async {
            database::redis::connect_from_config_with_retry(&config.redis, None)
                .await
                .map_err(eyre::Report::from)
        },
    )?;

    let state = AppState {
        config: config.clone(),
        db,
        redis,
    };

    api::products::init_schema(&state).await?;

    let coordinator = ShutdownCoordinator::new();

    let consumer = QueueConsumer::new(
        api::products::queue(&state),
        Arc::new(NoopProductHandler),
        config.queue.consumer_config(),
    );
    let consumer_handle = {
        let shutdown = coordinator.subscribe();
        tokio::spawn(async move { consumer.run(shutdown).await })
    };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state))?;

    info!(
        "Goto {}/docs to see the API documentation",
        config.server.public_url()
    );

    let db = state.db.clone();
    create_production_app(router, &config.server, coordinator, async move {
        match consumer_handle.await {
            Ok(Ok(())) => info!("Queue consumer finished"),
            Ok(Err(e)) => error!(error = %e, "Queue consumer stopped with error"),
            Err(e) => error!(error = %e, "Queue consumer task panicked"),
        }

        info!("Closing PostgreSQL connections");
        if let Err(e) = db.close().await {
            error!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await?;

    info!("Inventory API shutdown complete");
    Ok(())
}
