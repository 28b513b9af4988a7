//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductQueue, ProductService, RedisProductQueue, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Queue backed by the shared Redis pool
pub fn queue(state: &AppState) -> Arc<dyn ProductQueue> {
    Arc::new(RedisProductQueue::new(
        state.redis.clone(),
        state.config.queue.name.clone(),
    ))
}

pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository, queue(state));
    handlers::router(service)
}

/// Create the products table when it does not exist yet
pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    PgProductRepository::new(state.db.clone())
        .ensure_schema()
        .await?;
    Ok(())
}
