//! API routes module

pub mod health;
pub mod home;
pub mod products;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// All routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(home::router(state.config.server.public_url()))
        .merge(products::router(state))
        .merge(health_router(state.config.app))
        .merge(health::router(state.db.clone(), state.redis.clone()))
}
