//! Router assembly, liveness/readiness helpers and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router, ShutdownCoordinator};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes.merge(health_router(app_info!())))?;
//! let coordinator = ShutdownCoordinator::new();
//! create_production_app(router, &config.server, coordinator, async {}).await?;
//! ```

pub mod app;
pub mod cors;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, create_production_app, create_router};
pub use cors::{cors_layer, cors_layer_from_env};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
