//! # Axum Helpers
//!
//! Shared pieces for the inventory HTTP service.
//!
//! - **[`errors`]**: `AppError`, error codes and the JSON error body
//! - **[`extractors`]**: path, query and JSON extractors that reject with that body
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, JsonBody, QueryParams};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
