use super::cors::cors_layer_from_env;
use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Wrap `apis` with documentation and cross-cutting layers.
///
/// - Swagger UI at `/docs`, ReDoc at `/redoc`, the document at [`OPENAPI_JSON_PATH`]
/// - `apis` merged at the root, state already applied
/// - JSON 404 and 405 fallbacks
/// - request tracing, CORS (see [`cors_layer_from_env`]) and response compression
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer_from_env()?)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until `coordinator` shuts down, then run `cleanup`.
///
/// SIGINT/SIGTERM trigger the coordinator. In-flight requests drain first;
/// `cleanup` then gets `server_config.shutdown_timeout` to finish.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_listener = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let serve_result = {
        let coordinator = coordinator.clone();
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { coordinator.wait().await })
            .await
            .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))
    };

    // Serve can also stop on an I/O error; background tasks still need the signal.
    coordinator.shutdown();
    signal_listener.abort();

    let timeout = server_config.shutdown_timeout;
    info!(?timeout, "Running cleanup");
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(?timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}
