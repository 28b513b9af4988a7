//! Extractors whose rejections render as [`crate::ErrorResponse`] bodies.

pub mod id_path;
pub mod json_body;
pub mod query_params;

pub use id_path::IdPath;
pub use json_body::JsonBody;
pub use query_params::QueryParams;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        routing::{get, post},
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        price: f64,
    }

    #[derive(Deserialize)]
    struct Window {
        limit: Option<u32>,
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(|IdPath(id): IdPath| async move { id.to_string() }))
            .route(
                "/items",
                post(|JsonBody(p): JsonBody<Payload>| async move { p.price.to_string() })
                    .get(|QueryParams(w): QueryParams<Window>| async move {
                        w.limit.unwrap_or_default().to_string()
                    }),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_of(body: &str) -> ErrorResponse {
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_id_path_parses_integer() {
        let req = Request::get("/items/42").body(Body::empty()).unwrap();
        assert_eq!(send(req).await, (StatusCode::OK, "42".to_string()));
    }

    #[tokio::test]
    async fn test_id_path_rejects_non_integer() {
        let req = Request::get("/items/abc").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&body).error, "INVALID_PATH_PARAM");
    }

    #[tokio::test]
    async fn test_json_body_rejects_wrong_type() {
        let req = Request::post("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"price":"free"}"#))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_of(&body).code, 1003);
    }

    #[tokio::test]
    async fn test_json_body_rejects_syntax_error() {
        let req = Request::post("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_body_requires_content_type() {
        let req = Request::post("/items")
            .body(Body::from(r#"{"price":1.0}"#))
            .unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_query_params_reject_malformed_values() {
        let req = Request::get("/items?limit=many").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&body).error, "INVALID_QUERY");

        let req = Request::get("/items?limit=3").body(Body::empty()).unwrap();
        assert_eq!(send(req).await, (StatusCode::OK, "3".to_string()));
    }
}
