//! Landing route pointing at the API documentation

use axum::{Json, Router, extract::State, routing::get};

/// Point callers at the interactive documentation
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses(
        (status = 200, description = "Where to find the API documentation", body = String,
            example = json!("Goto http://0.0.0.0:8000/docs to see the API documentation"))
    )
)]
pub async fn home(State(base_url): State<String>) -> Json<String> {
    Json(format!("Goto {base_url}/docs to see the API documentation"))
}

pub fn router(base_url: String) -> Router {
    Router::new().route("/", get(home)).with_state(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_home_returns_docs_hint() {
        let app = router("http://0.0.0.0:8000".to_string());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: String = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, "Goto http://0.0.0.0:8000/docs to see the API documentation");
    }
}
