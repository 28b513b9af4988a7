use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use redis::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Failures of the product work queue. An empty pop is not an error.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Invalid queue entry: {0:?}")]
    Decode(String),
}

pub type QueueResult<T> = Result<T, QueueError>;

impl From<bb8::RunError<RedisError>> for QueueError {
    fn from(err: bb8::RunError<RedisError>) -> Self {
        match err {
            bb8::RunError::User(e) => QueueError::Redis(e),
            bb8::RunError::TimedOut => {
                QueueError::Pool("timed out waiting for a connection".to_string())
            }
        }
    }
}
