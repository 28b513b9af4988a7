//! Products Domain
//!
//! CRUD over inventory products, persisted in PostgreSQL, plus a Redis list
//! work queue that receives the id of every created product.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────────┐      ┌───────────────┐
//! │   Service   │ ───► │ ProductQueue │ ───► │ QueueConsumer │
//! └──────┬──────┘ push └──────────────┘  pop └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{handlers, PgProductRepository, ProductService, RedisProductQueue};
//! use std::sync::Arc;
//!
//! let repository = PgProductRepository::new(db);
//! repository.ensure_schema().await?;
//!
//! let queue = Arc::new(RedisProductQueue::new(redis_pool, "product_queue"));
//! let service = ProductService::new(repository, queue);
//! let router = handlers::router(service);
//! ```

pub mod consumer;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod queue;
pub mod repository;
pub mod service;

pub use consumer::{ConsumerConfig, NoopProductHandler, ProductCreatedHandler, QueueConsumer};
pub use error::{ProductError, ProductResult, QueueError, QueueResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductFilter, ReadProductQuery, UpdateProduct};
pub use postgres::PgProductRepository;
pub use queue::{DEFAULT_QUEUE_NAME, InMemoryProductQueue, ProductQueue, RedisProductQueue};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
