//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::home;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Manager API",
        version = "1.0.0",
        description = "Simple inventory management for an e-commerce platform. Supports CRUD operations on products and queues every new product for background processing."
    ),
    paths(home::home),
    tags(
        (name = "Home", description = "Entry point")
    )
)]
struct ServiceDoc;

/// Service document merged with the products domain document
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
