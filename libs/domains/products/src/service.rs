//! Product Service - business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::queue::ProductQueue;
use crate::repository::ProductRepository;

/// Product service
///
/// Checks existence before mutating and notifies the work queue after a
/// successful create.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    queue: Arc<dyn ProductQueue>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, queue: Arc<dyn ProductQueue>) -> Self {
        Self {
            repository: Arc::new(repository),
            queue,
        }
    }

    /// List products, ascending by id, inside the optional creation window
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Create a product and enqueue its id in the background.
    ///
    /// The response never waits on, or fails because of, the queue.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.repository.create(input).await?;

        let queue = Arc::clone(&self.queue);
        let product_id = product.id;
        tokio::spawn(async move {
            if let Err(e) = queue.push(product_id).await {
                tracing::warn!(product_id, error = %e, "Failed to enqueue created product");
            }
        });

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Update the supplied fields of a product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        self.get_product(id).await?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning the record as it was just before deletion
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        self.get_product(id).await?;

        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}
