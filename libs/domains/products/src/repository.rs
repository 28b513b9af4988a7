use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// Absence is reported as `Ok(None)`; the service turns it into `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Products inside the filter's creation window, ascending by id
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Merge `input` into the stored product; `None` when it does not exist
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Remove a product, returning its last state; `None` when it does not exist
    async fn delete(&self, id: i32) -> ProductResult<Option<Product>>;
}

/// Process-local store used in development and tests.
///
/// Ids start at 1 and increase monotonically like a serial column.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    next_id: AtomicI32,
    products: RwLock<BTreeMap<i32, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
            products: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::from_create(id, input);

        self.products.write().await.insert(id, product.clone());
        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        product.apply_update(input);
        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let removed = self.products.write().await.remove(&id);
        if removed.is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn named(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = InMemoryProductRepository::new();

        let a = repo.create(named("a")).await.unwrap();
        let b = repo.create(named("b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.get_by_id(b.id).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(named("first")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(named("second")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_list_orders_by_id_and_filters() {
        let repo = InMemoryProductRepository::new();
        for day in [10, 1, 20] {
            repo.create(CreateProduct {
                name: format!("day-{day}"),
                created_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let all = repo.list(ProductFilter::default()).await.unwrap();
        let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let window = ProductFilter {
            start_date: Some(Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap()),
        };
        let filtered = repo.list(window).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "day-10");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_return_none() {
        let repo = InMemoryProductRepository::new();

        assert_eq!(repo.update(99, UpdateProduct::default()).await.unwrap(), None);
        assert_eq!(repo.delete(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_returns_last_state() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(named("gone")).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap();

        assert_eq!(deleted, Some(created.clone()));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }
}
