use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::{
    entity,
    error::ProductResult,
    models::{CreateProduct, Product, ProductFilter, UpdateProduct},
    repository::ProductRepository,
};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    sku BIGINT,
    image TEXT,
    quantity INTEGER,
    created_at TIMESTAMPTZ NOT NULL
)
"#;

/// PostgreSQL implementation of [`ProductRepository`]
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `products` table if it is missing. Bootstrap only, no migrations.
    pub async fn ensure_schema(&self) -> ProductResult<()> {
        self.db.execute_unprepared(CREATE_TABLE_SQL).await?;
        tracing::info!("Ensured products table exists");
        Ok(())
    }
}

fn list_query(filter: &ProductFilter) -> Select<entity::Entity> {
    let mut query = entity::Entity::find();

    if let Some(start) = filter.start_date {
        query = query.filter(entity::Column::CreatedAt.gte(start));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(entity::Column::CreatedAt.lte(end));
    }

    query.order_by_asc(entity::Column::Id)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let models = list_query(&filter).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model: entity::ActiveModel = product.into();
        let updated = active_model.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(Some(model.into()))
    }
}
