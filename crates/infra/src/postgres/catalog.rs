use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use shoplite_catalog::{Catalog, Product};
use shoplite_core::{ProductId, StoreError};

use super::map_sqlx_error;

/// Postgres-backed product catalog over the `products` table.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: Arc<PgPool>,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::backend(format!("products.id: {e}")))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::backend(format!("products.name: {e}")))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| StoreError::backend(format!("products.description: {e}")))?;
    let price: i64 = row
        .try_get("price")
        .map_err(|e| StoreError::backend(format!("products.price: {e}")))?;

    Product::new(ProductId::from_uuid(id), name, description, price as u64)
        .map_err(|e| StoreError::backend(format!("corrupt product row: {e}")))
}

#[async_trait]
impl Catalog for PostgresCatalog {
    #[instrument(skip(self, product), fields(product_id = %product.id()), err)]
    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price() as i64)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert product", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, description, price FROM products WHERE id = $1",
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get product", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self, query: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let rows = match query {
            Some(q) => {
                sqlx::query(
                    r#"
                    SELECT id, name, description, price
                    FROM products
                    WHERE name ILIKE '%' || $1 || '%'
                    ORDER BY name
                    "#,
                )
                .bind(q)
                .fetch_all(&*self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT id, name, description, price FROM products ORDER BY name")
                    .fetch_all(&*self.pool)
                    .await
            }
        }
        .map_err(|e| map_sqlx_error("list products", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn price_of(&self, product_id: ProductId) -> Result<Option<u64>, StoreError> {
        let row = sqlx::query("SELECT price FROM products WHERE id = $1")
            .bind(product_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("price_of", e))?;

        match row {
            Some(row) => {
                let price: i64 = row
                    .try_get("price")
                    .map_err(|e| StoreError::backend(format!("products.price: {e}")))?;
                Ok(Some(price as u64))
            }
            None => Ok(None),
        }
    }
}
