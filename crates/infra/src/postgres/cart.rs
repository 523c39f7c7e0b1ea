use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use shoplite_cart::{CartLine, CartStore};
use shoplite_core::{CartLineId, ProductId, StoreError, UserId};

use super::map_sqlx_error;

/// Postgres-backed cart over the `cart_items` table.
///
/// `cart_items` carries a unique `(user_id, product_id)` constraint, so the
/// one-line-per-product invariant holds at the database level and repeat
/// adds become a single upsert.
#[derive(Debug, Clone)]
pub struct PostgresCartStore {
    pool: Arc<PgPool>,
}

impl PostgresCartStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn line_from_row(row: &sqlx::postgres::PgRow) -> Result<CartLine, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::backend(format!("cart_items.id: {e}")))?;
    let user_id: Uuid = row
        .try_get("user_id")
        .map_err(|e| StoreError::backend(format!("cart_items.user_id: {e}")))?;
    let product_id: Uuid = row
        .try_get("product_id")
        .map_err(|e| StoreError::backend(format!("cart_items.product_id: {e}")))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| StoreError::backend(format!("cart_items.quantity: {e}")))?;

    Ok(CartLine {
        id: CartLineId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        product_id: ProductId::from_uuid(product_id),
        quantity: quantity as u32,
    })
}

#[async_trait]
impl CartStore for PostgresCartStore {
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id), err)]
    async fn add_item(&self, user_id: UserId, product_id: ProductId) -> Result<CartLine, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (user_id, product_id) DO UPDATE
            SET quantity = cart_items.quantity + 1
            RETURNING id, user_id, product_id, quantity
            "#,
        )
        .bind(CartLineId::new().as_uuid())
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_item", e))?;

        line_from_row(&row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, line_id = %line_id), err)]
    async fn set_quantity(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("set_quantity begin", e))?;

        let row = sqlx::query("SELECT user_id FROM cart_items WHERE id = $1 FOR UPDATE")
            .bind(line_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("set_quantity lookup", e))?;

        let owner: Uuid = match row {
            Some(row) => row
                .try_get("user_id")
                .map_err(|e| StoreError::backend(format!("cart_items.user_id: {e}")))?,
            None => return Err(StoreError::NotFound),
        };
        if UserId::from_uuid(owner) != user_id {
            return Err(StoreError::Unauthorized);
        }

        if quantity == 0 {
            sqlx::query("DELETE FROM cart_items WHERE id = $1")
                .bind(line_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("set_quantity delete", e))?;
        } else {
            sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
                .bind(line_id.as_uuid())
                .bind(i64::from(quantity))
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("set_quantity update", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("set_quantity commit", e))
    }

    #[instrument(skip(self), fields(user_id = %user_id, line_id = %line_id), err)]
    async fn remove_item(&self, user_id: UserId, line_id: CartLineId) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("remove_item begin", e))?;

        let row = sqlx::query("SELECT user_id FROM cart_items WHERE id = $1 FOR UPDATE")
            .bind(line_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("remove_item lookup", e))?;

        // Absent lines are a no-op, not an error.
        let owner: Uuid = match row {
            Some(row) => row
                .try_get("user_id")
                .map_err(|e| StoreError::backend(format!("cart_items.user_id: {e}")))?,
            None => return Ok(()),
        };
        if UserId::from_uuid(owner) != user_id {
            return Err(StoreError::Unauthorized);
        }

        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(line_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("remove_item delete", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("remove_item commit", e))
    }

    #[instrument(skip(self), fields(user_id = %user_id), err)]
    async fn list_items(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, product_id, quantity
            FROM cart_items
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_items", e))?;

        rows.iter().map(line_from_row).collect()
    }

    #[instrument(skip(self), fields(user_id = %user_id), err)]
    async fn clear(&self, user_id: UserId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear", e))?;

        Ok(())
    }
}
