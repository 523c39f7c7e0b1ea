use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use shoplite_core::{OrderId, ProductId, StoreError, UserId};
use shoplite_orders::{Order, OrderLine, OrderStore};

use super::map_sqlx_error;

/// Postgres-backed order storage over `orders` + `order_items`.
///
/// `create` inserts the order row and every line inside one transaction;
/// readers can never observe an order without its lines. `order_items`
/// cascades on order deletion, so delete-whole-order is a single statement.
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: Arc<PgPool>,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn order_line_from_row(row: &sqlx::postgres::PgRow) -> Result<OrderLine, StoreError> {
    let product_id: Uuid = row
        .try_get("product_id")
        .map_err(|e| StoreError::backend(format!("order_items.product_id: {e}")))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| StoreError::backend(format!("order_items.quantity: {e}")))?;
    let price_at_order: i64 = row
        .try_get("price_at_order")
        .map_err(|e| StoreError::backend(format!("order_items.price_at_order: {e}")))?;

    Ok(OrderLine {
        product_id: ProductId::from_uuid(product_id),
        quantity: quantity as u32,
        price_at_order: price_at_order as u64,
    })
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[instrument(skip(self, order), fields(order_id = %order.id(), user_id = %order.user_id()), err)]
    async fn create(&self, order: &Order) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("create order begin", e))?;

        sqlx::query("INSERT INTO orders (id, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(order.id().as_uuid())
            .bind(order.user_id().as_uuid())
            .bind(order.created_at())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create order", e))?;

        for (line_no, line) in order.lines().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, line_no, product_id, quantity, price_at_order)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id().as_uuid())
            .bind(line_no as i32)
            .bind(line.product_id.as_uuid())
            .bind(i64::from(line.quantity))
            .bind(line.price_at_order as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create order line", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("create order commit", e))
    }

    #[instrument(skip(self), fields(user_id = %user_id, order_id = %order_id), err)]
    async fn get(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        let header = sqlx::query(
            "SELECT id, user_id, created_at FROM orders WHERE id = $1 AND user_id = $2",
        )
        .bind(order_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get order", e))?;

        let Some(header) = header else {
            return Ok(None);
        };
        let created_at: DateTime<Utc> = header
            .try_get("created_at")
            .map_err(|e| StoreError::backend(format!("orders.created_at: {e}")))?;

        let line_rows = sqlx::query(
            r#"
            SELECT product_id, quantity, price_at_order
            FROM order_items
            WHERE order_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get order lines", e))?;

        let lines = line_rows
            .iter()
            .map(order_line_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let order = Order::new(order_id, user_id, created_at, lines)
            .map_err(|e| StoreError::backend(format!("corrupt order row: {e}")))?;
        Ok(Some(order))
    }

    #[instrument(skip(self), fields(user_id = %user_id), err)]
    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT o.id, o.created_at, i.product_id, i.quantity, i.price_at_order
            FROM orders o
            JOIN order_items i ON i.order_id = o.id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC, o.id, i.line_no
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list orders", e))?;

        // Rows arrive grouped per order; fold consecutive runs into orders.
        let mut orders: Vec<Order> = Vec::new();
        let mut current: Option<(OrderId, DateTime<Utc>, Vec<OrderLine>)> = None;

        for row in &rows {
            let id: Uuid = row
                .try_get("id")
                .map_err(|e| StoreError::backend(format!("orders.id: {e}")))?;
            let id = OrderId::from_uuid(id);
            let created_at: DateTime<Utc> = row
                .try_get("created_at")
                .map_err(|e| StoreError::backend(format!("orders.created_at: {e}")))?;
            let line = order_line_from_row(row)?;

            match &mut current {
                Some((current_id, _, lines)) if *current_id == id => lines.push(line),
                _ => {
                    if let Some((id, created_at, lines)) = current.take() {
                        let order = Order::new(id, user_id, created_at, lines)
                            .map_err(|e| StoreError::backend(format!("corrupt order row: {e}")))?;
                        orders.push(order);
                    }
                    current = Some((id, created_at, vec![line]));
                }
            }
        }
        if let Some((id, created_at, lines)) = current.take() {
            let order = Order::new(id, user_id, created_at, lines)
                .map_err(|e| StoreError::backend(format!("corrupt order row: {e}")))?;
            orders.push(order);
        }

        Ok(orders)
    }

    #[instrument(skip(self), fields(user_id = %user_id, order_id = %order_id), err)]
    async fn delete(&self, user_id: UserId, order_id: OrderId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND user_id = $2")
            .bind(order_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete order", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
