use std::sync::Arc;

use async_trait::async_trait;

use shoplite_core::{OrderId, StoreError, UserId};

use crate::order::Order;

/// Order persistence.
///
/// `create` must commit the order and all of its lines as one unit: a
/// partially persisted order (order without lines, lines without a parent)
/// must never be observable by readers. Reads and deletes are scoped to the
/// owning user.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist the order and its lines atomically.
    async fn create(&self, order: &Order) -> Result<(), StoreError>;

    /// Fetch one of the user's orders.
    async fn get(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>, StoreError>;

    /// The user's orders, newest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, StoreError>;

    /// Delete a whole order. `NotFound` when the user has no such order.
    async fn delete(&self, user_id: UserId, order_id: OrderId) -> Result<(), StoreError>;
}

#[async_trait]
impl<O> OrderStore for Arc<O>
where
    O: OrderStore + ?Sized,
{
    async fn create(&self, order: &Order) -> Result<(), StoreError> {
        (**self).create(order).await
    }

    async fn get(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get(user_id, order_id).await
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        (**self).list(user_id).await
    }

    async fn delete(&self, user_id: UserId, order_id: OrderId) -> Result<(), StoreError> {
        (**self).delete(user_id, order_id).await
    }
}
