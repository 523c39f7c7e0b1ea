use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shoplite_core::{OrderId, StoreError, UserId};
use shoplite_orders::{Order, OrderStore};

use super::poisoned;

/// In-memory order storage.
///
/// The whole order (with its lines) is held as one value, so creation is
/// naturally all-or-nothing.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        if orders.contains_key(&order.id()) {
            return Err(StoreError::backend("order id already exists"));
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn get(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders
            .get(&order_id)
            .filter(|o| o.user_id() == user_id)
            .cloned())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;

        let mut items: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id() == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(items)
    }

    async fn delete(&self, user_id: UserId, order_id: OrderId) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;

        match orders.get(&order_id) {
            Some(o) if o.user_id() == user_id => {
                orders.remove(&order_id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}
