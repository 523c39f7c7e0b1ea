use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shoplite_cart::{CartLine, CartStore};
use shoplite_core::{CartLineId, ProductId, StoreError, UserId};

use super::poisoned;

/// In-memory per-user cart storage.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    lines: RwLock<HashMap<CartLineId, CartLine>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn add_item(&self, user_id: UserId, product_id: ProductId) -> Result<CartLine, StoreError> {
        let mut lines = self.lines.write().map_err(|_| poisoned())?;

        // One line per (user, product): repeat adds bump the quantity.
        if let Some(line) = lines
            .values_mut()
            .find(|l| l.user_id == user_id && l.product_id == product_id)
        {
            line.quantity += 1;
            return Ok(line.clone());
        }

        let line = CartLine {
            id: CartLineId::new(),
            user_id,
            product_id,
            quantity: 1,
        };
        lines.insert(line.id, line.clone());
        Ok(line)
    }

    async fn set_quantity(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let mut lines = self.lines.write().map_err(|_| poisoned())?;

        let line = lines.get_mut(&line_id).ok_or(StoreError::NotFound)?;
        if line.user_id != user_id {
            return Err(StoreError::Unauthorized);
        }

        if quantity == 0 {
            lines.remove(&line_id);
        } else {
            line.quantity = quantity;
        }
        Ok(())
    }

    async fn remove_item(&self, user_id: UserId, line_id: CartLineId) -> Result<(), StoreError> {
        let mut lines = self.lines.write().map_err(|_| poisoned())?;

        match lines.get(&line_id) {
            None => Ok(()),
            Some(line) if line.user_id != user_id => Err(StoreError::Unauthorized),
            Some(_) => {
                lines.remove(&line_id);
                Ok(())
            }
        }
    }

    async fn list_items(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError> {
        let lines = self.lines.read().map_err(|_| poisoned())?;

        let mut items: Vec<CartLine> = lines
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        // Line ids are UUIDv7, so id order is insertion order.
        items.sort_by_key(|l| l.id);
        Ok(items)
    }

    async fn clear(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut lines = self.lines.write().map_err(|_| poisoned())?;
        lines.retain(|_, l| l.user_id != user_id);
        Ok(())
    }
}
