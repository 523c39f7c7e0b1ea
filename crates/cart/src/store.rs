use std::sync::Arc;

use async_trait::async_trait;

use shoplite_core::{CartLineId, ProductId, StoreError, UserId};

use crate::line::CartLine;

/// Per-user cart storage.
///
/// Every operation is scoped to the acting user. Ownership is checked, not
/// just existence: touching a line that belongs to a different user yields
/// `StoreError::Unauthorized` and never mutates the other user's cart.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Add one unit of a product. Increments the existing (user, product)
    /// line if there is one, otherwise creates a line with quantity 1.
    /// Returns the line as stored.
    async fn add_item(&self, user_id: UserId, product_id: ProductId) -> Result<CartLine, StoreError>;

    /// Overwrite a line's quantity. A quantity of 0 deletes the line.
    /// Unknown lines are `NotFound`.
    async fn set_quantity(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<(), StoreError>;

    /// Delete a line. A no-op `Ok` when the line does not exist.
    async fn remove_item(&self, user_id: UserId, line_id: CartLineId) -> Result<(), StoreError>;

    /// The user's lines in insertion order (line ids are time-ordered).
    async fn list_items(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError>;

    /// Delete all of the user's lines. Called as the final step of
    /// successful order placement.
    async fn clear(&self, user_id: UserId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    async fn add_item(&self, user_id: UserId, product_id: ProductId) -> Result<CartLine, StoreError> {
        (**self).add_item(user_id, product_id).await
    }

    async fn set_quantity(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        (**self).set_quantity(user_id, line_id, quantity).await
    }

    async fn remove_item(&self, user_id: UserId, line_id: CartLineId) -> Result<(), StoreError> {
        (**self).remove_item(user_id, line_id).await
    }

    async fn list_items(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError> {
        (**self).list_items(user_id).await
    }

    async fn clear(&self, user_id: UserId) -> Result<(), StoreError> {
        (**self).clear(user_id).await
    }
}
