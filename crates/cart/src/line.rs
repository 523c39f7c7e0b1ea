use serde::{Deserialize, Serialize};

use shoplite_core::{CartLineId, ProductId, UserId};

/// One cart line: a user's intended quantity of a single product.
///
/// At most one line exists per (user, product) pair; repeat adds bump the
/// quantity in place instead of appending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Always at least 1; setting a quantity to 0 deletes the line instead.
    pub quantity: u32,
}
