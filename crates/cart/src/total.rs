use shoplite_catalog::Catalog;
use shoplite_core::{StoreError, UserId};

use crate::store::CartStore;

/// Display total of a user's cart: `price × quantity` summed over the
/// current lines, each resolved against the live catalog.
///
/// A line whose product no longer resolves contributes 0 — this is a
/// display aggregate, not the financial source of truth (orders snapshot
/// prices at placement instead). Backend I/O failures still propagate.
pub async fn total<S, C>(cart: &S, catalog: &C, user_id: UserId) -> Result<u64, StoreError>
where
    S: CartStore + ?Sized,
    C: Catalog + ?Sized,
{
    let mut sum = 0u64;
    for line in cart.list_items(user_id).await? {
        let price = catalog.price_of(line.product_id).await?.unwrap_or(0);
        sum += price * u64::from(line.quantity);
    }
    Ok(sum)
}
