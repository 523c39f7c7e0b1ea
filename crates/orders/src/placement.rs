//! Order placement: cart in, immutable order out.
//!
//! The workflow runs in three steps for one user: validate the cart is
//! non-empty, create the order with per-line price snapshots, then clear
//! the cart. The order commit is the atomicity boundary; the cart clear is
//! cleanup that runs only after the commit and is logged, never rolled
//! back, if it fails — the order is the system of record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;

use shoplite_cart::CartStore;
use shoplite_catalog::Catalog;
use shoplite_core::{OrderId, StoreError, UserId};

use crate::order::{Order, OrderLine};
use crate::store::OrderStore;

/// Why a placement did not produce an order.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The cart had no lines. A reported condition, not a fault: nothing
    /// was created and the caller is expected to tell the user.
    #[error("cart is empty")]
    EmptyCart,

    /// The backing store failed before the order was committed. The cart is
    /// left untouched and the submission can simply be retried.
    #[error("order creation failed: {0}")]
    CreationFailed(#[source] StoreError),
}

/// The order-placement workflow over injected stores.
pub struct OrderPlacement<S, C, O> {
    cart: S,
    catalog: C,
    orders: O,
    user_locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl<S, C, O> OrderPlacement<S, C, O>
where
    S: CartStore,
    C: Catalog,
    O: OrderStore,
{
    pub fn new(cart: S, catalog: C, orders: O) -> Self {
        Self {
            cart,
            catalog,
            orders,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, user_id: UserId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.user_locks.lock().unwrap();
        locks.entry(user_id).or_default().clone()
    }

    /// Convert the user's cart into a new immutable order.
    ///
    /// Placements are serialized per user: a double submit from the same
    /// session cannot create two orders from one cart state; the second
    /// attempt observes the cleared cart and reports `EmptyCart`.
    pub async fn place_order(&self, user_id: UserId) -> Result<Order, PlaceOrderError> {
        let guard = self.lock_for(user_id);
        let _held = guard.lock().await;

        let cart_lines = self
            .cart
            .list_items(user_id)
            .await
            .map_err(PlaceOrderError::CreationFailed)?;
        if cart_lines.is_empty() {
            tracing::debug!(user_id = %user_id, "placement rejected: cart is empty");
            return Err(PlaceOrderError::EmptyCart);
        }

        // Snapshot live prices, one catalog lookup per line. A product the
        // catalog no longer resolves snapshots at 0 rather than failing the
        // whole placement.
        let mut lines = Vec::with_capacity(cart_lines.len());
        for cart_line in &cart_lines {
            let price = self
                .catalog
                .price_of(cart_line.product_id)
                .await
                .map_err(PlaceOrderError::CreationFailed)?;
            let price_at_order = match price {
                Some(p) => p,
                None => {
                    tracing::warn!(
                        user_id = %user_id,
                        product_id = %cart_line.product_id,
                        "product missing from catalog, snapshotting price 0"
                    );
                    0
                }
            };
            lines.push(OrderLine {
                product_id: cart_line.product_id,
                quantity: cart_line.quantity,
                price_at_order,
            });
        }

        let order = Order::new(OrderId::new(), user_id, Utc::now(), lines)
            .map_err(|e| PlaceOrderError::CreationFailed(StoreError::backend(e.to_string())))?;

        self.orders
            .create(&order)
            .await
            .map_err(PlaceOrderError::CreationFailed)?;
        tracing::info!(
            user_id = %user_id,
            order_id = %order.id(),
            lines = order.lines().len(),
            total = order.total(),
            "order created"
        );

        // The order is durably committed at this point. Clearing the cart
        // is cleanup: a failure leaves stale cart lines behind but must
        // never undo the order.
        if let Err(e) = self.cart.clear(user_id).await {
            tracing::warn!(
                user_id = %user_id,
                order_id = %order.id(),
                error = %e,
                "cart clear failed after order commit"
            );
        }

        Ok(order)
    }
}
