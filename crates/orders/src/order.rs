use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, OrderId, ProductId, UserId};

/// One line of a placed order.
///
/// `price_at_order` is the catalog price captured when the order was
/// created. It is deliberately decoupled from the live product price so
/// that historical orders are never retroactively altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price in the smallest currency unit, frozen at creation time.
    pub price_at_order: u64,
}

/// An immutable record of a completed purchase.
///
/// There is no update path: once created, an order can only be read or
/// deleted whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(
        id: OrderId,
        user_id: UserId,
        created_at: DateTime<Utc>,
        lines: Vec<OrderLine>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("an order must have at least one line"));
        }
        if lines.iter().any(|l| l.quantity == 0) {
            return Err(DomainError::validation("order line quantity must be positive"));
        }

        Ok(Self {
            id,
            user_id,
            created_at,
            lines,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of `price_at_order × quantity` over all lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| l.price_at_order * u64::from(l.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: u64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::new(),
            quantity,
            price_at_order: price,
        }
    }

    #[test]
    fn new_order_rejects_empty_lines() {
        let err = Order::new(OrderId::new(), UserId::new(), Utc::now(), vec![]).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_order_rejects_zero_quantity_line() {
        let lines = vec![line(1200, 2), line(500, 0)];
        let err = Order::new(OrderId::new(), UserId::new(), Utc::now(), lines).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn total_sums_price_snapshots() {
        let lines = vec![line(1200, 2), line(500, 1)];
        let order = Order::new(OrderId::new(), UserId::new(), Utc::now(), lines).unwrap();
        assert_eq!(order.total(), 2900);
    }
}
