use serde::Deserialize;

use shoplite_cart::CartLine;
use shoplite_catalog::Product;
use shoplite_orders::Order;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    /// 0 removes the line.
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub q: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id().to_string(),
        "name": p.name(),
        "description": p.description(),
        "price": p.price(),
    })
}

/// Cart line joined with its product for display. An unresolvable product
/// renders as zero-value rather than failing the view.
pub fn cart_line_to_json(line: &CartLine, product: Option<&Product>) -> serde_json::Value {
    let unit_price = product.map(Product::price).unwrap_or(0);
    serde_json::json!({
        "id": line.id.to_string(),
        "product_id": line.product_id.to_string(),
        "product_name": product.map(Product::name),
        "unit_price": unit_price,
        "quantity": line.quantity,
        "subtotal": unit_price * u64::from(line.quantity),
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id().to_string(),
        "created_at": order.created_at().to_rfc3339(),
        "total": order.total(),
        "lines": order
            .lines()
            .iter()
            .map(|l| serde_json::json!({
                "product_id": l.product_id.to_string(),
                "quantity": l.quantity,
                "price_at_order": l.price_at_order,
            }))
            .collect::<Vec<_>>(),
    })
}
