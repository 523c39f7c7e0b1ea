use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, ProductId};

/// Catalog product.
///
/// Immutable reference data from the shop's point of view: created at seed
/// time, replaced wholesale when the seller changes it, never mutated by
/// the cart or order workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    /// Price in the smallest currency unit (e.g. cents).
    price: u64,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            price,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_keeps_fields() {
        let id = ProductId::new();
        let product = Product::new(id, "Colorful Mug", "A vivid start to the morning", 1200).unwrap();

        assert_eq!(product.id(), id);
        assert_eq!(product.name(), "Colorful Mug");
        assert_eq!(product.description(), "A vivid start to the morning");
        assert_eq!(product.price(), 1200);
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let err = Product::new(ProductId::new(), "", "desc", 100).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_product_rejects_whitespace_name() {
        let err = Product::new(ProductId::new(), "   ", "desc", 100).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_price_is_allowed() {
        let product = Product::new(ProductId::new(), "Freebie", "", 0).unwrap();
        assert_eq!(product.price(), 0);
    }
}
