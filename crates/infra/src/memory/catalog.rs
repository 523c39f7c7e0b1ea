use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shoplite_catalog::{Catalog, Product};
use shoplite_core::{ProductId, StoreError};

use super::poisoned;

/// In-memory product catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.insert(product.id(), product);
        Ok(())
    }

    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&product_id).cloned())
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        let needle = query.map(str::to_lowercase);

        let mut items: Vec<Product> = products
            .values()
            .filter(|p| match &needle {
                Some(q) => p.name().to_lowercase().contains(q),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(items)
    }

    async fn price_of(&self, product_id: ProductId) -> Result<Option<u64>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&product_id).map(Product::price))
    }
}
