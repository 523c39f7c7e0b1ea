use std::sync::Arc;

use async_trait::async_trait;

use shoplite_core::{ProductId, StoreError};

use crate::product::Product;

/// Read-mostly product catalog.
///
/// `insert` is the seed/replace path used at startup and by seller-side
/// price changes; the order workflow never writes and performs exactly one
/// `price_of` lookup per snapshotted line, so every snapshot reflects the
/// live price at that instant.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert or replace a catalog entry.
    async fn insert(&self, product: Product) -> Result<(), StoreError>;

    /// Fetch a single product.
    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, StoreError>;

    /// List products, optionally filtered by a case-insensitive name match.
    async fn list(&self, query: Option<&str>) -> Result<Vec<Product>, StoreError>;

    /// Live price of a product in the smallest currency unit, if it exists.
    async fn price_of(&self, product_id: ProductId) -> Result<Option<u64>, StoreError>;
}

#[async_trait]
impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        (**self).insert(product).await
    }

    async fn get(&self, product_id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(product_id).await
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<Product>, StoreError> {
        (**self).list(query).await
    }

    async fn price_of(&self, product_id: ProductId) -> Result<Option<u64>, StoreError> {
        (**self).price_of(product_id).await
    }
}
