use shoplite_catalog::{Catalog, Product};
use shoplite_core::{ProductId, StoreError};

/// Seed the demo catalog.
///
/// Used at startup for the in-memory backend (which boots empty on every
/// process start) and by tests that want a populated shop. Returns the
/// seeded products so callers can reference their ids.
pub async fn seed_demo_catalog<C>(catalog: &C) -> Result<Vec<Product>, StoreError>
where
    C: Catalog + ?Sized,
{
    let entries = [
        ("Colorful Mug", "A vivid start to the morning", 1200),
        ("Pocket Notebook", "An idea book that fits in a pocket", 600),
        ("Sticker Set", "Six stickers to dress up a laptop", 500),
        ("Canvas Tote", "Light, sturdy, washable", 1800),
    ];

    let mut products = Vec::with_capacity(entries.len());
    for (name, description, price) in entries {
        let product = Product::new(ProductId::new(), name, description, price)
            .map_err(|e| StoreError::backend(e.to_string()))?;
        catalog.insert(product.clone()).await?;
        products.push(product);
    }

    tracing::info!(count = products.len(), "seeded demo catalog");
    Ok(products)
}
