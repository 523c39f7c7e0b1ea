//! `shoplite-catalog` — product reference data.
//!
//! Products are seeded into the catalog and read by everything else; the
//! order workflow in particular only ever asks for a live price.

pub mod product;
pub mod store;

pub use product::Product;
pub use store::Catalog;
