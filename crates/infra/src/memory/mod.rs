//! In-memory storage arena.
//!
//! Intended for tests/dev. State lives for the life of the process and is
//! keyed by generated ids, behind `RwLock`s.

mod cart;
mod catalog;
mod orders;

pub use cart::InMemoryCartStore;
pub use catalog::InMemoryCatalog;
pub use orders::InMemoryOrderStore;

use shoplite_core::StoreError;

pub(crate) fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}
