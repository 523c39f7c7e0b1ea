//! `shoplite-cart` — a user's mutable working set of intended purchases.
//!
//! The cart is the only mutable side of the purchase path: lines are
//! upserted, requantified, and removed freely until order placement
//! converts them into an immutable order and clears them.

pub mod line;
pub mod store;
pub mod total;

pub use line::CartLine;
pub use store::CartStore;
pub use total::total;
