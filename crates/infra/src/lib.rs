//! `shoplite-infra` — storage backends for the catalog, cart, and order
//! contracts.
//!
//! Two implementations exist per contract: an in-memory arena for tests and
//! development, and a Postgres adapter for production. Exactly one backend
//! is selected by configuration at startup; there is no runtime fallback
//! from one to the other.

pub mod memory;
pub mod postgres;
pub mod seed;

mod integration_tests;

pub use memory::{InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore};
pub use postgres::{run_migrations, PostgresCartStore, PostgresCatalog, PostgresOrderStore};
pub use seed::seed_demo_catalog;
