//! Postgres-backed storage adapters.
//!
//! Every query scopes by `user_id` in the WHERE clause where ownership
//! matters, and the order + order-lines aggregate is committed in a single
//! transaction so a partially persisted order is never observable.

mod cart;
mod catalog;
mod orders;

pub use cart::PostgresCartStore;
pub use catalog::PostgresCatalog;
pub use orders::PostgresOrderStore;

use sqlx::PgPool;

use shoplite_core::StoreError;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StoreError::backend(format!("migrations: {e}")))
}

/// Map a sqlx failure onto the shared store error, tagged with the
/// operation that hit it.
pub(crate) fn map_sqlx_error(operation: &str, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::backend(format!("{operation}: {other}")),
    }
}
