use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use shoplite_cart::CartStore;
use shoplite_catalog::Catalog;
use shoplite_infra::{
    run_migrations, seed_demo_catalog, InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore,
    PostgresCartStore, PostgresCatalog, PostgresOrderStore,
};
use shoplite_orders::{OrderPlacement, OrderStore};

use crate::config::{AppConfig, StoreBackend};

type Placement = OrderPlacement<Arc<dyn CartStore>, Arc<dyn Catalog>, Arc<dyn OrderStore>>;

/// Shared store handles + the placement workflow, behind one extension.
pub struct AppServices {
    pub catalog: Arc<dyn Catalog>,
    pub cart: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub placement: Placement,
}

/// Wire up stores per configuration. A misconfigured or unreachable
/// backend fails startup; there is no fallback to a different store.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let (catalog, cart, orders): (Arc<dyn Catalog>, Arc<dyn CartStore>, Arc<dyn OrderStore>) =
        match config.backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory stores");
                (
                    Arc::new(InMemoryCatalog::new()),
                    Arc::new(InMemoryCartStore::new()),
                    Arc::new(InMemoryOrderStore::new()),
                )
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres backend")?;
                let pool = PgPool::connect(url)
                    .await
                    .context("failed to connect to Postgres")?;
                run_migrations(&pool)
                    .await
                    .context("failed to apply migrations")?;
                tracing::info!("using postgres stores");
                (
                    Arc::new(PostgresCatalog::new(pool.clone())),
                    Arc::new(PostgresCartStore::new(pool.clone())),
                    Arc::new(PostgresOrderStore::new(pool)),
                )
            }
        };

    if config.seed_demo_catalog {
        seed_demo_catalog(&*catalog)
            .await
            .context("failed to seed demo catalog")?;
    }

    let placement = OrderPlacement::new(cart.clone(), catalog.clone(), orders.clone());

    Ok(AppServices {
        catalog,
        cart,
        orders,
        placement,
    })
}
