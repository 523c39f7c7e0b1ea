//! Process configuration.

use std::net::SocketAddr;

use anyhow::{bail, Context};

/// Which backing store the process runs against.
///
/// Exactly one is selected at startup. There is deliberately no runtime
/// fallback from one store to the other: silently switching where data
/// lives is worse than failing loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub seed_demo_catalog: bool,
}

impl AppConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("invalid BIND_ADDR")?;

        let backend = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres,
            other => bail!("unknown STORE_BACKEND '{other}' (expected 'memory' or 'postgres')"),
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND=postgres");
        }

        // The in-memory store boots empty, so it gets the demo catalog by
        // default; Postgres keeps whatever it already holds.
        let seed_demo_catalog = match std::env::var("SEED_DEMO_CATALOG") {
            Ok(v) => v.parse().context("invalid SEED_DEMO_CATALOG")?,
            Err(_) => backend == StoreBackend::Memory,
        };

        Ok(Self {
            bind_addr,
            backend,
            database_url,
            seed_demo_catalog,
        })
    }

    /// In-memory configuration with a seeded demo catalog (tests/dev).
    pub fn in_memory() -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            backend: StoreBackend::Memory,
            database_url: None,
            seed_demo_catalog: true,
        }
    }
}
