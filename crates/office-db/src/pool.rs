//! Connection pool for the document store.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use office_core::defaults::{DATABASE_ACQUIRE_TIMEOUT_SECS, DATABASE_MAX_CONNECTIONS};
use office_core::logging::SUBSYSTEM_DB;
use office_core::{Error, Result};

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(DATABASE_ACQUIRE_TIMEOUT_SECS))
}

/// Connect a pool of at most `max_connections` connections.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let start = Instant::now();
    let pool = pool_options(max_connections)
        .connect(database_url)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = SUBSYSTEM_DB,
        component = "pool",
        op = "connect",
        max_connections,
        duration_ms = start.elapsed().as_millis() as u64,
        "Database pool ready"
    );
    Ok(pool)
}

/// [`create_pool`] with the default pool size.
pub async fn create_default_pool(database_url: &str) -> Result<PgPool> {
    create_pool(database_url, DATABASE_MAX_CONNECTIONS).await
}
