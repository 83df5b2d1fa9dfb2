//! Connection pool and schema lifecycle.
//!
//! Nothing above this module touches the pool directly; sessions go through
//! [`crate::storage::DbStorage`].

use std::time::Duration;

use hearth_core::EntityRegistry;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::StorageConfig;
use crate::error::{Result, StorageError};

/// Seconds allowed for the initial liveness probe.
const VERIFY_TIMEOUT_SECS: u64 = 5;

pub(crate) struct Engine {
    pool: MySqlPool,
}

impl Engine {
    /// Open a pooled connection and verify it with a liveness probe.
    ///
    /// Connections are also re-validated before each reuse, so idle drops
    /// by the server surface as reconnects instead of failed queries.
    pub(crate) async fn connect(config: &StorageConfig) -> Result<Self> {
        let pool = pool_options(config)
            .connect(&config.url())
            .await
            .map_err(StorageError::Connection)?;

        let probe = sqlx::query("SELECT 1").execute(&pool);
        match tokio::time::timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS), probe).await {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => return Err(StorageError::Connection(err)),
            Err(_) => {
                return Err(StorageError::Connection(sqlx::Error::Io(
                    std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "liveness probe timed out",
                    ),
                )))
            }
        }

        tracing::info!(
            host = %config.host,
            database = %config.database,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Open the pool without touching the network. Connectivity problems
    /// surface on first use instead of here.
    pub(crate) fn connect_lazy(config: &StorageConfig) -> Result<Self> {
        let pool = pool_options(config)
            .connect_lazy(&config.url())
            .map_err(StorageError::Connection)?;
        Ok(Self { pool })
    }

    /// Drop every known table, children before parents.
    ///
    /// Destructive and irreversible; only the test lifecycle calls this.
    /// Tables that do not exist are skipped.
    pub(crate) async fn reset_schema(&self) -> Result<()> {
        tracing::warn!("resetting schema: dropping all known tables");
        for table in EntityRegistry::DROP_ORDER {
            let sql = format!("DROP TABLE IF EXISTS {table}");
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(StorageError::Schema)?;
        }
        Ok(())
    }

    /// Create every registered table that does not yet exist.
    ///
    /// Idempotent. An existing table with a conflicting layout fails here
    /// or at first use and is never auto-migrated.
    pub(crate) async fn ensure_schema(&self, registry: &EntityRegistry) -> Result<()> {
        let specs = registry.table_specs();
        tracing::info!(tables = specs.len(), "ensuring schema");
        for spec in &specs {
            sqlx::query(spec.create_sql)
                .execute(&self.pool)
                .await
                .map_err(StorageError::Schema)?;
        }
        Ok(())
    }

    pub(crate) fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn pool_options(config: &StorageConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        // The server may silently drop idle connections; validate before reuse.
        .test_before_acquire(true)
}
