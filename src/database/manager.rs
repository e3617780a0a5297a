use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised while opening the connection pool
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to {host}:{port}/{name}: {source}")]
    Connect {
        host: String,
        port: u16,
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the pooled connection handle from configuration
pub struct DatabaseManager;

impl DatabaseManager {
    pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .acquire_timeout(config.acquire_timeout())
    }

    /// Open the pool and verify connectivity with a ping
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let pool = Self::pool_options(config)
            .connect(&config.connection_url())
            .await
            .map_err(|source| DatabaseError::Connect {
                host: config.host.clone(),
                port: config.port,
                name: config.name.clone(),
                source,
            })?;

        Self::health_check(&pool).await?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database connection pool initialized"
        );
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
