//! # Infrastructure Layer
//!
//! Concrete implementations of the profile store for the profile service.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL connection pool, migrations and the
//!   `ProfileRepository` implementation using SQLx

use ps_shared::config::DatabaseConfig;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, PgProfileRepository, PoolStatistics};

/// Infrastructure services shared by the request handlers
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Connection pool, kept for health checks and shutdown
    pub pool: DatabasePool,
    /// Profile store over the pool
    pub profiles: PgProfileRepository,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The database connection pool
/// - Pending schema migrations (when enabled)
/// - The profile repository
pub async fn initialize(config: &DatabaseConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let pool = DatabasePool::new(config.clone()).await?;
    if config.run_migrations {
        pool.run_migrations().await?;
    }
    let profiles = PgProfileRepository::new(pool.get_pool().clone());

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices { pool, profiles })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
