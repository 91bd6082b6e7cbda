//! # Campus DB
//!
//! PostgreSQL pool setup and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use campus_config::DatabaseConfig;
//! use campus_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use campus_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Schema migrations shipped with the binary, shared with `sqlx::test`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool sized by [`DatabaseConfig::max_connections`].
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
