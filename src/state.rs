use anyhow::Context;
use sqlx::PgPool;

use campus_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig};
use campus_db::{init_db_pool, run_migrations};

/// Shared handler state. Cloned per request; the pool is reference counted.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// State around an existing pool with every other setting read from the environment.
    pub fn from_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(AppState::from_pool(db))
}
