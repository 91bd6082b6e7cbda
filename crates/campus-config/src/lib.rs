//! # Campus Config
//!
//! Configuration types for the Campus API, loaded from environment variables.
//!
//! - [`database`]: connection string and pool size
//! - [`server`]: bind address
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: limits on the token endpoints
//!
//! Every `from_env` falls back to a development default when a variable is
//! missing or unparsable, except [`DatabaseConfig::from_env`] which requires
//! `DATABASE_URL`.
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{JwtConfig, RateLimitConfig, ServerConfig};
//!
//! let jwt = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
