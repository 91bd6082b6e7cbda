use std::env;

use crate::env_or;

/// Token signing settings.
///
/// - `JWT_SECRET`: HMAC secret shared by access and refresh tokens
/// - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 1 hour)
/// - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 7 days)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "campus-dev-secret-change-me".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604_800,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_EXPIRY", defaults.refresh_token_expiry),
        }
    }
}
