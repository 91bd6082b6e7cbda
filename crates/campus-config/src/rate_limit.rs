//! Rate limiting for the token endpoints.
//!
//! `/api/token` and `/api/token/refresh` are the only unauthenticated routes
//! that touch password hashes, so they get a per-client token bucket.
//!
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds between bucket refills (default: 1)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket capacity (default: 10)
//!
//! Clients are keyed by `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
//! falling back to the peer address.

use ::governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::env_or;

pub type AuthGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 1,
            auth_burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Builds the governor config for the token routes.
    ///
    /// Returns `None` when either value is zero, which governor rejects.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<AuthGovernorConfig> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.auth_per_second, 1);
        assert_eq!(config.auth_burst_size, 10);
    }

    #[test]
    fn test_builds_governor_config() {
        assert!(RateLimitConfig::default().auth_governor_config().is_some());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let config = RateLimitConfig {
            auth_per_second: 1,
            auth_burst_size: 0,
        };
        assert!(config.auth_governor_config().is_none());
    }
}
