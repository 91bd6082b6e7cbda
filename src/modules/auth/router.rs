use std::sync::Arc;

use axum::{Router, routing::post};
use tower_governor::GovernorLayer;

use crate::state::AppState;

use super::controller::{obtain_token, refresh_token, register};

/// `/register` plus the token routes. The token routes are rate limited per
/// client IP unless the configured limits are unusable.
pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let token_routes = Router::new()
        .route("/token", post(obtain_token))
        .route("/token/refresh", post(refresh_token));

    let token_routes = match state.rate_limit_config.auth_governor_config() {
        Some(config) => token_routes.layer(GovernorLayer::new(Arc::new(config))),
        None => {
            tracing::warn!(
                config = ?state.rate_limit_config,
                "invalid rate limit settings, token endpoints are not rate limited"
            );
            token_routes
        }
    };

    Router::new()
        .route("/register", post(register))
        .merge(token_routes)
}
