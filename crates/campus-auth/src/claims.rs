//! JWT claim structures.
//!
//! Access and refresh tokens share a signing secret but not a shape: an access
//! token has no `jti` and a refresh token has no `username` or `role`, so
//! neither decodes as the other.

use campus_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access token claims. Carries enough to authorize a request without a
/// database lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Refresh token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
    /// Makes two refresh tokens minted in the same second distinct.
    pub jti: String,
}
