use std::sync::OnceLock;

use sqlx::PgPool;
use tracing::instrument;

use campus_auth::{create_access_token, create_refresh_token, verify_refresh_token};
use campus_config::JwtConfig;
use campus_core::{AppError, hash_password, verify_password};
use campus_models::auth::{RefreshTokenRequest, TokenPair, TokenRequest, UserCredentials};

use crate::metrics::{track_login_failure, track_token_issued};
use crate::modules::users::UserService;

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Hash checked when the username is unknown, so both failure paths pay
/// for one bcrypt verification.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("unknown-account").unwrap_or_default())
}

pub struct AuthService;

impl AuthService {
    fn issue_pair(user: &UserCredentials, jwt_config: &JwtConfig) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access: create_access_token(user.id, &user.username, user.role, jwt_config)?,
            refresh: create_refresh_token(user.id, jwt_config)?,
        })
    }

    /// Exchanges a username and password for an access/refresh pair.
    #[instrument(skip(db, jwt_config, dto), fields(username = %dto.username))]
    pub async fn issue_tokens(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: TokenRequest,
    ) -> Result<TokenPair, AppError> {
        let Some(user) = UserService::get_credentials_by_username(db, &dto.username).await? else {
            let _ = verify_password(&dto.password, dummy_hash());
            track_login_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login_failure("bad_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let pair = Self::issue_pair(&user, jwt_config)?;
        track_token_issued("login");
        tracing::info!(user_id = %user.id, role = %user.role, "tokens issued");

        Ok(pair)
    }

    /// Rotates a refresh token. The user is reloaded so role changes and
    /// deletions take effect immediately.
    #[instrument(skip_all)]
    pub async fn refresh_tokens(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: RefreshTokenRequest,
    ) -> Result<TokenPair, AppError> {
        let claims = verify_refresh_token(&dto.refresh, jwt_config)?;

        let user = UserService::get_credentials_by_id(db, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found".to_string()))?;

        let pair = Self::issue_pair(&user, jwt_config)?;
        track_token_issued("refresh");

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_bcrypt() {
        let hash = dummy_hash();
        assert!(hash.starts_with("$2"));
        assert_eq!(hash.len(), 60);
        assert!(!verify_password("testpass123", hash).unwrap());
    }

    #[test]
    fn test_dummy_hash_is_computed_once() {
        assert!(std::ptr::eq(dummy_hash(), dummy_hash()));
    }
}
