//! Token creation and verification.
//!
//! All tokens are HS256 and signed with [`JwtConfig::secret`].
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{create_access_token, verify_token};
//! use campus_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "alice", Role::Student, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.username, "alice");
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::{AppError, Role};

use crate::claims::{Claims, RefreshTokenClaims};

/// Returns `(iat, exp)` for a token living `lifetime` seconds.
fn timestamps(lifetime: i64) -> (usize, usize) {
    let now = Utc::now().timestamp();
    (now as usize, (now + lifetime).max(0) as usize)
}

/// Creates a short-lived access token embedding the user's role.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.access_token_expiry);
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role,
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token's signature and expiry.
///
/// # Errors
///
/// Returns 401 for bad signatures, expired tokens, malformed input and
/// refresh tokens.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.refresh_token_expiry);
    let claims = RefreshTokenClaims {
        sub: user_id,
        exp,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

/// Verifies a refresh token. Access tokens are rejected.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "alice", Role::Teacher, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", Role::Admin, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..config
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = JwtConfig {
            access_token_expiry: -3600,
            ..get_test_jwt_config()
        };
        let token = create_access_token(Uuid::new_v4(), "alice", Role::Admin, &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_refresh_token(user_id, &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_refresh_token_not_accepted_as_access() {
        let config = get_test_jwt_config();
        let token = create_refresh_token(Uuid::new_v4(), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_access_token_not_accepted_as_refresh() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", Role::Student, &config).unwrap();
        assert!(verify_refresh_token(&token, &config).is_err());
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let first = create_refresh_token(user_id, &config).unwrap();
        let second = create_refresh_token(user_id, &config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_refresh_expiry_longer_than_access() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let access = create_access_token(user_id, "alice", Role::Student, &config).unwrap();
        let refresh = create_refresh_token(user_id, &config).unwrap();

        let access_claims = verify_token(&access, &config).unwrap();
        let refresh_claims = verify_refresh_token(&refresh, &config).unwrap();

        assert!(refresh_claims.exp > access_claims.exp);
    }
}
