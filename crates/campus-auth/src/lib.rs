//! # Campus Auth
//!
//! JWT claims and helpers for the Campus API.
//!
//! - [`claims`]: access and refresh claim structures
//! - [`jwt`]: token creation and verification
//!
//! `POST /api/token` issues one of each; `POST /api/token/refresh` trades a
//! refresh token for a new pair.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
