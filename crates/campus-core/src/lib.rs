//! # Campus Core
//!
//! Core types, errors, and utilities for the Campus API.
//!
//! - [`access`]: Static role gates for every (resource, action) pair
//! - [`db`]: Constraint violation mapping and search patterns
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`role`]: The three account roles
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use campus_core::{AppError, Role, access::{Action, Resource, allowed}};
//!
//! if !allowed(Role::Student, Resource::Grades, Action::Write) {
//!     return Err(AppError::forbidden("Teacher role required".to_string()));
//! }
//! ```

pub mod access;
pub mod db;
pub mod errors;
pub mod password;
pub mod role;
pub mod serde;

// Re-export commonly used types at crate root
pub use access::{Action, Gate, Resource, allowed};
pub use db::{Constraint, like_pattern, map_db_error};
pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
pub use role::Role;
