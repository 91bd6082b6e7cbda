//! # Campus CLI
//!
//! Operator tooling that talks to the database directly: bootstrapping the
//! first admin (registration through the API is admin-only) and filling a
//! development database with fake curriculum and users.
//!
//! ```ignore
//! use campus_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
