//! # Campus API
//!
//! Backend for an academic institution: programs of study (directions), their
//! semesters and courses, student accounts, attendance, grades, class
//! schedules and announcements.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── campus-core/     # AppError, roles, access table, password hashing
//! ├── campus-config/   # Environment-driven configuration
//! ├── campus-db/       # Pool setup and embedded migrations
//! ├── campus-auth/     # JWT claims and token helpers
//! ├── campus-models/   # Read models, DTOs, filter params
//! └── campus-cli/      # Operator CLI (create-admin, seed)
//! src/
//! ├── middleware/      # Bearer auth and role-gate extractors
//! ├── modules/         # One folder per resource
//! ├── router.rs        # Route tree, CORS, tracing and metrics layers
//! └── main.rs          # Server entry point
//! ```
//!
//! Each module under [`modules`] has the same shape:
//!
//! - `controller.rs`: handlers with OpenAPI annotations
//! - `service.rs`: SQL, one unit struct per resource
//! - `router.rs`: Axum routes
//!
//! ## Access control
//!
//! | Role | May use |
//! |------|---------|
//! | Admin | register, directions, semesters, students, courses (write), schedules, events |
//! | Teacher | attendance, grades, schedules |
//! | Student | own direction's schedule |
//!
//! Course reads and `/api/me` are open to every authenticated role.
//!
//! ## API documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use campus_auth;
pub use campus_config;
pub use campus_core;
pub use campus_db;
pub use campus_models;
