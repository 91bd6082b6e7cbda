//! Request extractors for authentication and access control.
//!
//! 1. Client sends `Authorization: Bearer <access token>`
//! 2. [`auth::AuthUser`] verifies the token and exposes its claims
//! 3. A `Require*` extractor (see [`require_access!`](crate::require_access))
//!    checks the caller's role against the access table
//! 4. The handler runs with the identity passed in explicitly
//!
//! ```ignore
//! use crate::middleware::auth::RequireGradesWrite;
//!
//! async fn create_grade(
//!     RequireGradesWrite(auth_user): RequireGradesWrite,
//!     ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
//! ) -> Result<(StatusCode, Json<Grade>), AppError> {
//!     // Only reached by teachers
//! }
//! ```

pub mod auth;
