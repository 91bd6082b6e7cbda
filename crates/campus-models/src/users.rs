//! User read model and the DTOs that create or edit users.
//!
//! There is one `users` table for every role. The `/students` endpoints work on
//! the `role = 'student'` subset; `/register` may create any role.

use campus_core::Role;
use campus_core::serde::{deserialize_optional_uuid, double_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Public view of a user. The password hash is not part of it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Full display name
    pub fio: String,
    pub role: Role,
    pub direction: Option<Uuid>,
    pub direction_name: Option<String>,
    /// Year of study
    pub course: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    #[schema(example = "jdoe@campus.example")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(write_only)]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    #[schema(example = "John Doe")]
    pub fio: String,
    /// Defaults to `student`.
    #[serde(default)]
    pub role: Option<Role>,
    pub direction: Option<Uuid>,
    #[validate(range(min = 1, message = "Course must be at least 1"))]
    pub course: Option<i32>,
}

/// Same as [`RegisterUserDto`] without `role`; the role is always `student`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(write_only)]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub fio: String,
    pub direction: Option<Uuid>,
    #[validate(range(min = 1, message = "Course must be at least 1"))]
    pub course: Option<i32>,
}

impl From<CreateStudentDto> for RegisterUserDto {
    fn from(dto: CreateStudentDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            fio: dto.fio,
            role: Some(Role::Student),
            direction: dto.direction,
            course: dto.course,
        }
    }
}

/// Partial update. `direction` and `course` accept `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(write_only)]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub fio: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub direction: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub course: Option<Option<i32>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Case-insensitive match on username, email or full name
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub direction: Option<Uuid>,
}
