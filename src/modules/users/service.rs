use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, Role, hash_password, like_pattern, map_db_error};
use campus_models::users::{RegisterUserDto, StudentFilterParams, UpdateStudentDto, User};
use campus_models::auth::UserCredentials;

/// Projection of the [`User`] read model over a `users u` relation.
pub(crate) const USER_PROJECTION: &str = r#"
    u.id, u.username, u.email, u.fio, u.role,
    u.direction_id AS direction, d.name AS direction_name,
    u.course, u.created_at, u.updated_at
"#;

pub(crate) const USER_CONSTRAINTS: &[Constraint] = &[
    Constraint::new(
        "users_username_key",
        "username",
        "A user with that username already exists",
    ),
    Constraint::new(
        "users_email_key",
        "email",
        "A user with that email already exists",
    ),
    Constraint::new(
        "users_direction_id_fkey",
        "direction",
        "Direction does not exist",
    ),
    Constraint::new("users_course_check", "course", "Course must be at least 1"),
];

pub struct UserService;

impl UserService {
    /// Inserts a user with a bcrypt-hashed password. Role defaults to student.
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn create_user(db: &PgPool, dto: RegisterUserDto) -> Result<User, AppError> {
        let hashed = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or_default();

        let sql = format!(
            r#"WITH u AS (
                   INSERT INTO users (username, email, password, fio, role, direction_id, course)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)
                   RETURNING *
               )
               SELECT {USER_PROJECTION}
               FROM u LEFT JOIN directions d ON d.id = u.direction_id"#
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&dto.username)
            .bind(&dto.email)
            .bind(&hashed)
            .bind(&dto.fio)
            .bind(role)
            .bind(dto.direction)
            .bind(dto.course)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, USER_CONSTRAINTS))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!(
            r#"SELECT {USER_PROJECTION}
               FROM users u LEFT JOIN directions d ON d.id = u.direction_id
               WHERE u.id = $1"#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_credentials_by_username(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, password, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(db))]
    pub async fn get_credentials_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, password, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }

    /// Lists users of one role, newest first.
    #[instrument(skip(db))]
    pub async fn list_by_role(
        db: &PgPool,
        role: Role,
        filters: &StudentFilterParams,
    ) -> Result<Vec<User>, AppError> {
        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"SELECT {USER_PROJECTION}
               FROM users u LEFT JOIN directions d ON d.id = u.direction_id
               WHERE u.role = $1
                 AND ($2::uuid IS NULL OR u.direction_id = $2)
                 AND ($3::text IS NULL
                      OR u.username ILIKE $3 ESCAPE '\'
                      OR u.email ILIKE $3 ESCAPE '\'
                      OR u.fio ILIKE $3 ESCAPE '\')
               ORDER BY u.created_at DESC, u.username"#
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .bind(filters.direction)
            .bind(search)
            .fetch_all(db)
            .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_by_role(db: &PgPool, id: Uuid, role: Role) -> Result<User, AppError> {
        let sql = format!(
            r#"SELECT {USER_PROJECTION}
               FROM users u LEFT JOIN directions d ON d.id = u.direction_id
               WHERE u.id = $1 AND u.role = $2"#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Partial update of a user of the given role. A new password is re-hashed.
    #[instrument(skip(db, dto))]
    pub async fn update_by_role(
        db: &PgPool,
        id: Uuid,
        role: Role,
        dto: UpdateStudentDto,
    ) -> Result<User, AppError> {
        let hashed = dto.password.as_deref().map(hash_password).transpose()?;

        let sql = format!(
            r#"WITH u AS (
                   UPDATE users SET
                       username = COALESCE($3, username),
                       email = COALESCE($4, email),
                       password = COALESCE($5, password),
                       fio = COALESCE($6, fio),
                       direction_id = CASE WHEN $7 THEN $8 ELSE direction_id END,
                       course = CASE WHEN $9 THEN $10 ELSE course END,
                       updated_at = NOW()
                   WHERE id = $1 AND role = $2
                   RETURNING *
               )
               SELECT {USER_PROJECTION}
               FROM u LEFT JOIN directions d ON d.id = u.direction_id"#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(role)
            .bind(dto.username)
            .bind(dto.email)
            .bind(hashed)
            .bind(dto.fio)
            .bind(dto.direction.is_some())
            .bind(dto.direction.flatten())
            .bind(dto.course.is_some())
            .bind(dto.course.flatten())
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, USER_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_by_role(db: &PgPool, id: Uuid, role: Role) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(id)
            .bind(role)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
