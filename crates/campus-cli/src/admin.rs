use campus_core::{Role, hash_password};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewAdmin<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub fio: &'a str,
    pub password: &'a str,
}

/// Inserts an admin account, refusing duplicates of username or email.
pub async fn create_admin(
    db: &PgPool,
    admin: NewAdmin<'_>,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    if admin.password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(admin.username)
            .bind(admin.email)
            .fetch_optional(db)
            .await?;

    if existing.is_some() {
        return Err("A user with this username or email already exists".into());
    }

    let hashed = hash_password(admin.password).map_err(|e| e.error.to_string())?;

    let id: Uuid = sqlx::query_scalar(
        r#"INSERT INTO users (username, email, password, fio, role)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(admin.username)
    .bind(admin.email)
    .bind(hashed)
    .bind(admin.fio)
    .bind(Role::Admin)
    .fetch_one(db)
    .await?;

    Ok(id)
}
