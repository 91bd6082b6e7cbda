//! Teacher and student accounts.
//!
//! Every account gets its own bcrypt hash; hashing dominates seeding time so
//! it runs on the rayon pool.

use std::time::Instant;

use campus_core::{Role, hash_password};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};
use super::values_placeholders;

const BATCH_SIZE: usize = 800;

struct Identity {
    username: String,
    email: String,
    fio: String,
}

fn fake_identity(role: Role, group_idx: usize, user_idx: usize) -> Identity {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let tag = Uuid::new_v4().simple().to_string();

    let username = format!(
        "{}.{}.{}{}{}",
        slug(&first_name),
        slug(&last_name),
        role.as_str(),
        group_idx * 1000 + user_idx,
        &tag[..6]
    );

    Identity {
        email: format!("{}@{}", username, SEED_EMAIL_DOMAIN),
        fio: format!("{} {}", first_name, last_name),
        username,
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn hashed(password: &str) -> Result<String, String> {
    hash_password(password).map_err(|e| e.error.to_string())
}

pub fn generate_teachers(count: usize, password: &str) -> Result<Vec<UserSeed>, String> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let identity = fake_identity(Role::Teacher, 0, idx);
            Ok(UserSeed {
                username: identity.username,
                email: identity.email,
                fio: identity.fio,
                password_hash: hashed(password)?,
                role: Role::Teacher,
                direction_id: None,
                course: None,
            })
        })
        .collect()
}

/// Students spread over every direction, each in a random year of study.
pub fn generate_students(
    direction_ids: &[Uuid],
    per_direction: usize,
    years: usize,
    password: &str,
) -> Result<Vec<UserSeed>, String> {
    let years = years.max(1) as i32;

    direction_ids
        .par_iter()
        .enumerate()
        .flat_map(|(direction_idx, &direction_id)| {
            (0..per_direction)
                .into_par_iter()
                .map(move |idx| (direction_idx, direction_id, idx))
        })
        .map(|(direction_idx, direction_id, idx)| {
            let identity = fake_identity(Role::Student, direction_idx, idx);
            Ok(UserSeed {
                username: identity.username,
                email: identity.email,
                fio: identity.fio,
                password_hash: hashed(password)?,
                role: Role::Student,
                direction_id: Some(direction_id),
                course: Some((1..years + 1).fake::<i32>()),
            })
        })
        .collect()
}

pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO users (username, email, password, fio, role, direction_id, course) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 7)
        );
        let mut q = sqlx::query_scalar(&query);
        for user in chunk {
            q = q
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.fio)
                .bind(user.role)
                .bind(user.direction_id)
                .bind(user.course);
        }
        let chunk_ids: Vec<Uuid> = q.fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    Ok(ids)
}

pub async fn seed_teachers(
    db: &PgPool,
    count: usize,
    password: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    let teachers = generate_teachers(count, password)?;
    let ids = insert_users_batch(db, &teachers).await?;

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn seed_students(
    db: &PgPool,
    direction_ids: &[Uuid],
    per_direction: usize,
    years: usize,
    password: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students ({} per direction)...",
        direction_ids.len() * per_direction,
        per_direction
    );

    let students = generate_students(direction_ids, per_direction, years, password)?;
    let ids = insert_users_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Deletes seeded accounts. Admins are never touched.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND role <> $2")
        .bind(pattern)
        .bind(Role::Admin)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
