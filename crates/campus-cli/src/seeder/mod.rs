//! Development data for the Campus database.
//!
//! `seed_all` builds a complete tree: directions with their semesters and
//! courses, teachers assigned as professors, students enrolled in each
//! direction, weekly class sessions and a few announcements. Seeded rows are
//! recognizable (see [`models::SEED_MARKER`] and
//! [`models::SEED_EMAIL_DOMAIN`]) so `clear_all` can remove them without
//! touching real data.

pub mod curriculum;
pub mod models;
pub mod timetable;
pub mod users;

use std::time::Instant;

use sqlx::PgPool;

pub use models::SeedConfig;
use models::{SEED_EMAIL_DOMAIN, SEED_MARKER};

/// `($1, $2), ($3, $4), ...` for a multi-row `VALUES` clause.
pub(crate) fn values_placeholders(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", params)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database with {:?}\n", config);

    let teacher_ids = users::seed_teachers(db, config.teachers, &config.password).await?;
    let direction_ids =
        curriculum::seed_directions(db, config.directions, config.semesters_per_direction).await?;
    let semester_ids =
        curriculum::seed_semesters(db, &direction_ids, config.semesters_per_direction).await?;
    let course_ids = curriculum::seed_courses(
        db,
        &semester_ids,
        config.courses_per_semester,
        &teacher_ids,
    )
    .await?;
    let student_ids = users::seed_students(
        db,
        &direction_ids,
        config.students_per_direction,
        config.semesters_per_direction.div_ceil(2),
        &config.password,
    )
    .await?;
    timetable::seed_schedules(db, &course_ids, config.sessions_per_course).await?;
    timetable::seed_events(db, config.events, &student_ids).await?;

    println!(
        "\n✅ Seeding complete in {:?}: {} directions, {} semesters, {} courses, {} teachers, {} students",
        start_time.elapsed(),
        direction_ids.len(),
        semester_ids.len(),
        course_ids.len(),
        teacher_ids.len(),
        student_ids.len()
    );
    println!("   All seeded accounts use the password you configured.");

    Ok(())
}

/// Removes seeded events, directions (cascading to their semesters, courses,
/// sessions, attendance and grades) and non-admin accounts on the seed domain.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let marker = format!("% {}", SEED_MARKER);

    let events = sqlx::query("DELETE FROM events WHERE title LIKE $1")
        .bind(&marker)
        .execute(db)
        .await?
        .rows_affected();

    let directions = sqlx::query("DELETE FROM directions WHERE name LIKE $1")
        .bind(&marker)
        .execute(db)
        .await?
        .rows_affected();

    let users = users::clear_users(db).await?;

    println!(
        "   ✓ Deleted {} events, {} directions and {} @{} users in {:?}",
        events,
        directions,
        users,
        SEED_EMAIL_DOMAIN,
        start_time.elapsed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_placeholders() {
        assert_eq!(values_placeholders(1, 2), "($1, $2)");
        assert_eq!(values_placeholders(2, 3), "($1, $2, $3), ($4, $5, $6)");
        assert_eq!(values_placeholders(0, 3), "");
    }
}
