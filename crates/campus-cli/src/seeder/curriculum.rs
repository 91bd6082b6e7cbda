//! Directions, semesters and courses.

use std::time::Instant;

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::{Buzzword, Industry};
use rayon::prelude::*;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{CourseSeed, DirectionSeed, SEED_MARKER, SemesterSeed};
use super::values_placeholders;

const BATCH_SIZE: usize = 500;

pub fn generate_directions(count: usize, semesters: usize) -> Vec<DirectionSeed> {
    (0..count)
        .map(|i| {
            let industry: String = Industry().fake();
            DirectionSeed {
                name: format!("{} {} {}", industry, i + 1, SEED_MARKER),
                semesters: semesters as i32,
            }
        })
        .collect()
}

pub fn generate_semesters(direction_ids: &[Uuid], per_direction: usize) -> Vec<SemesterSeed> {
    direction_ids
        .par_iter()
        .flat_map(|&direction_id| {
            (1..=per_direction)
                .map(|number| SemesterSeed {
                    direction_id,
                    number: number as i32,
                    credits: (24..32).fake::<i32>(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Professors are assigned round-robin from `teacher_ids`.
pub fn generate_courses(
    semester_ids: &[Uuid],
    per_semester: usize,
    teacher_ids: &[Uuid],
) -> Vec<CourseSeed> {
    semester_ids
        .par_iter()
        .enumerate()
        .flat_map(|(semester_idx, &semester_id)| {
            (0..per_semester)
                .map(|course_idx| {
                    let topic: String = Buzzword().fake();
                    let slot = semester_idx * per_semester + course_idx;
                    CourseSeed {
                        semester_id,
                        name: format!("{} {}", capitalize(&topic), course_idx + 1),
                        credits: (2..7).fake::<i32>(),
                        is_mandatory: Boolean(70).fake(),
                        professor_id: if teacher_ids.is_empty() {
                            None
                        } else {
                            Some(teacher_ids[slot % teacher_ids.len()])
                        },
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn seed_directions(
    db: &PgPool,
    count: usize,
    semesters: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧭 Seeding {} directions...", count);

    let directions = generate_directions(count, semesters);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(directions.len());

    for chunk in directions.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO directions (name, semesters) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 2)
        );
        let mut q = sqlx::query_scalar(&query);
        for direction in chunk {
            q = q.bind(&direction.name).bind(direction.semesters);
        }
        let chunk_ids: Vec<Uuid> = q.fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} directions in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Semester ids come back grouped by direction, in `direction_ids` order.
pub async fn seed_semesters(
    db: &PgPool,
    direction_ids: &[Uuid],
    per_direction: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📅 Seeding {} semesters ({} per direction)...",
        direction_ids.len() * per_direction,
        per_direction
    );

    let semesters = generate_semesters(direction_ids, per_direction);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(semesters.len());

    for chunk in semesters.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO semesters (direction_id, number, credits) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 3)
        );
        let mut q = sqlx::query_scalar(&query);
        for semester in chunk {
            q = q
                .bind(semester.direction_id)
                .bind(semester.number)
                .bind(semester.credits);
        }
        let chunk_ids: Vec<Uuid> = q.fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} semesters in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn seed_courses(
    db: &PgPool,
    semester_ids: &[Uuid],
    per_semester: usize,
    teacher_ids: &[Uuid],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📚 Seeding {} courses ({} per semester)...",
        semester_ids.len() * per_semester,
        per_semester
    );

    let courses = generate_courses(semester_ids, per_semester, teacher_ids);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(courses.len());

    for chunk in courses.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO courses (semester_id, name, credits, is_mandatory, professor_id) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 5)
        );
        let mut q = sqlx::query_scalar(&query);
        for course in chunk {
            q = q
                .bind(course.semester_id)
                .bind(&course.name)
                .bind(course.credits)
                .bind(course.is_mandatory)
                .bind(course.professor_id);
        }
        let chunk_ids: Vec<Uuid> = q.fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
