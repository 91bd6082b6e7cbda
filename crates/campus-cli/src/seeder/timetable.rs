//! Class sessions and announcements.

use std::time::Instant;

use chrono::{Duration, NaiveTime, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{SEED_MARKER, ScheduleSeed};
use super::values_placeholders;

const BATCH_SIZE: usize = 1000;

/// Lecture slots used for generated sessions.
const SLOTS: [(u32, u32); 5] = [(8, 30), (10, 15), (12, 0), (14, 0), (15, 45)];

/// Weekly sessions per course starting next week, each in a fixed slot.
pub fn generate_schedules(course_ids: &[Uuid], per_course: usize) -> Vec<ScheduleSeed> {
    let first_day = Utc::now().date_naive() + Duration::days(7);

    course_ids
        .par_iter()
        .enumerate()
        .flat_map(|(course_idx, &course_id)| {
            let (hour, minute) = SLOTS[course_idx % SLOTS.len()];
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
            (0..per_course)
                .map(|week| ScheduleSeed {
                    course_id,
                    date: first_day + Duration::days(7 * week as i64 + (course_idx % 5) as i64),
                    time,
                    topic: Sentence(2..6).fake(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_schedules(
    db: &PgPool,
    course_ids: &[Uuid],
    per_course: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🗓️  Seeding {} class sessions ({} per course)...",
        course_ids.len() * per_course,
        per_course
    );

    let schedules = generate_schedules(course_ids, per_course);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in schedules.chunks(BATCH_SIZE) {
        let query = format!(
            r#"INSERT INTO schedules (course_id, "date", "time", topic) VALUES {}"#,
            values_placeholders(chunk.len(), 4)
        );
        let mut q = sqlx::query(&query);
        for schedule in chunk {
            q = q
                .bind(schedule.course_id)
                .bind(schedule.date)
                .bind(schedule.time)
                .bind(&schedule.topic);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} sessions in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Each event goes to a contiguous slice of `recipient_pool`.
pub async fn seed_events(
    db: &PgPool,
    count: usize,
    recipient_pool: &[Uuid],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📣 Seeding {} events...", count);

    let mut tx = db.begin().await?;
    let chunk_size = recipient_pool.len().div_ceil(count.max(1)).max(1);

    for i in 0..count {
        let title: String = Sentence(2..5).fake();
        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO events (title, description, "date")
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(format!("{} {}", title.trim_end_matches('.'), SEED_MARKER))
        .bind(Paragraph(1..3).fake::<String>())
        .bind(Utc::now() + Duration::days(3 * (i as i64 + 1)))
        .fetch_one(&mut *tx)
        .await?;

        let recipients: Vec<Uuid> = recipient_pool
            .iter()
            .skip(i * chunk_size)
            .take(chunk_size)
            .copied()
            .collect();

        sqlx::query(
            r#"INSERT INTO event_recipients (event_id, user_id)
               SELECT $1, UNNEST($2::uuid[])
               ON CONFLICT DO NOTHING"#,
        )
        .bind(id)
        .bind(&recipients)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    println!("   ✓ Inserted {} events in {:?}", count, start_time.elapsed());

    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_weekly() {
        let course = Uuid::new_v4();
        let schedules = generate_schedules(&[course], 3);

        assert_eq!(schedules.len(), 3);
        assert_eq!(schedules[1].date - schedules[0].date, Duration::days(7));
        assert_eq!(schedules[2].date - schedules[1].date, Duration::days(7));
        assert!(schedules.iter().all(|s| s.time == schedules[0].time));
        assert!(schedules.iter().all(|s| !s.topic.is_empty()));
    }

    #[test]
    fn test_sessions_start_in_future() {
        let schedules = generate_schedules(&[Uuid::new_v4()], 1);
        assert!(schedules[0].date > Utc::now().date_naive());
    }
}
