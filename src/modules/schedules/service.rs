use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, map_db_error};
use campus_models::schedules::{
    CreateScheduleDto, Schedule, ScheduleFilterParams, UpdateScheduleDto,
};

const SCHEDULE_PROJECTION: &str = r#"
    sc.id, sc.course_id AS course, c.name AS course_name,
    sc."date", sc."time", sc.topic, p.fio AS professor_name
"#;

const SCHEDULE_JOINS: &str = r#"
    JOIN courses c ON c.id = sc.course_id
    LEFT JOIN users p ON p.id = c.professor_id
"#;

const SCHEDULE_CONSTRAINTS: &[Constraint] = &[Constraint::new(
    "schedules_course_id_fkey",
    "course",
    "Course does not exist",
)];

pub struct ScheduleService;

impl ScheduleService {
    #[instrument(skip(db, dto), fields(course = %dto.course))]
    pub async fn create_schedule(
        db: &PgPool,
        dto: CreateScheduleDto,
    ) -> Result<Schedule, AppError> {
        let sql = format!(
            r#"WITH sc AS (
                   INSERT INTO schedules (course_id, "date", "time", topic)
                   VALUES ($1, $2, $3, $4)
                   RETURNING *
               )
               SELECT {SCHEDULE_PROJECTION}
               FROM sc {SCHEDULE_JOINS}"#
        );

        let schedule = sqlx::query_as::<_, Schedule>(&sql)
            .bind(dto.course)
            .bind(dto.date)
            .bind(dto.time)
            .bind(&dto.topic)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, SCHEDULE_CONSTRAINTS))?;

        Ok(schedule)
    }

    /// Sessions in chronological order.
    #[instrument(skip(db))]
    pub async fn get_schedules(
        db: &PgPool,
        filters: &ScheduleFilterParams,
    ) -> Result<Vec<Schedule>, AppError> {
        let sql = format!(
            r#"SELECT {SCHEDULE_PROJECTION}
               FROM schedules sc {SCHEDULE_JOINS}
               WHERE ($1::uuid IS NULL OR sc.course_id = $1)
                 AND ($2::date IS NULL OR sc."date" = $2)
               ORDER BY sc."date", sc."time", c.name"#
        );

        let schedules = sqlx::query_as::<_, Schedule>(&sql)
            .bind(filters.course)
            .bind(filters.date)
            .fetch_all(db)
            .await?;

        Ok(schedules)
    }

    /// Sessions whose course belongs to a semester of the student's own
    /// direction. A student without a direction sees nothing.
    #[instrument(skip(db))]
    pub async fn get_student_schedules(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Schedule>, AppError> {
        let sql = format!(
            r#"SELECT {SCHEDULE_PROJECTION}
               FROM schedules sc {SCHEDULE_JOINS}
               JOIN semesters s ON s.id = c.semester_id
               JOIN users me ON me.direction_id = s.direction_id
               WHERE me.id = $1
               ORDER BY sc."date", sc."time", c.name"#
        );

        let schedules = sqlx::query_as::<_, Schedule>(&sql)
            .bind(student_id)
            .fetch_all(db)
            .await?;

        Ok(schedules)
    }

    #[instrument(skip(db))]
    pub async fn get_schedule_by_id(db: &PgPool, id: Uuid) -> Result<Schedule, AppError> {
        let sql = format!(
            r#"SELECT {SCHEDULE_PROJECTION}
               FROM schedules sc {SCHEDULE_JOINS}
               WHERE sc.id = $1"#
        );

        sqlx::query_as::<_, Schedule>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_schedule(
        db: &PgPool,
        id: Uuid,
        dto: UpdateScheduleDto,
    ) -> Result<Schedule, AppError> {
        let sql = format!(
            r#"WITH sc AS (
                   UPDATE schedules SET
                       course_id = COALESCE($2, course_id),
                       "date" = COALESCE($3, "date"),
                       "time" = COALESCE($4, "time"),
                       topic = COALESCE($5, topic),
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {SCHEDULE_PROJECTION}
               FROM sc {SCHEDULE_JOINS}"#
        );

        sqlx::query_as::<_, Schedule>(&sql)
            .bind(id)
            .bind(dto.course)
            .bind(dto.date)
            .bind(dto.time)
            .bind(dto.topic)
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, SCHEDULE_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Schedule not found")));
        }

        Ok(())
    }
}
