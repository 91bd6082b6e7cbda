use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, map_db_error};
use campus_models::attendance::{
    Attendance, AttendanceFilterParams, CreateAttendanceDto, UpdateAttendanceDto,
};

const ATTENDANCE_PROJECTION: &str = r#"
    a.id, a.student_id AS student, st.fio AS student_name,
    a.course_id AS course, c.name AS course_name,
    a."date", a.status
"#;

const ATTENDANCE_JOINS: &str = r#"
    JOIN users st ON st.id = a.student_id
    JOIN courses c ON c.id = a.course_id
"#;

const ATTENDANCE_CONSTRAINTS: &[Constraint] = &[
    Constraint::new(
        "attendance_student_id_fkey",
        "student",
        "Student does not exist",
    ),
    Constraint::new("attendance_course_id_fkey", "course", "Course does not exist"),
    Constraint::new(
        "attendance_student_course_date_key",
        "non_field_errors",
        "Attendance for this student, course and date is already recorded",
    ),
];

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, dto), fields(student = %dto.student, course = %dto.course))]
    pub async fn create_attendance(
        db: &PgPool,
        dto: CreateAttendanceDto,
    ) -> Result<Attendance, AppError> {
        let sql = format!(
            r#"WITH a AS (
                   INSERT INTO attendance (student_id, course_id, "date", status)
                   VALUES ($1, $2, $3, $4)
                   RETURNING *
               )
               SELECT {ATTENDANCE_PROJECTION}
               FROM a {ATTENDANCE_JOINS}"#
        );

        let attendance = sqlx::query_as::<_, Attendance>(&sql)
            .bind(dto.student)
            .bind(dto.course)
            .bind(dto.date)
            .bind(dto.status)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, ATTENDANCE_CONSTRAINTS))?;

        Ok(attendance)
    }

    /// Newest dates first.
    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        filters: &AttendanceFilterParams,
    ) -> Result<Vec<Attendance>, AppError> {
        let sql = format!(
            r#"SELECT {ATTENDANCE_PROJECTION}
               FROM attendance a {ATTENDANCE_JOINS}
               WHERE ($1::uuid IS NULL OR a.student_id = $1)
                 AND ($2::uuid IS NULL OR a.course_id = $2)
                 AND ($3::date IS NULL OR a."date" = $3)
               ORDER BY a."date" DESC, st.fio"#
        );

        let records = sqlx::query_as::<_, Attendance>(&sql)
            .bind(filters.student)
            .bind(filters.course)
            .bind(filters.date)
            .fetch_all(db)
            .await?;

        Ok(records)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance_by_id(db: &PgPool, id: Uuid) -> Result<Attendance, AppError> {
        let sql = format!(
            r#"SELECT {ATTENDANCE_PROJECTION}
               FROM attendance a {ATTENDANCE_JOINS}
               WHERE a.id = $1"#
        );

        sqlx::query_as::<_, Attendance>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Attendance not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_attendance(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAttendanceDto,
    ) -> Result<Attendance, AppError> {
        let sql = format!(
            r#"WITH a AS (
                   UPDATE attendance SET
                       student_id = COALESCE($2, student_id),
                       course_id = COALESCE($3, course_id),
                       "date" = COALESCE($4, "date"),
                       status = COALESCE($5, status),
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {ATTENDANCE_PROJECTION}
               FROM a {ATTENDANCE_JOINS}"#
        );

        sqlx::query_as::<_, Attendance>(&sql)
            .bind(id)
            .bind(dto.student)
            .bind(dto.course)
            .bind(dto.date)
            .bind(dto.status)
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, ATTENDANCE_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Attendance not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_attendance(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Attendance not found")));
        }

        Ok(())
    }
}
