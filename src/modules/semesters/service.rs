use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, map_db_error};
use campus_models::semesters::{
    CreateSemesterDto, Semester, SemesterFilterParams, UpdateSemesterDto,
};

const SEMESTER_PROJECTION: &str = r#"
    s.id, s.direction_id AS direction, d.name AS direction_name, s.number, s.credits
"#;

const SEMESTER_CONSTRAINTS: &[Constraint] = &[
    Constraint::new(
        "semesters_direction_id_fkey",
        "direction",
        "Direction does not exist",
    ),
    Constraint::new(
        "semesters_direction_id_number_key",
        "number",
        "This direction already has a semester with this number",
    ),
];

pub struct SemesterService;

impl SemesterService {
    #[instrument(skip(db, dto), fields(direction = %dto.direction, number = dto.number))]
    pub async fn create_semester(
        db: &PgPool,
        dto: CreateSemesterDto,
    ) -> Result<Semester, AppError> {
        let sql = format!(
            r#"WITH s AS (
                   INSERT INTO semesters (direction_id, number, credits)
                   VALUES ($1, $2, $3)
                   RETURNING *
               )
               SELECT {SEMESTER_PROJECTION}
               FROM s JOIN directions d ON d.id = s.direction_id"#
        );

        let semester = sqlx::query_as::<_, Semester>(&sql)
            .bind(dto.direction)
            .bind(dto.number)
            .bind(dto.credits)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, SEMESTER_CONSTRAINTS))?;

        Ok(semester)
    }

    #[instrument(skip(db))]
    pub async fn get_semesters(
        db: &PgPool,
        filters: &SemesterFilterParams,
    ) -> Result<Vec<Semester>, AppError> {
        let sql = format!(
            r#"SELECT {SEMESTER_PROJECTION}
               FROM semesters s JOIN directions d ON d.id = s.direction_id
               WHERE ($1::uuid IS NULL OR s.direction_id = $1)
               ORDER BY d.name, s.number"#
        );

        let semesters = sqlx::query_as::<_, Semester>(&sql)
            .bind(filters.direction)
            .fetch_all(db)
            .await?;

        Ok(semesters)
    }

    #[instrument(skip(db))]
    pub async fn get_semester_by_id(db: &PgPool, id: Uuid) -> Result<Semester, AppError> {
        let sql = format!(
            r#"SELECT {SEMESTER_PROJECTION}
               FROM semesters s JOIN directions d ON d.id = s.direction_id
               WHERE s.id = $1"#
        );

        sqlx::query_as::<_, Semester>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Semester not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_semester(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSemesterDto,
    ) -> Result<Semester, AppError> {
        let sql = format!(
            r#"WITH s AS (
                   UPDATE semesters SET
                       direction_id = COALESCE($2, direction_id),
                       number = COALESCE($3, number),
                       credits = COALESCE($4, credits),
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {SEMESTER_PROJECTION}
               FROM s JOIN directions d ON d.id = s.direction_id"#
        );

        sqlx::query_as::<_, Semester>(&sql)
            .bind(id)
            .bind(dto.direction)
            .bind(dto.number)
            .bind(dto.credits)
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, SEMESTER_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Semester not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_semester(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM semesters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Semester not found")));
        }

        Ok(())
    }
}
