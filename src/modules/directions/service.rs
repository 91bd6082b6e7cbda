use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, like_pattern, map_db_error};
use campus_models::directions::{
    CreateDirectionDto, Direction, DirectionFilterParams, UpdateDirectionDto,
};

const DIRECTION_CONSTRAINTS: &[Constraint] = &[
    Constraint::new(
        "directions_name_key",
        "name",
        "A direction with this name already exists",
    ),
    Constraint::new(
        "directions_semesters_check",
        "semesters",
        "Semesters cannot be negative",
    ),
];

pub struct DirectionService;

impl DirectionService {
    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_direction(
        db: &PgPool,
        dto: CreateDirectionDto,
    ) -> Result<Direction, AppError> {
        let direction = sqlx::query_as::<_, Direction>(
            r#"INSERT INTO directions (name, semesters)
               VALUES ($1, $2)
               RETURNING id, name, semesters, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(dto.semesters)
        .fetch_one(db)
        .await
        .map_err(|e| map_db_error(e, DIRECTION_CONSTRAINTS))?;

        Ok(direction)
    }

    /// Directions ordered by name; `search` matches any part of the name.
    #[instrument(skip(db))]
    pub async fn get_directions(
        db: &PgPool,
        filters: &DirectionFilterParams,
    ) -> Result<Vec<Direction>, AppError> {
        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let directions = sqlx::query_as::<_, Direction>(
            r#"SELECT id, name, semesters, created_at, updated_at
               FROM directions
               WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
               ORDER BY name"#,
        )
        .bind(search)
        .fetch_all(db)
        .await?;

        Ok(directions)
    }

    #[instrument(skip(db))]
    pub async fn get_direction_by_id(db: &PgPool, id: Uuid) -> Result<Direction, AppError> {
        sqlx::query_as::<_, Direction>(
            r#"SELECT id, name, semesters, created_at, updated_at
               FROM directions
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Direction not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_direction(
        db: &PgPool,
        id: Uuid,
        dto: UpdateDirectionDto,
    ) -> Result<Direction, AppError> {
        sqlx::query_as::<_, Direction>(
            r#"UPDATE directions SET
                   name = COALESCE($2, name),
                   semesters = COALESCE($3, semesters),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, semesters, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name)
        .bind(dto.semesters)
        .fetch_optional(db)
        .await
        .map_err(|e| map_db_error(e, DIRECTION_CONSTRAINTS))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Direction not found")))
    }

    /// Semesters and everything below them cascade; students keep their
    /// account with `direction` cleared.
    #[instrument(skip(db))]
    pub async fn delete_direction(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM directions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Direction not found")));
        }

        Ok(())
    }
}
