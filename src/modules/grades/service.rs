use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, map_db_error};
use campus_models::grades::{CreateGradeDto, Grade, GradeFilterParams, UpdateGradeDto};

const GRADE_PROJECTION: &str = r#"
    g.id, g.student_id AS student, st.fio AS student_name,
    g.course_id AS course, c.name AS course_name,
    g.grade_type, g.score
"#;

const GRADE_JOINS: &str = r#"
    JOIN users st ON st.id = g.student_id
    JOIN courses c ON c.id = g.course_id
"#;

const GRADE_CONSTRAINTS: &[Constraint] = &[
    Constraint::new("grades_student_id_fkey", "student", "Student does not exist"),
    Constraint::new("grades_course_id_fkey", "course", "Course does not exist"),
    Constraint::new(
        "grades_student_course_type_key",
        "non_field_errors",
        "This student already has a grade of this type for the course",
    ),
];

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db, dto), fields(student = %dto.student, course = %dto.course, grade_type = %dto.grade_type))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        let sql = format!(
            r#"WITH g AS (
                   INSERT INTO grades (student_id, course_id, grade_type, score)
                   VALUES ($1, $2, $3, $4)
                   RETURNING *
               )
               SELECT {GRADE_PROJECTION}
               FROM g {GRADE_JOINS}"#
        );

        let grade = sqlx::query_as::<_, Grade>(&sql)
            .bind(dto.student)
            .bind(dto.course)
            .bind(dto.grade_type)
            .bind(dto.score)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, GRADE_CONSTRAINTS))?;

        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn get_grades(
        db: &PgPool,
        filters: &GradeFilterParams,
    ) -> Result<Vec<Grade>, AppError> {
        let sql = format!(
            r#"SELECT {GRADE_PROJECTION}
               FROM grades g {GRADE_JOINS}
               WHERE ($1::uuid IS NULL OR g.student_id = $1)
                 AND ($2::uuid IS NULL OR g.course_id = $2)
                 AND ($3::grade_type IS NULL OR g.grade_type = $3)
               ORDER BY c.name, st.fio, g.grade_type"#
        );

        let grades = sqlx::query_as::<_, Grade>(&sql)
            .bind(filters.student)
            .bind(filters.course)
            .bind(filters.grade_type)
            .fetch_all(db)
            .await?;

        Ok(grades)
    }

    #[instrument(skip(db))]
    pub async fn get_grade_by_id(db: &PgPool, id: Uuid) -> Result<Grade, AppError> {
        let sql = format!(
            r#"SELECT {GRADE_PROJECTION}
               FROM grades g {GRADE_JOINS}
               WHERE g.id = $1"#
        );

        sqlx::query_as::<_, Grade>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_grade(
        db: &PgPool,
        id: Uuid,
        dto: UpdateGradeDto,
    ) -> Result<Grade, AppError> {
        let sql = format!(
            r#"WITH g AS (
                   UPDATE grades SET
                       student_id = COALESCE($2, student_id),
                       course_id = COALESCE($3, course_id),
                       grade_type = COALESCE($4, grade_type),
                       score = COALESCE($5, score),
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {GRADE_PROJECTION}
               FROM g {GRADE_JOINS}"#
        );

        sqlx::query_as::<_, Grade>(&sql)
            .bind(id)
            .bind(dto.student)
            .bind(dto.course)
            .bind(dto.grade_type)
            .bind(dto.score)
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, GRADE_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_grade(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade not found")));
        }

        Ok(())
    }
}
