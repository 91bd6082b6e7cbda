use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, like_pattern, map_db_error};
use campus_models::courses::{Course, CourseFilterParams, CreateCourseDto, UpdateCourseDto};

const COURSE_PROJECTION: &str = r#"
    c.id, c.semester_id AS semester, s.number AS semester_number,
    c.name, c.credits, c.is_mandatory,
    c.professor_id AS professor, p.fio AS professor_name
"#;

const COURSE_JOINS: &str = r#"
    JOIN semesters s ON s.id = c.semester_id
    LEFT JOIN users p ON p.id = c.professor_id
"#;

const COURSE_CONSTRAINTS: &[Constraint] = &[
    Constraint::new(
        "courses_semester_id_fkey",
        "semester",
        "Semester does not exist",
    ),
    Constraint::new(
        "courses_professor_id_fkey",
        "professor",
        "Professor does not exist",
    ),
];

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let sql = format!(
            r#"WITH c AS (
                   INSERT INTO courses (semester_id, name, credits, is_mandatory, professor_id)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING *
               )
               SELECT {COURSE_PROJECTION}
               FROM c {COURSE_JOINS}"#
        );

        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(dto.semester)
            .bind(&dto.name)
            .bind(dto.credits)
            .bind(dto.is_mandatory)
            .bind(dto.professor)
            .fetch_one(db)
            .await
            .map_err(|e| map_db_error(e, COURSE_CONSTRAINTS))?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_courses(
        db: &PgPool,
        filters: &CourseFilterParams,
    ) -> Result<Vec<Course>, AppError> {
        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"SELECT {COURSE_PROJECTION}
               FROM courses c {COURSE_JOINS}
               WHERE ($1::uuid IS NULL OR c.semester_id = $1)
                 AND ($2::uuid IS NULL OR c.professor_id = $2)
                 AND ($3::text IS NULL OR c.name ILIKE $3 ESCAPE '\')
               ORDER BY s.number, c.name"#
        );

        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(filters.semester)
            .bind(filters.professor)
            .bind(search)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course_by_id(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        let sql = format!(
            r#"SELECT {COURSE_PROJECTION}
               FROM courses c {COURSE_JOINS}
               WHERE c.id = $1"#
        );

        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    /// Partial update. An explicit `professor: null` unassigns the professor.
    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let sql = format!(
            r#"WITH c AS (
                   UPDATE courses SET
                       semester_id = COALESCE($2, semester_id),
                       name = COALESCE($3, name),
                       credits = COALESCE($4, credits),
                       is_mandatory = COALESCE($5, is_mandatory),
                       professor_id = CASE WHEN $6 THEN $7 ELSE professor_id END,
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {COURSE_PROJECTION}
               FROM c {COURSE_JOINS}"#
        );

        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(dto.semester)
            .bind(dto.name)
            .bind(dto.credits)
            .bind(dto.is_mandatory)
            .bind(dto.professor.is_some())
            .bind(dto.professor.flatten())
            .fetch_optional(db)
            .await
            .map_err(|e| map_db_error(e, COURSE_CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Ok(())
    }
}
