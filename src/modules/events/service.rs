use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, Constraint, like_pattern, map_db_error};
use campus_models::events::{CreateEventDto, Event, EventFilterParams, UpdateEventDto};

/// Event columns plus recipient ids and names aggregated in name order.
const EVENT_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e."date",
           COALESCE(ARRAY_AGG(u.id ORDER BY u.fio, u.id) FILTER (WHERE u.id IS NOT NULL), '{}') AS recipients,
           COALESCE(ARRAY_AGG(u.fio ORDER BY u.fio, u.id) FILTER (WHERE u.id IS NOT NULL), '{}') AS recipient_names
    FROM events e
    LEFT JOIN event_recipients er ON er.event_id = e.id
    LEFT JOIN users u ON u.id = er.user_id
"#;

const EVENT_CONSTRAINTS: &[Constraint] = &[Constraint::new(
    "event_recipients_user_id_fkey",
    "recipients",
    "Recipient does not exist",
)];

pub struct EventService;

impl EventService {
    /// Inserts the event and its recipients in one transaction.
    #[instrument(skip(db, dto), fields(title = %dto.title, recipients = dto.recipients.len()))]
    pub async fn create_event(db: &PgPool, dto: CreateEventDto) -> Result<Event, AppError> {
        let mut tx = db.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO events (title, description, "date")
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, EVENT_CONSTRAINTS))?;

        Self::insert_recipients(&mut tx, id, &dto.recipients).await?;
        let event = Self::fetch_event(&mut tx, id).await?;

        tx.commit().await?;

        Ok(event)
    }

    /// Newest first.
    #[instrument(skip(db))]
    pub async fn get_events(
        db: &PgPool,
        filters: &EventFilterParams,
    ) -> Result<Vec<Event>, AppError> {
        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"{EVENT_SELECT}
               WHERE ($1::text IS NULL OR e.title ILIKE $1 ESCAPE '\')
               GROUP BY e.id
               ORDER BY e."date" DESC, e.title"#
        );

        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(search)
            .fetch_all(db)
            .await?;

        Ok(events)
    }

    #[instrument(skip(db))]
    pub async fn get_event_by_id(db: &PgPool, id: Uuid) -> Result<Event, AppError> {
        let sql = format!(
            r#"{EVENT_SELECT}
               WHERE e.id = $1
               GROUP BY e.id"#
        );

        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))
    }

    /// Partial update. When `recipients` is present the recipient set is
    /// replaced as a whole within the same transaction.
    #[instrument(skip(db, dto))]
    pub async fn update_event(
        db: &PgPool,
        id: Uuid,
        dto: UpdateEventDto,
    ) -> Result<Event, AppError> {
        let mut tx = db.begin().await?;

        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"UPDATE events SET
                   title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   "date" = COALESCE($4, "date"),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id"#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, EVENT_CONSTRAINTS))?;

        if updated.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }

        if let Some(recipients) = dto.recipients {
            sqlx::query("DELETE FROM event_recipients WHERE event_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            Self::insert_recipients(&mut tx, id, &recipients).await?;
        }

        let event = Self::fetch_event(&mut tx, id).await?;

        tx.commit().await?;

        Ok(event)
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }

        Ok(())
    }

    async fn insert_recipients(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        recipients: &[Uuid],
    ) -> Result<(), AppError> {
        if recipients.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"INSERT INTO event_recipients (event_id, user_id)
               SELECT $1, UNNEST($2::uuid[])
               ON CONFLICT DO NOTHING"#,
        )
        .bind(event_id)
        .bind(recipients)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_db_error(e, EVENT_CONSTRAINTS))?;

        Ok(())
    }

    async fn fetch_event(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Event, AppError> {
        let sql = format!(
            r#"{EVENT_SELECT}
               WHERE e.id = $1
               GROUP BY e.id"#
        );

        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(event)
    }
}
