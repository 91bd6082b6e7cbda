use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// An announcement. `recipients` holds user ids and `recipient_names` their
/// full names, both ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub recipients: Vec<Uuid>,
    pub recipient_names: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[schema(example = "Orientation day")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recipients: Vec<Uuid>,
}

/// Partial update. A present `recipients` list replaces the whole set.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEventDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub recipients: Option<Vec<Uuid>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilterParams {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_optional_fields() {
        let dto: CreateEventDto =
            serde_json::from_str(r#"{"title":"Exams","date":"2024-12-20T09:00:00Z"}"#).unwrap();
        assert!(dto.description.is_empty());
        assert!(dto.recipients.is_empty());
        assert!(dto.validate().is_ok());
    }
}
