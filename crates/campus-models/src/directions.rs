use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A program of study.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Direction {
    pub id: Uuid,
    pub name: String,
    /// Number of semesters offered
    pub semesters: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDirectionDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Software Engineering")]
    pub name: String,
    #[serde(default = "default_semesters")]
    #[validate(range(min = 0, message = "Semesters cannot be negative"))]
    #[schema(example = 8)]
    pub semesters: i32,
}

fn default_semesters() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDirectionDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Semesters cannot be negative"))]
    pub semesters: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DirectionFilterParams {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semesters_defaults_to_one() {
        let dto: CreateDirectionDto = serde_json::from_str(r#"{"name":"Physics"}"#).unwrap();
        assert_eq!(dto.semesters, 1);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let dto = CreateDirectionDto {
            name: String::new(),
            semesters: 4,
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_semesters_rejected() {
        let dto = UpdateDirectionDto {
            name: None,
            semesters: Some(-1),
        };
        assert!(dto.validate().is_err());
    }
}
