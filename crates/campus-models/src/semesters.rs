use campus_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Semester {
    pub id: Uuid,
    pub direction: Uuid,
    pub direction_name: String,
    pub number: i32,
    pub credits: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSemesterDto {
    pub direction: Uuid,
    #[validate(range(min = 0, message = "Semester number cannot be negative"))]
    pub number: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSemesterDto {
    pub direction: Option<Uuid>,
    #[validate(range(min = 0, message = "Semester number cannot be negative"))]
    pub number: Option<i32>,
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SemesterFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub direction: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_default_zero() {
        let json = format!(r#"{{"direction":"{}","number":1}}"#, Uuid::new_v4());
        let dto: CreateSemesterDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.credits, 0);
    }

    #[test]
    fn test_number_must_not_be_negative() {
        let dto = CreateSemesterDto {
            direction: Uuid::new_v4(),
            number: -1,
            credits: 10,
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("number"));

        let dto = CreateSemesterDto {
            direction: Uuid::new_v4(),
            number: 0,
            credits: 10,
        };
        assert!(dto.validate().is_ok());
    }
}
