use std::fmt;

use campus_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Assessment kind. A student has at most one grade of each kind per course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "grade_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GradeType {
    Module1,
    Module2,
    Final,
    Homework,
    Lab,
}

impl GradeType {
    pub const ALL: [GradeType; 5] = [
        GradeType::Module1,
        GradeType::Module2,
        GradeType::Final,
        GradeType::Homework,
        GradeType::Lab,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeType::Module1 => "module1",
            GradeType::Module2 => "module2",
            GradeType::Final => "final",
            GradeType::Homework => "homework",
            GradeType::Lab => "lab",
        }
    }
}

impl fmt::Display for GradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub student: Uuid,
    pub student_name: String,
    pub course: Uuid,
    pub course_name: String,
    #[serde(rename = "type")]
    pub grade_type: GradeType,
    pub score: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub student: Uuid,
    pub course: Uuid,
    #[serde(rename = "type")]
    pub grade_type: GradeType,
    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    pub student: Option<Uuid>,
    pub course: Option<Uuid>,
    #[serde(rename = "type")]
    pub grade_type: Option<GradeType>,
    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GradeFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course: Option<Uuid>,
    #[serde(rename = "type")]
    pub grade_type: Option<GradeType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_type_wire_names() {
        for grade_type in GradeType::ALL {
            let json = serde_json::to_string(&grade_type).unwrap();
            assert_eq!(json, format!("\"{}\"", grade_type));
        }
    }

    #[test]
    fn test_unknown_grade_type_rejected() {
        assert!(serde_json::from_str::<GradeType>(r#""exam""#).is_err());
    }

    #[test]
    fn test_type_field_renamed() {
        let json = format!(
            r#"{{"student":"{}","course":"{}","type":"final","score":91}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let dto: CreateGradeDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.grade_type, GradeType::Final);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_score_rejected() {
        let dto = UpdateGradeDto {
            score: Some(-1),
            ..Default::default()
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("score"));
    }

    #[test]
    fn test_score_has_no_upper_bound() {
        let dto = UpdateGradeDto {
            score: Some(150),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
