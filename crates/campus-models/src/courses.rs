use campus_core::serde::{deserialize_optional_uuid, double_option};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A taught subject. `professor` is cleared, not cascaded, when the user is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub semester: Uuid,
    pub semester_number: i32,
    pub name: String,
    pub credits: i32,
    pub is_mandatory: bool,
    pub professor: Option<Uuid>,
    pub professor_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    pub semester: Uuid,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Operating Systems")]
    pub name: String,
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: i32,
    #[serde(default)]
    pub is_mandatory: bool,
    /// Intended to be a teacher; not enforced.
    pub professor: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    pub semester: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: Option<i32>,
    pub is_mandatory: Option<bool>,
    /// `null` removes the professor.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub professor: Option<Option<Uuid>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub semester: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub professor: Option<Uuid>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mandatory_defaults_false() {
        let json = format!(
            r#"{{"semester":"{}","name":"Algebra","credits":5}}"#,
            Uuid::new_v4()
        );
        let dto: CreateCourseDto = serde_json::from_str(&json).unwrap();
        assert!(!dto.is_mandatory);
        assert!(dto.professor.is_none());
    }

    #[test]
    fn test_update_distinguishes_null_professor() {
        let cleared: UpdateCourseDto = serde_json::from_str(r#"{"professor":null}"#).unwrap();
        assert_eq!(cleared.professor, Some(None));

        let untouched: UpdateCourseDto = serde_json::from_str(r#"{"credits":3}"#).unwrap();
        assert_eq!(untouched.professor, None);
    }
}
