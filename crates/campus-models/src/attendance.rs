use campus_core::serde::deserialize_optional_uuid;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Presence of one student in one course on one day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: Uuid,
    pub student: Uuid,
    pub student_name: String,
    pub course: Uuid,
    pub course_name: String,
    pub date: NaiveDate,
    /// `true` when present
    pub status: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceDto {
    pub student: Uuid,
    pub course: Uuid,
    #[schema(example = "2024-09-02")]
    pub date: NaiveDate,
    pub status: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    pub student: Option<Uuid>,
    pub course: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course: Option<Uuid>,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parses_iso() {
        let json = format!(
            r#"{{"student":"{}","course":"{}","date":"2024-09-02","status":true}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let dto: CreateAttendanceDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
    }
}
