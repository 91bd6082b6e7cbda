use campus_core::serde::deserialize_optional_uuid;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A single class session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: Uuid,
    pub course: Uuid,
    pub course_name: String,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:30:00")]
    pub time: NaiveTime,
    pub topic: String,
    pub professor_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleDto {
    pub course: Uuid,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:30:00")]
    pub time: NaiveTime,
    #[validate(length(min = 1, max = 255, message = "Topic must be 1-255 characters"))]
    pub topic: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleDto {
    pub course: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "09:30:00")]
    pub time: Option<NaiveTime>,
    #[validate(length(min = 1, max = 255, message = "Topic must be 1-255 characters"))]
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course: Option<Uuid>,
    pub date: Option<NaiveDate>,
}
