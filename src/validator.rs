//! JSON body extractor that also runs `validator` rules.
//!
//! Deserialization failures become 400s (with the field when serde names it);
//! rule violations become 422s with one entry per failing field.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use campus_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn missing_field(message: &str) -> Option<&str> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Missing 'Content-Type: application/json' header"),
        );
    }

    let message = rejection.body_text();

    if let Some(field) = missing_field(&message) {
        return AppError::field(field, "This field is required");
    }

    if message.contains("invalid type")
        || message.contains("invalid value")
        || message.contains("unknown variant")
        || message.contains("input contains invalid characters")
    {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Invalid field value in request"),
        );
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(|errors| AppError::validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}
