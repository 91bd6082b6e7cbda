use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Field name -> list of messages, rendered as the `fields` object of an error body.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// A 400 pinned to a single request field, e.g. a uniqueness violation.
    pub fn field(field: &str, message: &str) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.to_string()]);
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!("{}: {}", field, message),
            fields: Some(fields),
        }
    }

    /// A 422 built from `validator` output, keeping one entry per failing field.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields: FieldErrors = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        let summary = fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow::anyhow!(summary),
            fields: Some(fields),
        }
    }

    pub fn with_fields(mut self, fields: FieldErrors) -> Self {
        self.fields = Some(fields);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = ErrorResponse {
            error: message,
            fields: self.fields,
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
        password: String,
    }

    #[test]
    fn test_field_error_is_bad_request() {
        let err = AppError::field("name", "A direction with this name already exists");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let fields = err.fields.unwrap();
        assert_eq!(
            fields["name"],
            vec!["A direction with this name already exists".to_string()]
        );
    }

    #[test]
    fn test_validation_error_collects_fields() {
        let probe = Probe {
            password: "short".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let err = AppError::validation(&errors);

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error.to_string(), "Password must be at least 8 characters");
        assert!(err.fields.unwrap().contains_key("password"));
    }

    #[test]
    fn test_constructors_status() {
        assert_eq!(
            AppError::unauthorized("x".to_string()).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("x".to_string()).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("x")).status,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_error_hides_details() {
        let response = AppError::internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
