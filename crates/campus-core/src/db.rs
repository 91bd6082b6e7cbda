//! Turns constraint violations into 400 responses pinned to a request field.
//!
//! Services list the constraints a statement can trip; anything not listed
//! falls back to a generic message for its class, and non-constraint errors
//! become 500s.

use sqlx::error::ErrorKind;

use crate::errors::AppError;

/// A named database constraint and the wire field it guards.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub name: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

impl Constraint {
    pub const fn new(name: &'static str, field: &'static str, message: &'static str) -> Self {
        Self {
            name,
            field,
            message,
        }
    }
}

pub fn map_db_error(err: sqlx::Error, constraints: &[Constraint]) -> AppError {
    let sqlx::Error::Database(db_err) = &err else {
        return AppError::database(err);
    };

    let fallback = match db_err.kind() {
        ErrorKind::UniqueViolation => "A record with these values already exists",
        ErrorKind::ForeignKeyViolation => "Referenced record does not exist",
        ErrorKind::CheckViolation => "Value is out of range",
        ErrorKind::NotNullViolation => "This field is required",
        _ => return AppError::database(err),
    };

    let known = db_err
        .constraint()
        .and_then(|name| constraints.iter().find(|c| c.name == name));

    match known {
        Some(c) => AppError::field(c.field, c.message),
        None => {
            tracing::warn!(constraint = ?db_err.constraint(), "unmapped constraint violation");
            AppError::field("non_field_errors", fallback)
        }
    }
}

/// Builds a substring pattern for `ILIKE ... ESCAPE '\'` with the
/// input's own wildcards matched literally.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_non_database_error_is_internal() {
        let err = map_db_error(sqlx::Error::RowNotFound, &[]);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_like_pattern_wraps_plain_text() {
        assert_eq!(like_pattern("phys"), "%phys%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\dir"), "%c:\\\\dir%");
    }
}
