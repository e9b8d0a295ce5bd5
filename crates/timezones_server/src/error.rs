//! Mapping of service failures to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use std::fmt::{Display, Formatter};
use timezones_core::logging::sanitize_message;
use timezones_core::ServiceError;

const MAX_LOGGED_ERROR_CHARS: usize = 240;

/// Error returned by route handlers.
///
/// Client errors carry the message sent back as the plain-text body;
/// internal errors keep their detail for the log only.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message.clone(),
            Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::NotFound(message) => write!(f, "not found: {message}"),
            Self::Internal(message) => write!(f, "internal server error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::BadRequest(err.to_string()),
            err @ ServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::Store(err) => Self::Internal(err.to_string()),
        }
    }
}

/// Bodies that are not a JSON object of optional strings never reach the
/// validator; they are still client errors.
impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = sanitize_message(&self.to_string(), MAX_LOGGED_ERROR_CHARS);
        if status.is_server_error() {
            error!(
                "event=api_error module=http status={} code={} error={}",
                status.as_u16(),
                self.code(),
                detail
            );
        } else {
            warn!(
                "event=api_error module=http status={} code={} error={}",
                status.as_u16(),
                self.code(),
                detail
            );
        }

        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use timezones_core::db::DbError;
    use timezones_core::{ServiceError, StoreError, ValidationError};

    #[test]
    fn validation_errors_become_bad_request_with_message() {
        let err = ApiError::from(ServiceError::Validation(ValidationError::Offset));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.public_message(),
            "Time zone offset should be a non-empty string"
        );
    }

    #[test]
    fn not_found_keeps_id_in_message() {
        let err = ApiError::from(ServiceError::NotFound(12));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Time zone with id: 12 not found");
    }

    #[test]
    fn store_errors_hide_details() {
        let err = ApiError::from(ServiceError::Store(StoreError::Db(
            DbError::UnsupportedSchemaVersion {
                db_version: 9,
                latest_supported: 1,
            },
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }
}
