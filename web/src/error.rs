//! Error type bridging the lifecycle services and HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dev_curator_core::{DomainError, ServiceError};
use serde::Serialize;
use std::fmt;

/// Application error for web handlers.
///
/// Carries the HTTP status, a stable machine-readable code, a user-facing
/// message, and optionally the internal error for logging. Converts into an
/// Axum response as a JSON body `{ "code", "message" }`; internals are
/// logged, never leaked.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: &'static str,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Attach the internal error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), "BAD_REQUEST")
    }

    /// 404 Not Found for a named resource.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} '{id}' not found"),
            "NOT_FOUND",
        )
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into(), "CONFLICT")
    }

    /// 422 Unprocessable Entity.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR",
        )
    }

    /// 502 Bad Gateway — an upstream dependency (the image host) failed.
    #[must_use]
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message.into(), "UPLOAD_FAILED")
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// The HTTP status this error answers with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "request failed"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "request failed"
                ),
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(domain) => domain.into(),
            ServiceError::NotFound { slug } => Self::not_found("Event", slug),
            ServiceError::DuplicateSlug { slug } => {
                Self::conflict(format!("an event with slug '{slug}' already exists"))
            }
            ServiceError::DuplicateBooking => {
                Self::conflict("this email has already booked this event")
            }
            err @ ServiceError::Upload(_) => {
                Self::bad_gateway("image upload failed").with_source(anyhow::Error::new(err))
            }
            err @ ServiceError::Store(_) => {
                Self::internal("something went wrong").with_source(anyhow::Error::new(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = AppError::bad_request("Slug is required");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Slug is required");
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = AppError::not_found("Event", "react-summit");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "[NOT_FOUND] Event 'react-summit' not found");
    }

    #[test]
    fn service_errors_map_to_the_documented_statuses() {
        let not_found = AppError::from(ServiceError::NotFound {
            slug: "x".to_owned(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let dup = AppError::from(ServiceError::DuplicateSlug {
            slug: "x".to_owned(),
        });
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let invalid = AppError::from(ServiceError::Domain(DomainError::InvalidTime {
            input: "9:5".to_owned(),
        }));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
