//! HTTP error response mapping.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use servicebay_domain::error::ServiceBayError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// An error response: a status code and the text placed in `{"message": …}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// Map a failed write into the resource's generic 400 message.
    ///
    /// Lookups keep their own status: `NotFound` and `Conflict` go through
    /// the default mapping.
    pub fn from_write(err: ServiceBayError, message: &'static str) -> Self {
        match err {
            ServiceBayError::Validation(err) => {
                tracing::debug!(error = %err, "rejected write");
                Self::bad_request(message)
            }
            ServiceBayError::Storage(err) => {
                tracing::warn!(error = %err, "write failed in storage");
                Self::bad_request(message)
            }
            other => other.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ServiceBayError> for ApiError {
    fn from(err: ServiceBayError) -> Self {
        match err {
            ServiceBayError::Validation(err) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            ServiceBayError::NotFound(err) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ServiceBayError::Conflict(err) => Self::new(StatusCode::CONFLICT, err.to_string()),
            ServiceBayError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageBody {
                message: &self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servicebay_domain::error::{ConflictError, NotFoundError, ValidationError};

    #[test]
    fn should_map_not_found_to_404_with_entity_message() {
        let err: ApiError = ServiceBayError::from(NotFoundError {
            entity: "Technician",
            id: "9999".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Technician does not exist");
    }

    #[test]
    fn should_map_conflict_to_409() {
        let err: ApiError = ServiceBayError::from(ConflictError::InUse {
            entity: "Technician",
            id: "1".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn should_hide_storage_details_behind_500() {
        let err: ApiError = ServiceBayError::Storage("disk on fire".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn should_narrow_write_failures_to_generic_message() {
        let validation = ApiError::from_write(ValidationError::MissingField("name").into(), "fill it in");
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.message(), "fill it in");

        let storage = ApiError::from_write(ServiceBayError::Storage("locked".into()), "fill it in");
        assert_eq!(storage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(storage.message(), "fill it in");
    }

    #[test]
    fn should_keep_not_found_when_narrowing_write_failure() {
        let err = ApiError::from_write(
            NotFoundError {
                entity: "Service appointment",
                id: "4".to_string(),
            }
            .into(),
            "fill it in",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Service appointment does not exist");
    }
}
