//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ServiceBayError`] via `#[from]`.

/// Base error for every fallible operation in servicebay.
#[derive(Debug, thiserror::Error)]
pub enum ServiceBayError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    /// Opaque failure from a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date-time: {0}")]
    InvalidDateTime(String),
}

/// A direct-id lookup found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} does not exist")]
pub struct NotFoundError {
    /// Human-readable kind of record, e.g. `"Technician"`.
    pub entity: &'static str,
    pub id: String,
}

/// An operation was refused because other records depend on the target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("{entity} {id} is still referenced")]
    InUse { entity: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_message_from_entity_name() {
        let err = NotFoundError {
            entity: "Technician",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Technician does not exist");
    }

    #[test]
    fn should_convert_validation_error_into_base_error() {
        let err: ServiceBayError = ValidationError::MissingField("name").into();
        assert!(matches!(
            err,
            ServiceBayError::Validation(ValidationError::MissingField("name"))
        ));
    }

    #[test]
    fn should_include_limit_in_too_long_message() {
        let err = ValidationError::TooLong {
            field: "owner",
            max: 30,
        };
        assert_eq!(err.to_string(), "owner must be at most 30 characters");
    }
}
