//! Action boundary between routes and the repository.
//!
//! Every service validates its input before any network call, forwards to the
//! repository, invalidates cached pages it made stale and turns each failure
//! into a [`ServiceError`] carrying a user-facing message.

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::forms::{FieldErrors, field_errors};
use crate::repository::errors::RepositoryError;

pub mod books;
pub mod qanda;
pub mod topics;
pub mod users;

/// Limit used when a list is fetched to collect filter options.
pub const OPTIONS_FETCH_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Input rejected before reaching the API.
    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    NotFound(String),

    /// The API call failed; carries the API's message or a generic one.
    #[error("{0}")]
    Upstream(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wraps a repository failure, preferring the API's own message over
    /// `fallback`.
    pub fn upstream(err: RepositoryError, fallback: &str) -> Self {
        log::error!("{fallback} ({err})");
        let message = err.api_message().unwrap_or(fallback).to_string();
        match err {
            RepositoryError::NotFound(_) => ServiceError::NotFound(message),
            _ => ServiceError::Upstream(message),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::Validation(field_errors(&err))
    }
}

/// Parses an identifier, rejecting blank ones with `"<entity> ID is required"`.
pub(crate) fn require_id<T>(raw: &str, entity: &str) -> ServiceResult<T>
where
    T: TryFrom<String, Error = TypeConstraintError>,
{
    T::try_from(raw.to_string()).map_err(|err| match err {
        TypeConstraintError::EmptyString => ServiceError::Form(format!("{entity} ID is required")),
        _ => ServiceError::Form(format!("Invalid {entity} ID")),
    })
}

/// Uniform outcome of a mutating action, as reported to the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl<T> From<ServiceResult<T>> for ActionResult<T> {
    fn from(result: ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
                field_errors: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
                field_errors: match err {
                    ServiceError::Validation(errors) => Some(errors),
                    _ => None,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_prefers_api_message() {
        let err = ServiceError::upstream(
            RepositoryError::Upstream {
                status: 409,
                message: Some("ISBN already exists".into()),
            },
            "Failed to create book. Please try again.",
        );
        assert_eq!(err.to_string(), "ISBN already exists");

        let err = ServiceError::upstream(
            RepositoryError::ConnectionError("timeout".into()),
            "Failed to create book. Please try again.",
        );
        assert_eq!(err.to_string(), "Failed to create book. Please try again.");
    }

    #[test]
    fn require_id_tells_blank_and_dot_ids_apart() {
        use crate::domain::types::BookId;

        let err = require_id::<BookId>("  ", "Book").unwrap_err();
        assert_eq!(err.to_string(), "Book ID is required");
        let err = require_id::<BookId>("..", "Book").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Book ID");
        assert_eq!(require_id::<BookId>("b1", "Book").unwrap().as_str(), "b1");
    }

    #[test]
    fn action_result_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("PRICE".into(), vec!["Price must be non-negative".into()]);
        let result: ActionResult<()> = ServiceResult::Err(ServiceError::Validation(errors)).into();

        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["fieldErrors"]["PRICE"][0], "Price must be non-negative");
    }
}
