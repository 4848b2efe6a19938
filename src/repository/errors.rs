use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The API answered 404; carries its `message` when it sent one.
    #[error("Entity not found")]
    NotFound(Option<String>),

    #[error("Upstream error ({status})")]
    Upstream { status: u16, message: Option<String> },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl RepositoryError {
    /// Message reported by the API, if the failure came with one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            RepositoryError::NotFound(message) | RepositoryError::Upstream { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<ApiError> for RepositoryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                status: 404,
                message,
            } => RepositoryError::NotFound(message),
            ApiError::Status { status, message } => RepositoryError::Upstream { status, message },
            ApiError::Transport(e) => RepositoryError::ConnectionError(e.to_string()),
            ApiError::InvalidBaseUrl(url) => RepositoryError::ConnectionError(url),
            ApiError::Decode(e) => RepositoryError::DecodeError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_api_message() {
        let err = RepositoryError::from(ApiError::Status {
            status: 404,
            message: Some("Book not found".into()),
        });
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert_eq!(err.api_message(), Some("Book not found"));
    }

    #[test]
    fn decode_failures_have_no_api_message() {
        let err = RepositoryError::from(ApiError::Decode("missing field".into()));
        assert_eq!(err.api_message(), None);
    }
}
