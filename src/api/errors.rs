use thiserror::Error;

/// Failures talking to the upstream REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the body's `message` field when present.
    #[error("API responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Message supplied by the API itself, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
