//! Gateway error types.

use statement_shared::AppError;
use thiserror::Error;

/// Result type alias for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from the collaborator API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with an `error` field.
    #[error("{0}")]
    Rejected(String),

    /// The response body was not what the endpoint promises.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Returns the error code for notices and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "GATEWAY_TRANSPORT",
            Self::Rejected(_) => "GATEWAY_REJECTED",
            Self::Decode(_) => "GATEWAY_DECODE",
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(msg) => Self::Validation(msg),
            other => Self::ExternalService(other.to_string()),
        }
    }
}
