//! Session error types.

use statement_core::export::ExportError;
use statement_gateway::GatewayError;
use statement_shared::AppError;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Why a session operation did not happen.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No member is selected.
    #[error("Select a member first")]
    NoMember,

    /// The export could not be produced.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Sending was requested before any export exists.
    #[error("Generate the statement before sending it")]
    NoExport,

    /// The member has no usable email address.
    #[error("The member has no email address")]
    NoRecipient,

    /// Voiding requires a reason.
    #[error("A cancellation reason is required")]
    MissingReason,

    /// The collaborator call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    /// Returns the error code for notices and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoMember => "NO_MEMBER",
            Self::Export(e) => e.error_code(),
            Self::NoExport => "NO_EXPORT",
            Self::NoRecipient => "NO_RECIPIENT",
            Self::MissingReason => "MISSING_REASON",
            Self::Gateway(e) => e.error_code(),
        }
    }

    /// True when the operation was refused before any side effect.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        !matches!(self, Self::Gateway(_))
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Gateway(e) => e.into(),
            other => Self::Precondition(other.to_string()),
        }
    }
}
