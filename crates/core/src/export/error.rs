//! Export error types.

use thiserror::Error;

/// Errors that can occur while producing the export document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There are no transactions to export.
    #[error("No transactions to export")]
    EmptyLedger,
}

impl ExportError {
    /// Returns the error code for notices and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLedger => "EMPTY_LEDGER",
        }
    }
}
