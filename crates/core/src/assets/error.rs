//! Asset error types.

use thiserror::Error;

/// Asset acquisition errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset not found in storage.
    #[error("asset not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Asset provider configuration error.
    #[error("asset store configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("asset read failed: {0}")]
    Operation(String),

    /// The bytes are not an image format the document can embed.
    #[error("unsupported template image: {0}")]
    UnsupportedImage(String),
}

impl AssetError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an unsupported image error.
    #[must_use]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedImage(msg.into())
    }

    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ASSET_NOT_FOUND",
            Self::Configuration(_) => "ASSET_CONFIGURATION",
            Self::Operation(_) => "ASSET_OPERATION",
            Self::UnsupportedImage(_) => "UNSUPPORTED_IMAGE",
        }
    }
}

impl From<opendal::Error> for AssetError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}
