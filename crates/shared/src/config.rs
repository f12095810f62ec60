//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Collaborator API configuration.
    pub api: ApiConfig,
    /// Statement export configuration.
    #[serde(default)]
    pub export: ExportConfig,
    /// Asset store configuration (export background template).
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Collaborator API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the statement backend, without trailing slash.
    pub base_url: String,
    /// Path of the transaction listing endpoint.
    #[serde(default = "default_list_path")]
    pub list_path: String,
    /// Path of the debt deletion endpoint.
    #[serde(default = "default_delete_path")]
    pub delete_path: String,
    /// Path of the receipt void endpoint.
    #[serde(default = "default_void_path")]
    pub void_path: String,
    /// Path of the statement email endpoint.
    #[serde(default = "default_send_path")]
    pub send_path: String,
    /// Receipt document path; `{number}` is replaced by the receipt number.
    #[serde(default = "default_receipt_path")]
    pub receipt_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_list_path() -> String {
    "/api/historial/listar_historial".to_string()
}

fn default_delete_path() -> String {
    "/eliminar_transaccion".to_string()
}

fn default_void_path() -> String {
    "/anular_recibo".to_string()
}

fn default_send_path() -> String {
    "/enviar_estado_cuenta".to_string()
}

fn default_receipt_path() -> String {
    "/static/pdf/recibo_{number}.pdf".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Statement export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// `chrono` format string for dates in the table and the document.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Asset key of the background template image, if any.
    #[serde(default = "default_template_key")]
    pub template_key: Option<String>,
    /// Directory where generated documents are written for preview.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_template_key() -> Option<String> {
    Some("templates/pdf/statement_background.png".to_string())
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            template_key: default_template_key(),
            output_dir: default_output_dir(),
        }
    }
}

/// Asset store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetsConfig {
    /// Where assets are read from.
    #[serde(default)]
    pub provider: AssetProvider,
}

/// Asset provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl Default for AssetProvider {
    fn default() -> Self {
        Self::LocalFs {
            root: PathBuf::from("."),
        }
    }
}

impl AssetProvider {
    /// Returns the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STATEMENT").separator("__"))
            .build()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }
}

impl ApiConfig {
    /// Builds an absolute URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Returns the receipt document location for a receipt number.
    #[must_use]
    pub fn receipt_url(&self, number: &str) -> String {
        self.url(&self.receipt_path.replace("{number}", number))
    }
}
