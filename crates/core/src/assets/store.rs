//! Asset store implementation using Apache OpenDAL.

use opendal::{Operator, services};
use statement_shared::config::{AssetProvider, AssetsConfig};
use tracing::{debug, warn};

use super::error::AssetError;
use super::image::TemplateImage;

/// Read-only store for export assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    operator: Operator,
    provider: &'static str,
}

impl AssetStore {
    /// Create a new asset store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_config(config: &AssetsConfig) -> Result<Self, AssetError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self {
            operator,
            provider: config.provider.name(),
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &AssetProvider) -> Result<Operator, AssetError> {
        match provider {
            AssetProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| AssetError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            AssetProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| AssetError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            AssetProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| AssetError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| AssetError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Read an asset's bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset does not exist or cannot be read.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        let buffer = self.operator.read(key).await.map_err(|e| match e.kind() {
            opendal::ErrorKind::NotFound => AssetError::NotFound {
                key: key.to_string(),
            },
            _ => AssetError::from(e),
        })?;
        Ok(buffer.to_vec())
    }

    /// Read and decode a template image.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset cannot be read or is not an embeddable image.
    pub async fn load_template(&self, key: &str) -> Result<TemplateImage, AssetError> {
        let bytes = self.read(key).await?;
        TemplateImage::decode(&bytes)
    }

    /// Get the provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}

/// Loads the export template, degrading to `None` on any failure.
///
/// Failures are logged and never propagated.
pub async fn acquire_template(store: Option<&AssetStore>, key: Option<&str>) -> Option<TemplateImage> {
    let (store, key) = (store?, key?);
    match store.load_template(key).await {
        Ok(image) => {
            debug!(
                key,
                provider = store.provider_name(),
                width = image.width,
                height = image.height,
                "Loaded export template"
            );
            Some(image)
        }
        Err(e) => {
            warn!(
                key,
                provider = store.provider_name(),
                code = e.error_code(),
                error = %e,
                "Export template unavailable, continuing without it"
            );
            None
        }
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
