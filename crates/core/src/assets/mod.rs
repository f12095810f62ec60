//! Best-effort asset loading using Apache OpenDAL.
//!
//! The export background template can live on:
//! - S3-compatible storage: Cloudflare R2, Supabase Storage, AWS S3
//! - Azure Blob Storage
//! - Local filesystem
//!
//! A missing or undecodable template never aborts an export:
//! [`acquire_template`] logs the failure and yields `None`.

mod error;
mod image;
mod store;

pub use error::AssetError;
pub use image::{ImageColor, ImageEncoding, TemplateImage};
pub use store::{AssetStore, acquire_template};
