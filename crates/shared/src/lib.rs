//! Shared types, errors, and configuration for member statements.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for members, debt records and receipts
//! - Money formatting with fixed two-decimal display
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, AppConfig, AssetsConfig, ExportConfig};
pub use error::{AppError, AppResult};
