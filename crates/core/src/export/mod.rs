//! Paginated statement document.
//!
//! The export projector lays the ledger out on fixed Letter pages (millimetre
//! geometry, see [`ExportLayout`]), wrapping long text to measured column
//! widths. [`PdfWriter`] serializes the laid-out pages and
//! [`StatementArtifact`] holds the bytes for preview and transmission.

#![allow(clippy::float_arithmetic)]

pub mod artifact;
pub mod document;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod wrap;

pub use artifact::StatementArtifact;
pub use document::{DrawOp, ExportProjector, ExportRequest, ExportRow, FontFace, Page, StatementDocument};
pub use error::ExportError;
pub use layout::{Align, ExportLayout, Rgb};
pub use pdf::PdfWriter;
pub use wrap::wrap_text;
