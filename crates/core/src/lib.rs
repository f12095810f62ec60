//! Core statement engine.
//!
//! This crate contains pure statement logic with no HTTP client or UI dependencies.
//! Raw collaborator records flow through it in one direction:
//!
//! ```text
//! raw records → normalize → sort → accumulate → { table projector, export projector }
//! ```
//!
//! # Modules
//!
//! - `ledger` - Record normalization, date ordering and balance accumulation
//! - `statement` - Interactive table view model and per-row actions
//! - `export` - Paginated document layout and PDF serialization
//! - `assets` - Best-effort loading of the export background template

pub mod assets;
pub mod export;
pub mod ledger;
pub mod statement;
