//! Interactive statement view model.
//!
//! The table projector turns a [`LedgerComputation`](crate::ledger::LedgerComputation)
//! into display rows with per-row actions and a summary block. Display
//! helpers here are shared with the export projector so both surfaces print
//! identical figures.

pub mod actions;
pub mod display;
pub mod table;

pub use actions::{ActionId, RowAction, available_actions};
pub use display::{NOT_AVAILABLE, StatementPeriod, SummaryBlock, format_date};
pub use table::{StatementTable, TableProjector, TableRow};
