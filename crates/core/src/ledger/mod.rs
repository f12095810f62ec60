//! Member ledger logic.
//!
//! This module implements the statement ledger pipeline:
//! - Normalization of loosely typed collaborator records
//! - Stable date ordering under a toggleable direction
//! - Running balance and summary accumulation

pub mod balance;
pub mod normalize;
pub mod sort;
pub mod transaction;

#[cfg(test)]
mod props;

pub use balance::{
    BalanceStanding, LedgerComputation, OrderedLedgerEntry, StatementSummary, accumulate,
    compute_ledger,
};
pub use normalize::{normalize, normalize_record};
pub use sort::{SortDirection, sort_by_date};
pub use transaction::{RawRecord, Transaction, TransactionKind};
