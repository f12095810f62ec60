//! Interactive table projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statement_shared::types::format_amount;

use super::actions::{RowAction, available_actions};
use super::display::{NOT_AVAILABLE, SummaryBlock, format_date};
use crate::ledger::{LedgerComputation, SortDirection};

/// One display row of the statement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Receipt number or `N/A`.
    pub receipt: String,
    /// Formatted date or `N/A`.
    pub date: String,
    /// Kind label.
    pub kind: String,
    /// Detail text.
    pub detail: String,
    /// Signed amount, two decimals.
    pub amount: String,
    /// Running balance, two decimals.
    pub balance: String,
    /// Raw running balance, for styling.
    pub running_balance: Decimal,
    /// Actions offered on this row.
    pub actions: Vec<RowAction>,
}

/// The full interactive view: rows in display order plus the summary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTable {
    /// Direction the rows are ordered in.
    pub direction: SortDirection,
    /// Display rows.
    pub rows: Vec<TableRow>,
    /// Summary figures.
    pub summary: SummaryBlock,
}

impl StatementTable {
    /// Column headers.
    pub const HEADERS: [&'static str; 7] =
        ["Receipt", "Date", "Type", "Detail", "Amount", "Balance", "Action"];
}

/// Projects a ledger computation into the interactive table.
#[derive(Debug, Clone)]
pub struct TableProjector {
    date_format: String,
}

impl TableProjector {
    /// Creates a projector with a `chrono` date format.
    #[must_use]
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Builds the table. Pure: the same input always yields the same table.
    #[must_use]
    pub fn project(&self, computation: &LedgerComputation, direction: SortDirection) -> StatementTable {
        let rows = computation
            .entries
            .iter()
            .map(|entry| {
                let tx = &entry.transaction;
                TableRow {
                    receipt: tx
                        .receipt_number
                        .as_ref()
                        .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string),
                    date: format_date(tx.date, &self.date_format),
                    kind: tx.kind.label().to_string(),
                    detail: tx.detail.clone(),
                    amount: format_amount(entry.signed_amount),
                    balance: format_amount(entry.running_balance),
                    running_balance: entry.running_balance,
                    actions: available_actions(tx),
                }
            })
            .collect();

        StatementTable {
            direction,
            rows,
            summary: SummaryBlock::from(&computation.summary),
        }
    }
}
