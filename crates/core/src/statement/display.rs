//! Display formatting shared by the table and the export document.

use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statement_shared::types::{format_credit, format_currency};

use crate::ledger::{BalanceStanding, StatementSummary};

/// Placeholder for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a date with a `chrono` format string, or `N/A` when unknown.
///
/// An invalid format string falls back to ISO `YYYY-MM-DD` instead of panicking.
#[must_use]
pub fn format_date(date: Option<NaiveDate>, format: &str) -> String {
    let Some(date) = date else {
        return NOT_AVAILABLE.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.to_string();
    }
    out
}

/// Statement period as selected by the user; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl StatementPeriod {
    /// Creates a period.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// `"<start> to <end>"` with ISO dates as provided, `N/A` for open bounds.
    #[must_use]
    pub fn label(&self) -> String {
        let bound = |d: Option<NaiveDate>| d.map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.to_string());
        format!("{} to {}", bound(self.start), bound(self.end))
    }
}

/// Summary figures as both surfaces print them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBlock {
    /// Total payments, as a magnitude.
    pub total_payments: Decimal,
    /// Final balance.
    pub final_balance: Decimal,
    /// Total payments shown as a credit, e.g. `-$40.00`.
    pub total_payments_display: String,
    /// Final balance, e.g. `$60.00` or `$-20.00`.
    pub final_balance_display: String,
    /// Styling tag for the final balance.
    pub standing: BalanceStanding,
}

impl From<&StatementSummary> for SummaryBlock {
    fn from(summary: &StatementSummary) -> Self {
        Self {
            total_payments: summary.total_payments,
            final_balance: summary.final_balance,
            total_payments_display: format_credit(summary.total_payments),
            final_balance_display: format_currency(summary.final_balance),
            standing: summary.standing(),
        }
    }
}
