//! Running balance and statement totals.
//!
//! Sign convention: debts add to the owed balance, payments (voided or not)
//! subtract from it. Totals are order-independent; the running balance is a
//! prefix sum over whatever order the rows are displayed in.
//!
//! Arithmetic saturates at the `Decimal` range instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sort::{SortDirection, sort_by_date};
use super::transaction::{Transaction, TransactionKind};

/// A transaction positioned in the displayed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedLedgerEntry {
    /// The underlying transaction.
    pub transaction: Transaction,
    /// Amount with the kind's sign applied.
    pub signed_amount: Decimal,
    /// Cumulative signed amount up to and including this row.
    pub running_balance: Decimal,
}

/// Whole-statement totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Sum of debt amounts.
    pub total_debt: Decimal,
    /// Sum of payment amounts, as a magnitude.
    pub total_payments: Decimal,
    /// `total_debt - total_payments`.
    pub final_balance: Decimal,
}

/// Which side of zero the final balance sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStanding {
    /// Balance ≥ 0: the member owes the organization.
    Owed,
    /// Balance < 0: the member holds a credit.
    Credit,
}

impl StatementSummary {
    /// Adds a debt amount.
    pub fn add_debt(&mut self, amount: Decimal) {
        self.total_debt = self.total_debt.saturating_add(amount);
        self.final_balance = self.total_debt.saturating_sub(self.total_payments);
    }

    /// Adds a payment amount.
    pub fn add_payment(&mut self, amount: Decimal) {
        self.total_payments = self.total_payments.saturating_add(amount);
        self.final_balance = self.total_debt.saturating_sub(self.total_payments);
    }

    /// Classifies the final balance.
    #[must_use]
    pub fn standing(&self) -> BalanceStanding {
        if self.final_balance.is_sign_negative() && !self.final_balance.is_zero() {
            BalanceStanding::Credit
        } else {
            BalanceStanding::Owed
        }
    }
}

/// Entries in display order plus the statement totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerComputation {
    /// Entries in the order they were accumulated.
    pub entries: Vec<OrderedLedgerEntry>,
    /// Order-independent totals.
    pub summary: StatementSummary,
}

impl LedgerComputation {
    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walks an ordered sequence once, producing entries and totals.
#[must_use]
pub fn accumulate(ordered: Vec<Transaction>) -> LedgerComputation {
    let mut summary = StatementSummary::default();
    let mut running_balance = Decimal::ZERO;

    let entries = ordered
        .into_iter()
        .map(|transaction| {
            match transaction.kind {
                TransactionKind::Debt { .. } => summary.add_debt(transaction.amount),
                TransactionKind::Payment { .. } => summary.add_payment(transaction.amount),
            }
            let signed_amount = transaction.signed_amount();
            running_balance = running_balance.saturating_add(signed_amount);
            OrderedLedgerEntry {
                transaction,
                signed_amount,
                running_balance,
            }
        })
        .collect();

    LedgerComputation { entries, summary }
}

/// Sorts a fresh copy of `transactions` and accumulates it.
///
/// Both the table and the export call this independently.
#[must_use]
pub fn compute_ledger(transactions: &[Transaction], direction: SortDirection) -> LedgerComputation {
    accumulate(sort_by_date(transactions, direction))
}
