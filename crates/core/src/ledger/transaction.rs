//! Statement transaction types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use statement_shared::types::{ReceiptNumber, RecordId};

/// A raw transaction record as returned by the collaborator API.
///
/// Fields are loosely typed: amounts may arrive as strings or numbers, flags
/// as booleans, numbers or strings. [`crate::ledger::normalize`] coerces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps a JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns a field, treating JSON `null` as absent.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }
}

impl From<Value> for RawRecord {
    /// Non-object values become an empty record.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }
}

/// Transaction kind with the state that drives per-row actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    /// Increases the owed balance.
    Debt {
        /// Record identifier used to address deletion.
        record_id: Option<RecordId>,
    },
    /// Decreases the owed balance, voided or not.
    ///
    /// Any kind other than a debt lands here so it still counts as a credit.
    Payment {
        /// Whether the receipt was voided.
        voided: bool,
        /// False when the record's kind was neither a payment nor a debt.
        recognized: bool,
    },
}

impl TransactionKind {
    /// Returns true for debts.
    #[must_use]
    pub fn is_debt(&self) -> bool {
        matches!(self, Self::Debt { .. })
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debt { .. } => "Debt",
            Self::Payment { .. } => "Payment",
        }
    }
}

/// A normalized statement transaction. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Debt or payment, with kind-specific state.
    pub kind: TransactionKind,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Calendar date; `None` when missing or unparseable.
    pub date: Option<NaiveDate>,
    /// Free-text detail, possibly empty.
    pub detail: String,
    /// Receipt number, normally present for payments.
    pub receipt_number: Option<ReceiptNumber>,
}

impl Transaction {
    /// Amount with the kind's sign applied: debts positive, payments negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Debt { .. } => self.amount,
            TransactionKind::Payment { .. } if self.amount.is_zero() => Decimal::ZERO,
            TransactionKind::Payment { .. } => -self.amount,
        }
    }
}
