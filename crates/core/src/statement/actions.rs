//! Per-row action decision table and action identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statement_shared::AppError;
use statement_shared::types::{ReceiptNumber, RecordId};

use crate::ledger::{Transaction, TransactionKind};

/// Identifier of a user action, as bound to buttons or terminal commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    /// Reload the ledger for the selected member and period.
    Reload,
    /// Toggle the date sort direction.
    Sort,
    /// Generate the export document.
    GeneratePdf,
    /// Send the generated document by email.
    SendPdf,
    /// Delete a debt record.
    DeleteTx,
    /// Void a payment receipt.
    VoidReceipt,
    /// Open a receipt document.
    ViewReceiptPdf,
}

impl ActionId {
    /// All identifiers, in help-listing order.
    pub const ALL: [Self; 7] = [
        Self::Reload,
        Self::Sort,
        Self::GeneratePdf,
        Self::SendPdf,
        Self::DeleteTx,
        Self::VoidReceipt,
        Self::ViewReceiptPdf,
    ];

    /// Wire/binding name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::Sort => "sort",
            Self::GeneratePdf => "generate-pdf",
            Self::SendPdf => "send-pdf",
            Self::DeleteTx => "delete-tx",
            Self::VoidReceipt => "void-receipt",
            Self::ViewReceiptPdf => "view-receipt-pdf",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown action: {s}")))
    }
}

/// An action offered on a table row, bound to its target record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum RowAction {
    /// Delete the debt record.
    DeleteTransaction {
        /// Record to delete.
        record_id: RecordId,
    },
    /// Void the payment receipt (a reason is required at dispatch time).
    VoidReceipt {
        /// Receipt to void.
        receipt_number: ReceiptNumber,
    },
    /// Open the receipt document.
    ViewReceipt {
        /// Receipt to open.
        receipt_number: ReceiptNumber,
    },
}

impl RowAction {
    /// The identifier this action dispatches under.
    #[must_use]
    pub const fn action_id(&self) -> ActionId {
        match self {
            Self::DeleteTransaction { .. } => ActionId::DeleteTx,
            Self::VoidReceipt { .. } => ActionId::VoidReceipt,
            Self::ViewReceipt { .. } => ActionId::ViewReceiptPdf,
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DeleteTransaction { .. } => "Delete",
            Self::VoidReceipt { .. } => "Void",
            Self::ViewReceipt { .. } => "View PDF",
        }
    }
}

/// Decides which actions a row offers.
///
/// | kind    | condition        | actions                  |
/// |---------|------------------|--------------------------|
/// | Debt    | has record id    | delete                   |
/// | Debt    | no record id     | none                     |
/// | Payment | not voided       | void, view receipt       |
/// | Payment | voided           | none                     |
/// | other   | any              | none                     |
///
/// Kinds that are neither debts nor payments count as credits but offer no
/// actions. Payment actions are addressed by receipt number; a payment
/// without one offers nothing.
#[must_use]
pub fn available_actions(transaction: &Transaction) -> Vec<RowAction> {
    match (&transaction.kind, &transaction.receipt_number) {
        (TransactionKind::Debt { record_id: Some(record_id) }, _) => {
            vec![RowAction::DeleteTransaction {
                record_id: record_id.clone(),
            }]
        }
        (
            TransactionKind::Payment {
                voided: false,
                recognized: true,
            },
            Some(receipt),
        ) => vec![
            RowAction::VoidReceipt {
                receipt_number: receipt.clone(),
            },
            RowAction::ViewReceipt {
                receipt_number: receipt.clone(),
            },
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn tx(kind: TransactionKind, receipt: Option<&str>) -> Transaction {
        Transaction {
            kind,
            amount: Decimal::TEN,
            date: None,
            detail: String::new(),
            receipt_number: receipt.map(ReceiptNumber::new),
        }
    }

    fn payment(voided: bool, recognized: bool) -> TransactionKind {
        TransactionKind::Payment { voided, recognized }
    }

    #[rstest]
    #[case(TransactionKind::Debt { record_id: Some(RecordId::new("9")) }, None, vec![ActionId::DeleteTx])]
    #[case(TransactionKind::Debt { record_id: None }, None, vec![])]
    #[case(payment(false, true), Some("R1"), vec![ActionId::VoidReceipt, ActionId::ViewReceiptPdf])]
    #[case(payment(true, true), Some("R1"), vec![])]
    #[case(payment(false, true), None, vec![])]
    #[case(payment(false, false), Some("R1"), vec![])]
    #[case(payment(true, false), Some("R1"), vec![])]
    fn test_decision_table(
        #[case] kind: TransactionKind,
        #[case] receipt: Option<&str>,
        #[case] expected: Vec<ActionId>,
    ) {
        let ids: Vec<ActionId> = available_actions(&tx(kind, receipt))
            .iter()
            .map(RowAction::action_id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_actions_carry_targets() {
        let actions = available_actions(&tx(payment(false, true), Some("R7")));
        assert_eq!(
            actions[0],
            RowAction::VoidReceipt {
                receipt_number: ReceiptNumber::new("R7")
            }
        );
        assert_eq!(actions[1].label(), "View PDF");
    }

    #[test]
    fn test_action_id_roundtrip() {
        for id in ActionId::ALL {
            assert_eq!(id.as_str().parse::<ActionId>().unwrap(), id);
        }
        assert!("explode".parse::<ActionId>().is_err());
    }
}
