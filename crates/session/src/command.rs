//! User actions addressed by action identifier.

use statement_core::statement::{ActionId, RowAction};
use statement_shared::types::{ReceiptNumber, RecordId};

/// A user action with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the ledger again.
    Reload,
    /// Flip the date order.
    Sort,
    /// Produce the statement document.
    GeneratePdf,
    /// Email the last produced document.
    SendPdf,
    /// Delete a debt record.
    DeleteTx(RecordId),
    /// Void a payment receipt.
    VoidReceipt {
        /// Receipt to void.
        receipt: ReceiptNumber,
        /// Cancellation reason as entered; required.
        reason: Option<String>,
    },
    /// Locate a payment's receipt document.
    ViewReceiptPdf(ReceiptNumber),
}

impl Command {
    /// Action identifier of the command.
    #[must_use]
    pub const fn id(&self) -> ActionId {
        match self {
            Self::Reload => ActionId::Reload,
            Self::Sort => ActionId::Sort,
            Self::GeneratePdf => ActionId::GeneratePdf,
            Self::SendPdf => ActionId::SendPdf,
            Self::DeleteTx(_) => ActionId::DeleteTx,
            Self::VoidReceipt { .. } => ActionId::VoidReceipt,
            Self::ViewReceiptPdf(_) => ActionId::ViewReceiptPdf,
        }
    }

    /// Turns a row action into a command. `reason` is used only for voids.
    #[must_use]
    pub fn from_row_action(action: RowAction, reason: Option<String>) -> Self {
        match action {
            RowAction::DeleteTransaction { record_id } => Self::DeleteTx(record_id),
            RowAction::VoidReceipt { receipt_number } => Self::VoidReceipt {
                receipt: receipt_number,
                reason,
            },
            RowAction::ViewReceipt { receipt_number } => Self::ViewReceiptPdf(receipt_number),
        }
    }
}
