//! Collaborator API client for member statements.
//!
//! [`StatementGateway`] is the seam the session talks through; [`HttpGateway`]
//! implements it over the JSON backend with `reqwest`.

pub mod error;
pub mod http;
pub mod wire;

pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;

use async_trait::async_trait;
use chrono::NaiveDate;
use statement_core::ledger::RawRecord;
use statement_shared::types::{MemberKey, ReceiptNumber, RecordId};

/// Operations the statement backend offers.
#[async_trait]
pub trait StatementGateway: Send + Sync {
    /// Lists a member's raw transaction records, optionally bounded by dates.
    async fn list_transactions(
        &self,
        member: &MemberKey,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> GatewayResult<Vec<RawRecord>>;

    /// Deletes a debt record. Returns the backend's confirmation message.
    async fn delete_transaction(&self, member: &MemberKey, record_id: &RecordId) -> GatewayResult<String>;

    /// Voids a payment receipt with a reason. Returns the confirmation message.
    async fn void_receipt(
        &self,
        member: &MemberKey,
        receipt: &ReceiptNumber,
        reason: &str,
    ) -> GatewayResult<String>;

    /// Emails a base64-encoded statement document. Returns the confirmation message.
    async fn send_statement_document(&self, pdf_base64: &str, email: &str) -> GatewayResult<String>;

    /// Location of a payment's receipt document.
    fn receipt_location(&self, receipt: &ReceiptNumber) -> String;
}
