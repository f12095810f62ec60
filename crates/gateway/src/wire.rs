//! JSON payloads exchanged with the statement backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use statement_core::ledger::RawRecord;

use crate::error::{GatewayError, GatewayResult};

/// Query string of the listing endpoint. Open bounds are sent empty.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ListQuery {
    /// Member key.
    pub key_miembro: String,
    /// Period start, `YYYY-MM-DD`.
    pub fecha_inicio: String,
    /// Period end, `YYYY-MM-DD`.
    pub fecha_fin: String,
}

impl ListQuery {
    /// Builds the query for a member and optional bounds.
    #[must_use]
    pub fn new(member: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let bound = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            key_miembro: member.to_string(),
            fecha_inicio: bound(start),
            fecha_fin: bound(end),
        }
    }
}

/// Body of the debt deletion request.
#[derive(Debug, Serialize)]
pub struct DeleteTransactionRequest<'a> {
    /// Member key.
    pub key_miembro: &'a str,
    /// Debt record id.
    pub historial_id: &'a str,
}

/// Body of the receipt void request.
#[derive(Debug, Serialize)]
pub struct VoidReceiptRequest<'a> {
    /// Member key.
    pub key_miembro: &'a str,
    /// Receipt number.
    pub numero_recibo: &'a str,
    /// Cancellation reason.
    pub motivo_cancelacion: &'a str,
}

/// Body of the statement delivery request.
#[derive(Debug, Serialize)]
pub struct SendStatementRequest<'a> {
    /// Standard base64 of the PDF.
    pub pdf: &'a str,
    /// Recipient address.
    pub email: &'a str,
}

/// `{ message } | { error }` reply of the mutation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ApiReply {
    /// Confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Rejection text.
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiReply {
    /// An `error` field is a rejection; otherwise the message (possibly empty).
    pub fn into_result(self) -> GatewayResult<String> {
        match self.error {
            Some(error) => Err(GatewayError::Rejected(error)),
            None => Ok(self.message.unwrap_or_default()),
        }
    }
}

/// Envelope of the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListEnvelope {
    /// Transaction records.
    #[serde(default, alias = "respuesta")]
    pub transactions: Option<Vec<Value>>,
    /// Rejection text.
    #[serde(default)]
    pub error: Option<String>,
}

impl ListEnvelope {
    /// Extracts the records. A missing list is an empty ledger; non-object
    /// entries become empty records.
    pub fn into_records(self) -> GatewayResult<Vec<RawRecord>> {
        if let Some(error) = self.error {
            return Err(GatewayError::Rejected(error));
        }
        Ok(self
            .transactions
            .unwrap_or_default()
            .into_iter()
            .map(RawRecord::from)
            .collect())
    }
}

/// Parses a reply body, tolerating an empty body as an empty reply.
pub fn parse_reply(body: &str) -> GatewayResult<ApiReply> {
    if body.trim().is_empty() {
        return Ok(ApiReply::default());
    }
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Parses a listing body.
pub fn parse_list(body: &str) -> GatewayResult<Vec<RawRecord>> {
    serde_json::from_str::<ListEnvelope>(body)
        .map_err(|e| GatewayError::Decode(e.to_string()))?
        .into_records()
}
