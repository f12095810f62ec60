//! `reqwest` implementation of [`StatementGateway`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use statement_core::ledger::RawRecord;
use statement_shared::ApiConfig;
use statement_shared::types::{MemberKey, ReceiptNumber, RecordId};
use tracing::{debug, warn};

use crate::StatementGateway;
use crate::error::{GatewayError, GatewayResult};
use crate::wire::{
    DeleteTransactionRequest, ListQuery, SendStatementRequest, VoidReceiptRequest, parse_list,
    parse_reply,
};

/// HTTP client for the statement backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpGateway {
    /// Creates a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("statement/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Returns the API configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> GatewayResult<String> {
        let url = self.config.url(path);
        debug!(url = %url, "POST");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match parse_reply(&text) {
            Ok(reply) if reply.error.is_some() || status.is_success() => reply.into_result(),
            Err(err) if status.is_success() => Err(err),
            _ => {
                warn!(url = %url, status = %status, "Backend returned an error status");
                Err(GatewayError::Transport(format!("HTTP {status}")))
            }
        }
    }
}

#[async_trait]
impl StatementGateway for HttpGateway {
    async fn list_transactions(
        &self,
        member: &MemberKey,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> GatewayResult<Vec<RawRecord>> {
        let url = self.config.url(&self.config.list_path);
        let query = ListQuery::new(member.as_str(), start, end);
        debug!(url = %url, member = %member, "Listing transactions");

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match parse_list(&text) {
            Err(GatewayError::Decode(_)) if !status.is_success() => {
                warn!(url = %url, status = %status, "Backend returned an error status");
                Err(GatewayError::Transport(format!("HTTP {status}")))
            }
            Ok(_) if !status.is_success() => Err(GatewayError::Transport(format!("HTTP {status}"))),
            result => result,
        }
    }

    async fn delete_transaction(&self, member: &MemberKey, record_id: &RecordId) -> GatewayResult<String> {
        self.post(
            &self.config.delete_path,
            &DeleteTransactionRequest {
                key_miembro: member.as_str(),
                historial_id: record_id.as_str(),
            },
        )
        .await
    }

    async fn void_receipt(
        &self,
        member: &MemberKey,
        receipt: &ReceiptNumber,
        reason: &str,
    ) -> GatewayResult<String> {
        self.post(
            &self.config.void_path,
            &VoidReceiptRequest {
                key_miembro: member.as_str(),
                numero_recibo: receipt.as_str(),
                motivo_cancelacion: reason,
            },
        )
        .await
    }

    async fn send_statement_document(&self, pdf_base64: &str, email: &str) -> GatewayResult<String> {
        self.post(
            &self.config.send_path,
            &SendStatementRequest {
                pdf: pdf_base64,
                email,
            },
        )
        .await
    }

    fn receipt_location(&self, receipt: &ReceiptNumber) -> String {
        self.config.receipt_url(receipt.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            list_path: "/api/historial/listar_historial".to_string(),
            delete_path: "/eliminar_transaccion".to_string(),
            void_path: "/anular_recibo".to_string(),
            send_path: "/enviar_estado_cuenta".to_string(),
            receipt_path: "/static/pdf/recibo_{number}.pdf".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_receipt_location() {
        let gateway = HttpGateway::new(config("http://ledger.test/")).unwrap();
        assert_eq!(
            gateway.receipt_location(&ReceiptNumber::new("0042")),
            "http://ledger.test/static/pdf/recibo_0042.pdf"
        );
    }

    #[tokio::test]
    async fn test_list_transactions_sends_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/historial/listar_historial")
                    .query_param("key_miembro", "M-7")
                    .query_param("fecha_inicio", "2024-02-01")
                    .query_param("fecha_fin", "");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "respuesta": [{ "Tipo": "Deuda", "Monto": "10" }] }));
            })
            .await;
        let gateway = HttpGateway::new(config(&server.base_url())).unwrap();

        let records = gateway
            .list_transactions(&MemberKey::new("M-7"), NaiveDate::from_ymd_opt(2024, 2, 1), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_list_error_status_is_transport() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/historial/listar_historial");
                then.status(502).body("Bad Gateway");
            })
            .await;
        let gateway = HttpGateway::new(config(&server.base_url())).unwrap();

        let err = gateway
            .list_transactions(&MemberKey::new("M-7"), None, None)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, GatewayError::Transport(ref m) if m.contains("502")));
    }

    #[tokio::test]
    async fn test_void_receipt_posts_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/anular_recibo").json_body(json!({
                    "key_miembro": "M-7",
                    "numero_recibo": "R-3",
                    "motivo_cancelacion": "duplicado",
                }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "message": "Recibo anulado" }));
            })
            .await;
        let gateway = HttpGateway::new(config(&server.base_url())).unwrap();

        let message = gateway
            .void_receipt(&MemberKey::new("M-7"), &ReceiptNumber::new("R-3"), "duplicado")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(message, "Recibo anulado");
    }

    #[tokio::test]
    async fn test_rejection_surfaces_backend_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/eliminar_transaccion").json_body(json!({
                    "key_miembro": "M-7",
                    "historial_id": "99",
                }));
                then.status(400)
                    .header("content-type", "application/json")
                    .json_body(json!({ "error": "Transacción no encontrada" }));
            })
            .await;
        let gateway = HttpGateway::new(config(&server.base_url())).unwrap();

        let err = gateway
            .delete_transaction(&MemberKey::new("M-7"), &RecordId::new("99"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, GatewayError::Rejected(ref m) if m == "Transacción no encontrada"));
    }

    #[tokio::test]
    async fn test_error_status_without_body_is_transport() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/enviar_estado_cuenta")
                    .json_body(json!({ "pdf": "JVBERi0=", "email": "a@b.test" }));
                then.status(500);
            })
            .await;
        let gateway = HttpGateway::new(config(&server.base_url())).unwrap();

        let err = gateway.send_statement_document("JVBERi0=", "a@b.test").await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.error_code(), "GATEWAY_TRANSPORT");
    }
}
