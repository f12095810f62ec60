//! Session behavior against a mocked collaborator.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::{Sequence, mock};
use rust_decimal_macros::dec;
use serde_json::json;
use statement_core::ledger::{RawRecord, SortDirection};
use statement_gateway::{GatewayError, GatewayResult, StatementGateway};
use statement_shared::ExportConfig;
use statement_shared::types::{MemberKey, ReceiptNumber, RecordId};

use crate::{Command, MemberProfile, NoticeLevel, StatementSession};

mock! {
    pub Gateway {}

    #[async_trait]
    impl StatementGateway for Gateway {
        async fn list_transactions(
            &self,
            member: &MemberKey,
            start: Option<NaiveDate>,
            end: Option<NaiveDate>,
        ) -> GatewayResult<Vec<RawRecord>>;
        async fn delete_transaction(&self, member: &MemberKey, record_id: &RecordId) -> GatewayResult<String>;
        async fn void_receipt(
            &self,
            member: &MemberKey,
            receipt: &ReceiptNumber,
            reason: &str,
        ) -> GatewayResult<String>;
        async fn send_statement_document(&self, pdf_base64: &str, email: &str) -> GatewayResult<String>;
        fn receipt_location(&self, receipt: &ReceiptNumber) -> String;
    }
}

fn records() -> Vec<RawRecord> {
    vec![
        json!({"Tipo": "Deuda", "Monto": "100", "Fecha": "2024-01-10", "Detalle": "Cuota", "historial_id": 5}),
        json!({"Tipo": "Pago", "Monto": "40", "Fecha": "2024-01-20", "NumeroRecibo": "R-1"}),
    ]
    .into_iter()
    .map(RawRecord::from)
    .collect()
}

fn after_delete() -> Vec<RawRecord> {
    records().split_off(1)
}

fn export_config() -> ExportConfig {
    ExportConfig {
        template_key: None,
        ..ExportConfig::default()
    }
}

fn member() -> MemberProfile {
    MemberProfile::new(MemberKey::new("M-1"))
        .with_name("Jane Doe")
        .with_email("jane@club.test")
}

fn session(gateway: MockGateway) -> StatementSession<MockGateway> {
    StatementSession::new(gateway, &export_config())
}

#[tokio::test]
async fn test_select_member_loads_ascending_table() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .withf(|member, start, end| member.as_str() == "M-1" && start.is_none() && end.is_none())
        .times(1)
        .returning(|_, _, _| Ok(records()));
    let mut session = session(gateway);

    let notice = session.select_member(member()).await;
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Loaded 2 transactions");

    let table = session.table().unwrap();
    assert_eq!(table.direction, SortDirection::Ascending);
    let balances: Vec<&str> = table.rows.iter().map(|r| r.balance.as_str()).collect();
    assert_eq!(balances, ["100.00", "60.00"]);
    assert_eq!(table.summary.final_balance, dec!(60));
}

#[tokio::test]
async fn test_toggle_sort_rerenders_without_refetch() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.toggle_sort();
    assert!(notice.is_info());
    assert_eq!(session.direction(), SortDirection::Descending);

    let table = session.table().unwrap();
    assert_eq!(table.rows[0].receipt, "R-1");
    assert_eq!(table.rows[0].balance, "-40.00");
    assert_eq!(table.summary.final_balance, dec!(60));
}

#[tokio::test]
async fn test_selecting_member_resets_direction_and_export() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(2)
        .returning(|_, _, _| Ok(records()));
    let mut session = session(gateway);
    session.select_member(member()).await;
    session.toggle_sort();
    assert!(session.generate_export().await.is_info());
    assert!(session.artifact().is_some());

    session
        .select_member(MemberProfile::new(MemberKey::new("M-2")))
        .await;
    assert_eq!(session.direction(), SortDirection::Ascending);
    assert!(session.artifact().is_none());
}

#[tokio::test]
async fn test_failed_reload_keeps_last_ledger() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Err(GatewayError::Transport("connection refused".into())));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.reload().await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("connection refused"));
    assert_eq!(session.transactions().len(), 2);
    assert_eq!(session.table().unwrap().rows.len(), 2);
}

#[tokio::test]
async fn test_set_period_forwards_bounds() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1);
    let end = NaiveDate::from_ymd_opt(2024, 1, 31);
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .withf(move |_, s, e| *s == start && *e == end)
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    let mut session = session(gateway);

    let notice = session
        .set_period(statement_core::statement::StatementPeriod::new(start, end))
        .await;
    assert_eq!(notice.message, "Period set to 2024-01-01 to 2024-01-31");

    session.select_member(member()).await;
    assert_eq!(session.table().unwrap().rows.len(), 0);
}

#[tokio::test]
async fn test_delete_success_reloads() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_delete_transaction()
        .withf(|member, id| member.as_str() == "M-1" && id.as_str() == "5")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok("Transacción eliminada".to_string()));
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(after_delete()));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.dispatch(Command::DeleteTx(RecordId::new("5"))).await;
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Transacción eliminada");
    assert_eq!(session.transactions().len(), 1);
}

#[tokio::test]
async fn test_delete_rejection_leaves_ledger() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_delete_transaction()
        .times(1)
        .returning(|_, _| Err(GatewayError::Rejected("No se puede eliminar".into())));
    let mut session = session(gateway);
    session.select_member(member()).await;
    let before = session.table().cloned();

    let notice = session.delete_transaction(&RecordId::new("5")).await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "No se puede eliminar");
    assert_eq!(session.table().cloned(), before);
}

#[tokio::test]
async fn test_void_requires_reason() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    gateway.expect_void_receipt().never();
    let mut session = session(gateway);
    session.select_member(member()).await;

    for reason in [None, Some(""), Some("   ")] {
        let notice = session
            .dispatch(Command::VoidReceipt {
                receipt: ReceiptNumber::new("R-1"),
                reason: reason.map(String::from),
            })
            .await;
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "A cancellation reason is required");
    }
}

#[tokio::test]
async fn test_void_success_reloads() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(2)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_void_receipt()
        .withf(|_, receipt, reason| receipt.as_str() == "R-1" && reason == "duplicado")
        .times(1)
        .returning(|_, _, _| Ok(String::new()));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session
        .void_receipt(&ReceiptNumber::new("R-1"), Some(" duplicado "))
        .await;
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Receipt voided");
}

#[tokio::test]
async fn test_mutation_success_with_failed_reload_warns() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_delete_transaction()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok("Eliminado".to_string()));
    gateway
        .expect_list_transactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Err(GatewayError::Decode("bad json".into())));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.delete_transaction(&RecordId::new("5")).await;
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.starts_with("Eliminado; reload failed"));
    assert_eq!(session.transactions().len(), 2);
}

#[tokio::test]
async fn test_export_on_empty_ledger_produces_nothing() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.dispatch(Command::GeneratePdf).await;
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "No transactions to export");
    assert!(session.artifact().is_none());
}

#[tokio::test]
async fn test_send_without_export_fails_fast() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    gateway.expect_send_statement_document().never();
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.dispatch(Command::SendPdf).await;
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "Generate the statement before sending it");
}

#[tokio::test]
async fn test_send_without_recipient_fails_fast() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    gateway.expect_send_statement_document().never();
    let mut session = session(gateway);
    session
        .select_member(MemberProfile::new(MemberKey::new("M-1")).with_email("N/A"))
        .await;
    session.generate_export().await;

    let notice = session.send_export().await;
    assert_eq!(notice.message, "The member has no email address");
}

#[tokio::test]
async fn test_send_transmits_current_export() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list_transactions()
        .times(1)
        .returning(|_, _, _| Ok(records()));
    gateway
        .expect_send_statement_document()
        .withf(|pdf, email| pdf.starts_with("JVBERi") && email == "jane@club.test")
        .times(1)
        .returning(|_, _| Ok("Correo enviado".to_string()));
    let mut session = session(gateway);
    session.select_member(member()).await;

    let notice = session.generate_export().await;
    assert_eq!(notice.message, "Statement generated (1 pages)");
    let artifact = session.artifact().unwrap();
    assert_eq!(artifact.file_name(), "statement_JANE_DOE.pdf");

    let notice = session.send_export().await;
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Correo enviado");
}

#[tokio::test]
async fn test_actions_without_member() {
    let mut gateway = MockGateway::new();
    gateway.expect_list_transactions().never();
    gateway.expect_delete_transaction().never();
    let mut session = session(gateway);

    for command in [
        Command::Reload,
        Command::GeneratePdf,
        Command::DeleteTx(RecordId::new("1")),
    ] {
        let notice = session.dispatch(command).await;
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Select a member first");
    }
    assert!(session.toggle_sort().is_info());
    assert!(session.table().is_none());
}

#[tokio::test]
async fn test_view_receipt_returns_location() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_receipt_location()
        .returning(|receipt| format!("http://ledger.test/static/pdf/recibo_{receipt}.pdf"));
    let mut session = session(gateway);

    let notice = session
        .dispatch(Command::ViewReceiptPdf(ReceiptNumber::new("R-1")))
        .await;
    assert_eq!(notice.message, "http://ledger.test/static/pdf/recibo_R-1.pdf");
}
