//! Session state and operations.

use statement_core::assets::{AssetStore, acquire_template};
use statement_core::export::{ExportError, ExportProjector, ExportRequest, StatementArtifact};
use statement_core::ledger::{SortDirection, Transaction, compute_ledger, normalize};
use statement_core::statement::{StatementPeriod, StatementTable, TableProjector};
use statement_gateway::StatementGateway;
use statement_shared::ExportConfig;
use statement_shared::types::{ReceiptNumber, RecordId};
use tracing::{info, warn};

use crate::command::Command;
use crate::error::{SessionError, SessionResult};
use crate::member::MemberProfile;
use crate::notice::Notice;

/// One user's statement workspace.
///
/// Reset points:
/// - selecting a member resets the direction to ascending, clears the
///   ledger, table and export, then loads;
/// - a reload replaces the ledger only when the fetch succeeds;
/// - an export replaces the previous artifact only when it succeeds.
pub struct StatementSession<G> {
    gateway: G,
    assets: Option<AssetStore>,
    template_key: Option<String>,
    table_projector: TableProjector,
    export_projector: ExportProjector,
    member: Option<MemberProfile>,
    period: StatementPeriod,
    transactions: Vec<Transaction>,
    direction: SortDirection,
    table: Option<StatementTable>,
    artifact: Option<StatementArtifact>,
}

impl<G: StatementGateway> StatementSession<G> {
    /// Creates an empty session.
    pub fn new(gateway: G, export: &ExportConfig) -> Self {
        Self {
            gateway,
            assets: None,
            template_key: export.template_key.clone(),
            table_projector: TableProjector::new(export.date_format.clone()),
            export_projector: ExportProjector::new(export.date_format.clone()),
            member: None,
            period: StatementPeriod::default(),
            transactions: Vec::new(),
            direction: SortDirection::Ascending,
            table: None,
            artifact: None,
        }
    }

    /// Uses an asset store for the export background template.
    #[must_use]
    pub fn with_assets(mut self, assets: AssetStore) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Selected member.
    pub const fn member(&self) -> Option<&MemberProfile> {
        self.member.as_ref()
    }

    /// Current period.
    pub const fn period(&self) -> StatementPeriod {
        self.period
    }

    /// Current sort direction.
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Last fetched ledger, in fetch order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Last rendered table.
    pub const fn table(&self) -> Option<&StatementTable> {
        self.table.as_ref()
    }

    /// Last produced export.
    pub const fn artifact(&self) -> Option<&StatementArtifact> {
        self.artifact.as_ref()
    }

    /// Selects a member and loads their ledger.
    pub async fn select_member(&mut self, member: MemberProfile) -> Notice {
        info!(member = %member.key, "Member selected");
        self.member = Some(member);
        self.direction = SortDirection::Ascending;
        self.transactions.clear();
        self.table = None;
        self.artifact = None;
        self.reload().await
    }

    /// Changes the period and reloads when a member is selected.
    pub async fn set_period(&mut self, period: StatementPeriod) -> Notice {
        self.period = period;
        if self.member.is_none() {
            return Notice::info(format!("Period set to {}", period.label()));
        }
        self.reload().await
    }

    /// Fetches the ledger again for the current member and period.
    pub async fn reload(&mut self) -> Notice {
        match self.try_reload().await {
            Ok(count) => Notice::info(format!("Loaded {count} transactions")),
            Err(err) => refused("reload", err),
        }
    }

    /// Flips the date order and re-renders the table without refetching.
    pub fn toggle_sort(&mut self) -> Notice {
        self.direction = self.direction.toggled();
        self.render();
        Notice::info(format!("Sorted by date, {}", self.direction.as_str()))
    }

    /// Produces the statement document from the current ledger and direction.
    pub async fn generate_export(&mut self) -> Notice {
        match self.try_generate_export().await {
            Ok(pages) => Notice::info(format!("Statement generated ({pages} pages)")),
            Err(err) => refused("generate-pdf", err),
        }
    }

    /// Deletes a debt record, then reloads.
    pub async fn delete_transaction(&mut self, record_id: &RecordId) -> Notice {
        let outcome = match self.require_member() {
            Ok(member) => self
                .gateway
                .delete_transaction(&member.key, record_id)
                .await
                .map_err(SessionError::from),
            Err(err) => Err(err),
        };
        self.after_mutation("delete-tx", outcome, "Transaction deleted").await
    }

    /// Voids a payment receipt, then reloads. An empty reason aborts.
    pub async fn void_receipt(&mut self, receipt: &ReceiptNumber, reason: Option<&str>) -> Notice {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        let outcome = match (self.require_member(), reason) {
            (Err(err), _) => Err(err),
            (Ok(_), None) => Err(SessionError::MissingReason),
            (Ok(member), Some(reason)) => self
                .gateway
                .void_receipt(&member.key, receipt, reason)
                .await
                .map_err(SessionError::from),
        };
        self.after_mutation("void-receipt", outcome, "Receipt voided").await
    }

    /// Location of a payment's receipt document.
    pub fn receipt_location(&self, receipt: &ReceiptNumber) -> Notice {
        Notice::info(self.gateway.receipt_location(receipt))
    }

    /// Emails the last export to the member.
    pub async fn send_export(&mut self) -> Notice {
        match self.try_send_export().await {
            Ok(message) if message.is_empty() => Notice::info("Statement sent"),
            Ok(message) => Notice::info(message),
            Err(err) => refused("send-pdf", err),
        }
    }

    /// Runs a command.
    pub async fn dispatch(&mut self, command: Command) -> Notice {
        match command {
            Command::Reload => self.reload().await,
            Command::Sort => self.toggle_sort(),
            Command::GeneratePdf => self.generate_export().await,
            Command::SendPdf => self.send_export().await,
            Command::DeleteTx(record_id) => self.delete_transaction(&record_id).await,
            Command::VoidReceipt { receipt, reason } => {
                self.void_receipt(&receipt, reason.as_deref()).await
            }
            Command::ViewReceiptPdf(receipt) => self.receipt_location(&receipt),
        }
    }

    fn require_member(&self) -> SessionResult<&MemberProfile> {
        self.member.as_ref().ok_or(SessionError::NoMember)
    }

    async fn try_reload(&mut self) -> SessionResult<usize> {
        let key = self.require_member()?.key.clone();
        let records = self
            .gateway
            .list_transactions(&key, self.period.start, self.period.end)
            .await?;

        self.transactions = normalize(&records);
        self.render();
        info!(
            member = %key,
            count = self.transactions.len(),
            "Ledger loaded"
        );
        Ok(self.transactions.len())
    }

    fn render(&mut self) {
        if self.member.is_none() {
            return;
        }
        let computation = compute_ledger(&self.transactions, self.direction);
        self.table = Some(self.table_projector.project(&computation, self.direction));
    }

    async fn try_generate_export(&mut self) -> SessionResult<usize> {
        let member = self.require_member()?;
        let member_name = member.display_name();
        let computation = compute_ledger(&self.transactions, self.direction);
        if computation.is_empty() {
            return Err(ExportError::EmptyLedger.into());
        }

        let template = acquire_template(self.assets.as_ref(), self.template_key.as_deref()).await;
        let document = self.export_projector.project(
            &ExportRequest {
                member_name: &member_name,
                period: self.period,
                computation: &computation,
            },
            template,
        )?;
        let artifact = StatementArtifact::from_document(&document, &member_name);
        let pages = artifact.page_count();

        info!(member = %member.key, pages, bytes = artifact.bytes().len(), "Statement generated");
        self.artifact = Some(artifact);
        Ok(pages)
    }

    async fn try_send_export(&self) -> SessionResult<String> {
        let artifact = self.artifact.as_ref().ok_or(SessionError::NoExport)?;
        let member = self.require_member()?;
        let recipient = member.recipient().ok_or(SessionError::NoRecipient)?;

        let message = self
            .gateway
            .send_statement_document(&artifact.to_base64(), recipient)
            .await?;
        info!(member = %member.key, "Statement sent");
        Ok(message)
    }

    async fn after_mutation(
        &mut self,
        action: &str,
        outcome: SessionResult<String>,
        fallback: &str,
    ) -> Notice {
        let message = match outcome {
            Ok(message) if message.is_empty() => fallback.to_string(),
            Ok(message) => message,
            Err(err) => return refused(action, err),
        };
        match self.try_reload().await {
            Ok(_) => Notice::info(message),
            Err(err) => Notice::warning(format!("{message}; reload failed: {err}")),
        }
    }
}

fn refused(action: &str, err: SessionError) -> Notice {
    warn!(action, code = err.error_code(), error = %err, "Action refused");
    Notice::from(err)
}
