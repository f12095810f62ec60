//! Line parsing for the terminal.

use std::str::FromStr;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use statement_core::statement::{ActionId, StatementPeriod, StatementTable};
use statement_session::{Command, MemberProfile};
use statement_shared::types::{MemberKey, ReceiptNumber, RecordId};
use statement_shared::{AppError, AppResult};

/// One terminal line. The first word names the command.
#[derive(Debug, Parser)]
#[command(name = "statement", multicall = true, help_template = "Commands:\n{subcommands}")]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

/// Commands accepted at the prompt.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum ReplCommand {
    /// Select a member and load the ledger
    Member {
        /// Member key
        key: MemberKey,
        /// Recipient address for `send`
        email: Option<String>,
        /// Full name shown on the statement
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Set the period (YYYY-MM-DD, - for open)
    Period {
        /// First day, or -
        start: DateBound,
        /// Last day, or -
        end: DateBound,
    },
    /// Fetch the ledger again
    Reload,
    /// Flip the date order
    Sort,
    /// Print the table and summary
    Show,
    /// Generate the statement PDF
    Export,
    /// Email the last generated PDF
    Send,
    /// Delete a debt
    Delete {
        /// Debt record id
        record_id: RecordId,
    },
    /// Void a payment receipt
    Void {
        /// Receipt number
        receipt: ReceiptNumber,
        /// Cancellation reason
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        reason: Vec<String>,
    },
    /// Show a receipt document location
    Receipt {
        /// Receipt number
        receipt: ReceiptNumber,
    },
    /// Run a row action (delete-tx, void-receipt, view-receipt-pdf)
    Act {
        /// Row number, from 1
        row: usize,
        /// Action offered on the row
        action: ActionId,
        /// Reason, for void-receipt
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        reason: Vec<String>,
    },
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// A period bound: a date, or open when written as `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBound(Option<NaiveDate>);

impl FromStr for DateBound {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self(None));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| Self(Some(d)))
    }
}

/// What a line asks the terminal to do.
#[derive(Debug, PartialEq, Eq)]
pub enum LineAction {
    Member(MemberProfile),
    Period(StatementPeriod),
    Dispatch(Command),
    Act {
        row: usize,
        action: ActionId,
        reason: Option<String>,
    },
    Show,
    Quit,
}

impl From<ReplCommand> for LineAction {
    fn from(command: ReplCommand) -> Self {
        match command {
            ReplCommand::Member { key, email, name } => {
                let mut profile = MemberProfile::new(key);
                if let Some(email) = email {
                    profile = profile.with_email(email);
                }
                if let Some(name) = joined(&name) {
                    profile = profile.with_name(name);
                }
                Self::Member(profile)
            }
            ReplCommand::Period { start, end } => Self::Period(StatementPeriod::new(start.0, end.0)),
            ReplCommand::Reload => Self::Dispatch(Command::Reload),
            ReplCommand::Sort => Self::Dispatch(Command::Sort),
            ReplCommand::Show => Self::Show,
            ReplCommand::Export => Self::Dispatch(Command::GeneratePdf),
            ReplCommand::Send => Self::Dispatch(Command::SendPdf),
            ReplCommand::Delete { record_id } => Self::Dispatch(Command::DeleteTx(record_id)),
            ReplCommand::Void { receipt, reason } => Self::Dispatch(Command::VoidReceipt {
                receipt,
                reason: joined(&reason),
            }),
            ReplCommand::Receipt { receipt } => Self::Dispatch(Command::ViewReceiptPdf(receipt)),
            ReplCommand::Act { row, action, reason } => Self::Act {
                row,
                action,
                reason: joined(&reason),
            },
            ReplCommand::Quit => Self::Quit,
        }
    }
}

/// Command listing printed at startup and by `help`.
pub fn help() -> String {
    ReplLine::command().render_help().to_string()
}

/// Parses a line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns the clap error for unknown commands, bad arguments, and `help`.
pub fn parse_line(line: &str) -> Result<Option<LineAction>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let parsed = ReplLine::try_parse_from(line.split_whitespace())?;
    Ok(Some(parsed.command.into()))
}

/// Resolves a row action from the rendered table. Rows are numbered from 1.
pub fn row_command(
    table: Option<&StatementTable>,
    row: usize,
    action: ActionId,
    reason: Option<String>,
) -> AppResult<Command> {
    let table = table.ok_or_else(|| AppError::Precondition("Select a member first".to_string()))?;
    let entry = row
        .checked_sub(1)
        .and_then(|idx| table.rows.get(idx))
        .ok_or_else(|| AppError::NotFound(format!("Row {row}")))?;
    let found = entry
        .actions
        .iter()
        .find(|a| a.action_id() == action)
        .ok_or_else(|| AppError::Validation(format!("Row {row} does not offer {action}")))?;
    Ok(Command::from_row_action(found.clone(), reason))
}

fn joined(words: &[String]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}
