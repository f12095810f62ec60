//! Plain-text rendering of the statement table.

use std::fmt::Write;

use statement_core::ledger::BalanceStanding;
use statement_core::statement::{StatementPeriod, StatementTable};
use statement_session::MemberProfile;

/// Renders the member header, the table and the summary.
pub fn session_view(
    member: Option<&MemberProfile>,
    period: StatementPeriod,
    table: Option<&StatementTable>,
) -> String {
    let mut out = String::new();
    let Some(member) = member else {
        out.push_str("No member selected.\n");
        return out;
    };
    let _ = writeln!(
        out,
        "Member: {} ({})  Period: {}",
        member.display_name(),
        member.key,
        period.label()
    );

    let Some(table) = table else {
        out.push_str("Ledger not loaded.\n");
        return out;
    };
    let _ = writeln!(out, "Order: date {}", table.direction.as_str());
    if table.rows.is_empty() {
        out.push_str("No transactions.\n");
    } else {
        out.push_str(&render_table(table));
    }

    let standing = match table.summary.standing {
        BalanceStanding::Owed => "owed",
        BalanceStanding::Credit => "credit",
    };
    let _ = writeln!(out, "Total Payments: {}", table.summary.total_payments_display);
    let _ = writeln!(
        out,
        "Final Balance: {} ({standing})",
        table.summary.final_balance_display
    );
    out
}

fn render_table(table: &StatementTable) -> String {
    let mut header = vec!["#"];
    header.extend(StatementTable::HEADERS);
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let actions = row
                .actions
                .iter()
                .map(|a| a.action_id().as_str())
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                (idx + 1).to_string(),
                row.receipt.clone(),
                row.date.clone(),
                row.kind.clone(),
                row.detail.clone(),
                row.amount.clone(),
                row.balance.clone(),
                actions,
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = header.iter().map(ToString::to_string).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Amount and balance columns are right-aligned.
fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if col == 5 || col == 6 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use statement_core::ledger::{SortDirection, Transaction, TransactionKind, compute_ledger};
    use statement_core::statement::TableProjector;
    use statement_shared::types::{MemberKey, RecordId};

    #[test]
    fn test_view_without_member() {
        assert_eq!(
            session_view(None, StatementPeriod::default(), None),
            "No member selected.\n"
        );
    }

    #[test]
    fn test_view_renders_rows_and_summary() {
        let txs = vec![Transaction {
            kind: TransactionKind::Debt {
                record_id: Some(RecordId::new("3")),
            },
            amount: Decimal::ONE_HUNDRED,
            date: None,
            detail: "Cuota".to_string(),
            receipt_number: None,
        }];
        let table = TableProjector::new("%m/%d/%Y")
            .project(&compute_ledger(&txs, SortDirection::Ascending), SortDirection::Ascending);
        let member = MemberProfile::new(MemberKey::new("M-1")).with_name("Jane");

        let view = session_view(Some(&member), StatementPeriod::default(), Some(&table));
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines[0], "Member: JANE (M-1)  Period: N/A to N/A");
        assert_eq!(lines[1], "Order: date asc");
        assert!(lines[2].starts_with("#  Receipt  Date"));
        assert!(lines[4].starts_with("1  N/A"));
        assert!(lines[4].contains("100.00  delete-tx"));
        assert_eq!(lines[5], "Total Payments: -$0.00");
        assert_eq!(lines[6], "Final Balance: $100.00 (owed)");
    }
}
