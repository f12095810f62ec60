//! Stable date ordering of statement transactions.

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Row ordering by date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Earliest first.
    #[default]
    Ascending,
    /// Latest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Short name used in logs and the terminal header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Returns a new sequence ordered by date.
///
/// Unknown dates compare lowest: first when ascending, last when descending.
/// Equal dates keep their input order in both directions.
#[must_use]
pub fn sort_by_date(transactions: &[Transaction], direction: SortDirection) -> Vec<Transaction> {
    let mut ordered = transactions.to_vec();
    match direction {
        SortDirection::Ascending => ordered.sort_by(|a, b| a.date.cmp(&b.date)),
        SortDirection::Descending => ordered.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(detail: &str, date: Option<(i32, u32, u32)>) -> Transaction {
        Transaction {
            kind: TransactionKind::Payment { voided: false, recognized: true },
            amount: Decimal::ONE,
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            detail: detail.to_string(),
            receipt_number: None,
        }
    }

    fn details(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(|t| t.detail.as_str()).collect()
    }

    #[test]
    fn test_toggle() {
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }

    #[test]
    fn test_ascending_and_descending() {
        let input = vec![
            tx("b", Some((2024, 2, 1))),
            tx("a", Some((2024, 1, 1))),
            tx("c", Some((2024, 3, 1))),
        ];
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Ascending)),
            ["a", "b", "c"]
        );
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Descending)),
            ["c", "b", "a"]
        );
    }

    #[test]
    fn test_stable_for_equal_dates_in_both_directions() {
        let input = vec![
            tx("first", Some((2024, 1, 5))),
            tx("early", Some((2024, 1, 1))),
            tx("second", Some((2024, 1, 5))),
        ];
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Ascending)),
            ["early", "first", "second"]
        );
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Descending)),
            ["first", "second", "early"]
        );
    }

    #[test]
    fn test_unknown_dates_sort_lowest() {
        let input = vec![
            tx("dated", Some((2024, 1, 1))),
            tx("unknown-1", None),
            tx("unknown-2", None),
        ];
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Ascending)),
            ["unknown-1", "unknown-2", "dated"]
        );
        assert_eq!(
            details(&sort_by_date(&input, SortDirection::Descending)),
            ["dated", "unknown-1", "unknown-2"]
        );
    }

    #[test]
    fn test_input_untouched() {
        let input = vec![tx("b", Some((2024, 2, 1))), tx("a", Some((2024, 1, 1)))];
        let _ = sort_by_date(&input, SortDirection::Ascending);
        assert_eq!(details(&input), ["b", "a"]);
    }
}
