//! Property-based tests for ledger ordering and accumulation.
//!
//! - Totals are independent of sort direction
//! - The last running balance equals the final balance
//! - Sorting is stable for equal dates

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::compute_ledger;
use super::sort::{SortDirection, sort_by_date};
use super::transaction::{Transaction, TransactionKind};

/// Strategy for non-negative amounts (0.00 to 10,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for dates drawn from a small window so that ties are common,
/// with occasional unknown dates.
fn date_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![
        1 => Just(None),
        6 => (1u32..=10).prop_map(|day| NaiveDate::from_ymd_opt(2024, 5, day)),
    ]
}

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Debt { record_id: None }),
        (any::<bool>(), any::<bool>())
            .prop_map(|(voided, recognized)| TransactionKind::Payment { voided, recognized }),
    ]
}

/// Strategy for a ledger; each detail carries the input position.
fn ledger_strategy(max_len: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((kind_strategy(), amount_strategy(), date_strategy()), 0..=max_len)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(idx, (kind, amount, date))| Transaction {
                    kind,
                    amount,
                    date,
                    detail: idx.to_string(),
                    receipt_number: None,
                })
                .collect()
        })
}

fn position(tx: &Transaction) -> usize {
    tx.detail.parse().unwrap()
}

fn direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Totals do not depend on the display direction.
    #[test]
    fn prop_totals_are_order_invariant(txs in ledger_strategy(40)) {
        let asc = compute_ledger(&txs, SortDirection::Ascending);
        let desc = compute_ledger(&txs, SortDirection::Descending);

        prop_assert_eq!(asc.summary, desc.summary);
        prop_assert_eq!(
            asc.summary.final_balance,
            asc.summary.total_debt - asc.summary.total_payments
        );
    }

    /// The final running balance equals the final balance in either direction.
    #[test]
    fn prop_last_running_balance_is_final_balance(
        txs in ledger_strategy(40),
        direction in direction_strategy(),
    ) {
        let result = compute_ledger(&txs, direction);
        let last = result.entries.last().map_or(Decimal::ZERO, |e| e.running_balance);
        prop_assert_eq!(last, result.summary.final_balance);
    }

    /// Each running balance is the previous one plus the row's signed amount.
    #[test]
    fn prop_running_balance_is_prefix_sum(
        txs in ledger_strategy(40),
        direction in direction_strategy(),
    ) {
        let result = compute_ledger(&txs, direction);
        let mut previous = Decimal::ZERO;
        for entry in &result.entries {
            prop_assert_eq!(entry.running_balance, previous + entry.signed_amount);
            prop_assert_eq!(entry.signed_amount.abs(), entry.transaction.amount);
            prop_assert_eq!(entry.signed_amount.is_sign_negative() && !entry.signed_amount.is_zero(),
                !entry.transaction.kind.is_debt() && !entry.transaction.amount.is_zero());
            previous = entry.running_balance;
        }
    }

    /// Equal dates keep input order, and dates are monotone in the direction.
    #[test]
    fn prop_sort_is_stable(
        txs in ledger_strategy(40),
        direction in direction_strategy(),
    ) {
        let sorted = sort_by_date(&txs, direction);
        prop_assert_eq!(sorted.len(), txs.len());

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match direction {
                SortDirection::Ascending => prop_assert!(a.date <= b.date),
                SortDirection::Descending => prop_assert!(a.date >= b.date),
            }
            if a.date == b.date {
                prop_assert!(position(a) < position(b));
            }
        }
    }

    /// Re-running the computation yields identical output.
    #[test]
    fn prop_computation_is_deterministic(
        txs in ledger_strategy(25),
        direction in direction_strategy(),
    ) {
        prop_assert_eq!(compute_ledger(&txs, direction), compute_ledger(&txs, direction));
    }
}
