//! Money formatting with fixed two-decimal display.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; only display goes through here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with exactly two decimals, rounding half away from zero.
///
/// A value that rounds to zero is printed without a sign.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{rounded:.2}")
}

/// Formats a currency figure: `$60.00`, `$-20.00`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Formats a magnitude as a credit figure: `-$40.00`.
#[must_use]
pub fn format_credit(amount: Decimal) -> String {
    format!("-${}", format_amount(amount.abs()))
}
