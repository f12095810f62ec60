//! Coercion of raw collaborator records into [`Transaction`] values.
//!
//! Malformed input never fails: bad amounts become zero, bad dates become
//! unknown, missing text becomes empty.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use statement_shared::types::{ReceiptNumber, RecordId};

use super::transaction::{RawRecord, Transaction, TransactionKind};

/// Wire field holding the transaction kind.
pub const FIELD_KIND: &str = "Tipo";
/// Wire field holding the amount.
pub const FIELD_AMOUNT: &str = "Monto";
/// Wire field holding the calendar date.
pub const FIELD_DATE: &str = "Fecha";
/// Wire field holding the receipt number.
pub const FIELD_RECEIPT: &str = "NumeroRecibo";
/// Wire field holding the voided flag.
pub const FIELD_VOIDED: &str = "Anulado";
/// Wire field holding the debt record id.
pub const FIELD_RECORD_ID: &str = "historial_id";
/// Detail fields, in fallback order.
pub const DETAIL_FIELDS: [&str; 3] = ["Detalle", "Descripcion", "Concepto"];

/// Normalizes a sequence of raw records, preserving order.
#[must_use]
pub fn normalize(records: &[RawRecord]) -> Vec<Transaction> {
    records.iter().map(normalize_record).collect()
}

/// Normalizes a single raw record.
#[must_use]
pub fn normalize_record(record: &RawRecord) -> Transaction {
    let kind_field = record.field(FIELD_KIND);
    let kind = if kind_is(kind_field, &["deuda", "debt"]) {
        TransactionKind::Debt {
            record_id: record.field(FIELD_RECORD_ID).and_then(key_text).map(RecordId::new),
        }
    } else {
        TransactionKind::Payment {
            voided: record.field(FIELD_VOIDED).is_some_and(is_truthy),
            recognized: kind_is(kind_field, &["pago", "payment"]),
        }
    };

    Transaction {
        kind,
        amount: record.field(FIELD_AMOUNT).map_or(Decimal::ZERO, parse_amount),
        date: record.field(FIELD_DATE).and_then(parse_date),
        detail: resolve_detail(record),
        receipt_number: record.field(FIELD_RECEIPT).and_then(key_text).map(ReceiptNumber::new),
    }
}

fn kind_is(value: Option<&Value>, names: &[&str]) -> bool {
    value.and_then(Value::as_str).is_some_and(|kind| {
        let kind = kind.trim();
        names.iter().any(|name| kind.eq_ignore_ascii_case(name))
    })
}

/// Parses an amount with leading-numeric-prefix semantics.
///
/// `"12.50 USD"` is 12.50, `"abc"` is zero. The magnitude is returned.
#[must_use]
pub fn parse_amount(value: &Value) -> Decimal {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Decimal::ZERO,
    };
    parse_decimal_prefix(&text).map_or(Decimal::ZERO, |d| d.abs())
}

fn parse_decimal_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        frac_digits = &bytes[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent: Option<&[u8]> = None;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let exp_start = pos + 1;
        let mut end = exp_start;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > digits_start {
            exponent = Some(&bytes[exp_start..end]);
        }
    }

    let mut mantissa = String::with_capacity(int_digits.len() + frac_digits.len() + 3);
    if negative {
        mantissa.push('-');
    }
    if int_digits.is_empty() {
        mantissa.push('0');
    } else {
        mantissa.push_str(std::str::from_utf8(int_digits).ok()?);
    }
    if !frac_digits.is_empty() {
        mantissa.push('.');
        mantissa.push_str(std::str::from_utf8(frac_digits).ok()?);
    }

    match exponent {
        Some(exp) => {
            let exp = std::str::from_utf8(exp).ok()?.trim_start_matches('+');
            Decimal::from_scientific(&format!("{mantissa}e{exp}")).ok()
        }
        None => Decimal::from_str(&mantissa).ok(),
    }
}

/// Parses a `YYYY-MM-DD` date, ignoring a trailing time part.
#[must_use]
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    let (day, rest) = match text.char_indices().nth(10) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    };
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Resolves the detail text from the first non-empty fallback field.
#[must_use]
pub fn resolve_detail(record: &RawRecord) -> String {
    DETAIL_FIELDS
        .iter()
        .filter_map(|name| record.field(name))
        .find_map(display_text)
        .unwrap_or_default()
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if is_nonzero(n) => Some(n.to_string()),
        _ => None,
    }
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) if is_nonzero(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_nonzero(n: &serde_json::Number) -> bool {
    parse_decimal_prefix(&n.to_string()).is_some_and(|d| !d.is_zero())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => is_nonzero(n),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && !s.eq_ignore_ascii_case("false") && s != "0"
        }
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
