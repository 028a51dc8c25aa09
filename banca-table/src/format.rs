//! Value formatting for table cells.
//!
//! Every function here is total: any JSON value (or a missing one) maps to
//! some display string. Column type dispatch is a plain `match` on
//! [`ColumnKind`].

use std::borrow::Cow;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde_json::Number;
use serde_json::Value;

use crate::config::Column;
use crate::config::ColumnKind;

/// Text shown for missing values.
pub const MISSING: &str = "N/A";

/// Currency used when a currency column has no `format`.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Text shown for timestamps that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const TRUE_TEXT: &str = "Sí";
const FALSE_TEXT: &str = "No";

// =============================================================================
// Public API
// =============================================================================

/// Format a raw cell value for display according to its column.
///
/// # Example
///
/// ```
/// use banca_table::Column;
/// use banca_table::format::format_value;
/// use serde_json::json;
///
/// let saldo = Column::new("saldoActual", "Saldo").currency("USD");
/// assert_eq!(format_value(Some(&json!(1234.5)), &saldo), "$1,234.50");
/// assert_eq!(format_value(None, &saldo), "N/A");
/// ```
pub fn format_value(value: Option<&Value>, column: &Column) -> String {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return MISSING.to_string();
    };

    match column.kind {
        ColumnKind::Date => format_date(value),
        ColumnKind::Currency => {
            let code = column.format.as_deref().unwrap_or(DEFAULT_CURRENCY);
            match parse_amount(value) {
                Some(amount) => format_currency(amount, code),
                None => display_string(value),
            }
        }
        ColumnKind::Boolean => {
            if is_truthy(Some(value)) {
                TRUE_TEXT.to_string()
            } else {
                FALSE_TEXT.to_string()
            }
        }
        ColumnKind::Text | ColumnKind::Badge => display_string(value),
    }
}

/// Style class for a badge cell, or `""` if the column has no badge config.
pub fn badge_class<'c>(value: Option<&Value>, column: &'c Column) -> &'c str {
    match &column.badge_config {
        Some(badge) if is_truthy(value) => &badge.true_class,
        Some(badge) => &badge.false_class,
        None => "",
    }
}

/// Label for a badge cell.
///
/// Without a badge config this falls back to the raw string form of the
/// value, or [`MISSING`] when there is no value.
pub fn badge_label(value: Option<&Value>, column: &Column) -> String {
    match &column.badge_config {
        Some(badge) if is_truthy(value) => badge.true_label.clone(),
        Some(badge) => badge.false_label.clone(),
        None => value
            .filter(|v| !v.is_null())
            .map(display_string)
            .unwrap_or_else(|| MISSING.to_string()),
    }
}

/// Truthiness of a JSON value: `false`, `0`, `""` and null are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// The plain string form of a value, as used by text cells and search.
///
/// Strings are returned verbatim, integral floats drop their fraction,
/// arrays are comma-joined and objects render as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

// =============================================================================
// Numbers & currency
// =============================================================================

fn number_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Parse a JSON number or numeric string into a decimal amount.
fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Prefix and minor digits for a currency code.
fn currency_symbol(code: &str) -> (Cow<'static, str>, u32) {
    match code.to_ascii_uppercase().as_str() {
        "USD" => (Cow::Borrowed("$"), 2),
        "EUR" => (Cow::Borrowed("€"), 2),
        "GBP" => (Cow::Borrowed("£"), 2),
        "JPY" => (Cow::Borrowed("¥"), 0),
        other => (Cow::Owned(format!("{} ", other)), 2),
    }
}

/// Render an amount with the en-US currency convention.
fn format_currency(amount: Decimal, code: &str) -> String {
    let (prefix, digits) = currency_symbol(code);

    let mut rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(digits);

    let text = rounded.to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + prefix.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&prefix);
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Insert `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Dates
// =============================================================================

/// Render a timestamp as `M/D/YYYY`.
fn format_date(value: &Value) -> String {
    match parse_date(value) {
        Some(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse a timestamp.
///
/// Accepts RFC 3339, ISO local date-times, ISO dates and epoch
/// milliseconds. Zoned timestamps keep their own calendar date.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.date_naive());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt.date());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt.date());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}
