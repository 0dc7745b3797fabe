//! Tolerant coercion of raw attribute strings to typed values.
//!
//! CFDI attributes come in as plain text and are frequently absent or
//! sloppy. These helpers never fail: anything unparsable resolves to the
//! caller's default (amounts) or `None` (dates).

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal amount, falling back to `default` when the value is
/// absent, empty or malformed.
///
/// Input is expected to be a plain numeric literal; no currency-symbol or
/// locale stripping is attempted.
pub fn parse_amount(raw: Option<&str>, default: Decimal) -> Decimal {
    match raw {
        Some(s) if !s.trim().is_empty() => Decimal::from_str(s.trim()).unwrap_or(default),
        _ => default,
    }
}

/// Parse an ISO-8601 date-time the way CFDI writes it
/// (`2024-03-15T10:00:00`, optionally with a UTC offset; a trailing `Z`
/// means `+00:00`). Returns `None` for empty or malformed input.
///
/// Wall-clock fields are kept as written; the offset is not applied.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    raw.parse::<NaiveDateTime>().ok()
}
