//! Locale formatting for amounts and dates (pt-BR: `1.234,56`, `dd/mm/yyyy`).

use crate::error::FormatError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use numfmt::{Formatter, Precision};
use std::sync::OnceLock;

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_MARK: char = ',';
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats `amount` with two decimals and grouped thousands, no currency symbol.
///
/// Non-finite input trips a debug assertion; release builds render it as
/// `NaN`, `∞` or `-∞`.
pub fn format_currency(amount: f64) -> String {
    debug_assert!(amount.is_finite(), "format_currency called with {}", amount);
    match try_format_currency(amount) {
        Ok(s) => s,
        Err(_) if amount.is_nan() => "NaN".to_string(),
        Err(_) if amount.is_sign_negative() => "-∞".to_string(),
        Err(_) => "∞".to_string(),
    }
}

fn formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        let base = Formatter::new()
            .separator(THOUSANDS_SEPARATOR)
            .unwrap_or_else(|_| Formatter::new());
        base.comma(true).precision(Precision::Decimals(2))
    })
}

/// Like [`format_currency`] but reports non-finite input as an error.
///
/// Rounds half away from zero to whole cents before formatting.
pub fn try_format_currency(amount: f64) -> Result<String, FormatError> {
    if !amount.is_finite() {
        return Err(FormatError::NonFinite(amount));
    }
    let cents = (amount.abs() * 100.0).round();
    if cents == 0.0 {
        // numfmt renders zero as a bare "0"
        return Ok("0,00".to_string());
    }

    let mut formatted = formatter().fmt_string(cents / 100.0);
    // numfmt drops trailing fraction zeros: "12,3" or "500" become "12,30" and "500,00"
    match formatted.rfind(DECIMAL_MARK) {
        None => {
            formatted.push(DECIMAL_MARK);
            formatted.push_str("00");
        }
        Some(i) => {
            for _ in formatted.len() - i - 1..2 {
                formatted.push('0');
            }
        }
    }

    if amount < 0.0 {
        formatted.insert(0, '-');
    }
    Ok(formatted)
}

/// Inverse of [`format_currency`]: accepts `1.234,56`, `-0,50`, `300,00`.
pub fn parse_currency(s: &str) -> Result<f64, FormatError> {
    let trimmed = s.trim();
    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .map(|c| if c == DECIMAL_MARK { '.' } else { c })
        .collect();
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormatError::InvalidAmount(s.to_string())),
    }
}

/// Parses an ISO-like date or timestamp into a UTC instant.
///
/// Accepted: RFC 3339 (`2020-04-30T12:00:00.000Z`, offsets), naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` / `YYYY-MM-DD HH:MM:SS[.f]` (taken as UTC) and
/// plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, FormatError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FormatError::InvalidDate(input.to_string()))
}

/// Renders a parsed instant in the locale date format.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Parses `input` and renders it as `dd/mm/yyyy`.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    parse_date(input).map(|dt| format_datetime(&dt))
}
