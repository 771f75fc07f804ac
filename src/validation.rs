//! Form input checks that run before any storage call.

use chrono::NaiveDate;

use crate::error::AppError;

/// Outcome of checking a picked day/month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid(NaiveDate),
    /// The components do not form a real date (e.g. 31 April)
    InvalidCombination,
    /// A real date, but before `today`
    InPast,
}

/// Check a calendar date built from separate components.
///
/// `today` itself is accepted.
pub fn validate_calendar_date(day: u32, month: u32, year: i32, today: NaiveDate) -> DateCheck {
    match NaiveDate::from_ymd_opt(year, month, day) {
        None => DateCheck::InvalidCombination,
        Some(date) if date < today => DateCheck::InPast,
        Some(date) => DateCheck::Valid(date),
    }
}

/// Trim `value`, failing with `message` when nothing is left
pub fn require_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

/// Parse a price field leniently.
///
/// The longest numeric prefix is used ("20 EUR" is 20). Anything that does
/// not yield a finite, non-negative number becomes 0.
pub fn parse_price(input: &str) -> f64 {
    let prefix = numeric_prefix(input.trim_start(), true);
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Parse a stock field leniently; fractions are truncated ("12.7" is 12).
///
/// Unparsable or negative input becomes 0.
pub fn parse_stock(input: &str) -> i64 {
    let prefix = numeric_prefix(input.trim_start(), false);
    match prefix.parse::<i64>() {
        Ok(value) if value > 0 => value,
        _ => 0,
    }
}

/// Longest prefix of `s` that reads as a decimal number
fn numeric_prefix(s: &str, allow_fraction: bool) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if allow_fraction {
        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            digits += frac_end - frac_start;
            if digits > 0 {
                end = frac_end;
            }
        }

        // exponent only counts when digits follow it
        if digits > 0 && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }
    }

    if digits == 0 {
        return "";
    }
    &s[..end]
}
