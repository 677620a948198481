//! Numeric projection of text-stored listing attributes.
//!
//! Price, area and floor number are stored as text. They are compared through
//! `listing_numeric(text)` (see the initial migration), which yields the decimal value of a
//! plain decimal literal of at most [`MAX_DIGITS`] digits and NULL for anything else.
//! [`parse_numeric_text`] applies the same rule on the Rust side so request values are
//! classified the way stored values are.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Literals with more digits than this project to NULL on both sides.
pub const MAX_DIGITS: usize = 28;

/// SQL expression projecting a text column to `NUMERIC` (NULL when not a plain decimal).
pub(crate) fn numeric_projection(column_sql: &str) -> String {
    format!("listing_numeric({})", column_sql)
}

/// Parse a plain decimal literal: optional sign, digits, optional fraction.
///
/// Surrounding whitespace is ignored. Exponents, thousands separators, currency symbols
/// and empty strings are rejected, as are literals longer than [`MAX_DIGITS`] digits.
pub fn parse_numeric_text(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned.is_empty() {
        return None;
    }

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    let well_formed = match frac_part {
        None => !int_part.is_empty() && digits_only(int_part),
        Some(f) => {
            digits_only(int_part) && digits_only(f) && !(int_part.is_empty() && f.is_empty())
        }
    };
    if !well_formed || int_part.len() + frac_part.map_or(0, str::len) > MAX_DIGITS {
        return None;
    }

    // Decimal does not accept a bare leading or trailing point.
    let mut normalized = String::with_capacity(s.len() + 2);
    if s.starts_with('-') {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if let Some(f) = frac_part.filter(|f| !f.is_empty()) {
        normalized.push('.');
        normalized.push_str(f);
    }
    Decimal::from_str(&normalized).ok()
}
