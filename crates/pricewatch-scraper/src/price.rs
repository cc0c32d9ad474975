//! Price text normalization.
//!
//! Retailer pages format numbers with whatever separator convention their
//! locale uses (`1,234.56`, `1.234,56`, `₹ 1,23,456`). [`parse_price`] reduces
//! any of these to an `f64`; [`is_plausible`] rejects numbers that are almost
//! certainly page furniture (ratings, ids) rather than prices.

use std::ops::RangeInclusive;

use serde_json::Value;

/// Inclusive range a parsed number must fall in to be accepted as a price.
pub const PLAUSIBLE_PRICE: RangeInclusive<f64> = 1.0..=10_000_000.0;

/// Returns `true` if `value` lies inside [`PLAUSIBLE_PRICE`].
#[must_use]
pub fn is_plausible(value: f64) -> bool {
    PLAUSIBLE_PRICE.contains(&value)
}

/// Parses free-form price text into a number.
///
/// Everything except digits, `,`, `.` and whitespace is dropped first, then
/// separators are disambiguated:
///
/// - several `.` and no `,` → every `.` is a thousands separator
/// - several `,` and no `.` → every `,` is a thousands separator
/// - both present → whichever occurs last is the decimal separator
/// - a lone `,` → thousands separator (`"12,50"` parses as `1250.0`)
///
/// Returns `None` when nothing numeric remains.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();

    let normalized = match (dots, commas) {
        (d, 0) if d > 1 => cleaned.replace('.', ""),
        (0, c) if c > 1 => cleaned.replace(',', ""),
        (d, c) if d > 0 && c > 0 => {
            // Both separators present: rfind cannot fail here.
            let last_comma = cleaned.rfind(',').unwrap_or(0);
            let last_dot = cleaned.rfind('.').unwrap_or(0);
            if last_comma > last_dot {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned.replace(',', ""),
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a price from a JSON value: numbers are taken as-is, strings go
/// through [`parse_price`]. Anything else yields `None`.
#[must_use]
pub fn parse_price_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price(s),
        _ => None,
    }
}

/// Parses `text` and keeps the result only if it is plausible.
pub(crate) fn plausible_price(text: &str) -> Option<f64> {
    parse_price(text).filter(|v| is_plausible(*v))
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
