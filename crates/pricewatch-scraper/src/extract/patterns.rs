//! Regex scan of raw page text for currency-tagged numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::price::plausible_price;

const NUMBER: &str = r"([0-9][0-9,]*\.?[0-9]*)";

/// JSON keys whose values are commonly the displayed price in embedded state.
const JSON_KEYS: [&str; 5] = ["price", "salePrice", "currentPrice", "final_price", "amount"];

/// Currency markers that may directly precede a number.
const CURRENCY_MARKERS: [&str; 14] = [
    "₹", "INR", r"\$", "USD", "£", "GBP", "€", "EUR", "¥", "JPY", "AUD", "CAD", "SGD", "AED",
];

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let keys = JSON_KEYS
        .iter()
        .map(|key| format!(r#"(?i)"{key}"\s*:\s*"?{NUMBER}"?"#));
    let markers = CURRENCY_MARKERS
        .iter()
        .map(|marker| format!(r"(?i){marker}\s*{NUMBER}"));
    keys.chain(markers)
        .map(|p| Regex::new(&p).expect("valid price pattern"))
        .collect()
});

/// Every plausible price found in `text`, grouped by pattern in pattern
/// order and by position within each pattern.
#[must_use]
pub fn text_pattern_candidates(text: &str) -> Vec<f64> {
    if text.is_empty() {
        return Vec::new();
    }
    PRICE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| plausible_price(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_one_pattern_per_key_and_marker() {
        assert_eq!(PRICE_PATTERNS.len(), JSON_KEYS.len() + CURRENCY_MARKERS.len());
    }

    #[test]
    fn json_sale_price_key() {
        assert_eq!(
            text_pattern_candidates(r#"{"salePrice": "1,499.00"}"#),
            vec![1499.0]
        );
    }

    #[test]
    fn key_match_is_case_insensitive() {
        assert_eq!(text_pattern_candidates(r#"{"PRICE":42}"#), vec![42.0]);
    }

    #[test]
    fn currency_symbols_and_codes() {
        let found = text_pattern_candidates("Now ₹ 899 or USD 12.50 or AED 40");
        assert!(found.contains(&899.0));
        assert!(found.contains(&12.5));
        assert!(found.contains(&40.0));
    }

    #[test]
    fn dollar_sign_is_literal() {
        assert_eq!(text_pattern_candidates("only $19.99"), vec![19.99]);
    }

    #[test]
    fn implausible_values_are_dropped() {
        assert!(text_pattern_candidates(r#"{"amount": 0}"#).is_empty());
        assert!(text_pattern_candidates("$ 99999999").is_empty());
    }

    #[test]
    fn empty_text_has_no_candidates() {
        assert!(text_pattern_candidates("").is_empty());
    }
}
