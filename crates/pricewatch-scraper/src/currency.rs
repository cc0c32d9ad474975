//! Currency inference from page content.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Known ISO codes and the symbol shown next to prices in that currency.
const CURRENCY_SYMBOLS: [(&str, &str); 9] = [
    ("USD", "$"),
    ("INR", "₹"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("JPY", "¥"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("SGD", "S$"),
    ("AED", "AED"),
];

/// Symbols searched in page text, highest priority first. `$` is last because
/// it also prefixes A$, C$ and S$.
const SYMBOL_PRIORITY: [(&str, &str); 5] = [
    ("₹", "INR"),
    ("£", "GBP"),
    ("€", "EUR"),
    ("¥", "JPY"),
    ("$", "USD"),
];

static CODE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)"priceCurrency"\s*:\s*"([A-Z]{3})""#).expect("valid regex"),
        Regex::new(r#"(?i)price:currency["']?\s*content=["']([A-Z]{3})"#).expect("valid regex"),
        Regex::new(r#"(?i)currency["']?\s*:\s*["']([A-Z]{3})["']"#).expect("valid regex"),
    ]
});

static META_PRICE_CURRENCY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="product:price:currency"]"#).expect("valid selector")
});

/// ISO code plus display symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    /// Builds a currency from an ISO code, looking up its display symbol.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_owned(),
            symbol: symbol_for(code).to_owned(),
        }
    }
}

/// Returns the display symbol for `code`, or `$` for codes outside the
/// known set.
#[must_use]
pub fn symbol_for(code: &str) -> &'static str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("$", |(_, s)| s)
}

fn is_known_code(code: &str) -> bool {
    CURRENCY_SYMBOLS.iter().any(|(c, _)| *c == code)
}

/// Infers the currency a page is priced in.
///
/// Precedence: explicit currency-code metadata in the raw HTML, then the
/// `product:price:currency` meta tag, then the first currency symbol found
/// (₹, £, €, ¥, $ in that order), then `fallback_code`.
#[must_use]
pub fn detect_currency(html: &str, fallback_code: &str) -> Currency {
    let document = Html::parse_document(html);
    detect_currency_in(&document, html, fallback_code)
}

pub(crate) fn detect_currency_in(document: &Html, html: &str, fallback_code: &str) -> Currency {
    for pattern in CODE_PATTERNS.iter() {
        if let Some(code) = pattern
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_uppercase())
        {
            if is_known_code(&code) {
                return Currency::from_code(&code);
            }
        }
    }

    if let Some(code) = document
        .select(&META_PRICE_CURRENCY)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_ascii_uppercase())
    {
        if is_known_code(&code) {
            return Currency::from_code(&code);
        }
    }

    for (symbol, code) in SYMBOL_PRIORITY {
        if html.contains(symbol) {
            return Currency::from_code(code);
        }
    }

    Currency::from_code(fallback_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_known_and_unknown() {
        assert_eq!(symbol_for("INR"), "₹");
        assert_eq!(symbol_for("AUD"), "A$");
        assert_eq!(symbol_for("XYZ"), "$");
    }

    #[test]
    fn price_currency_key_wins() {
        let html = r#"<script>{"priceCurrency": "GBP"}</script><p>₹ 100</p>"#;
        assert_eq!(detect_currency(html, "USD"), Currency::from_code("GBP"));
    }

    #[test]
    fn code_match_is_case_insensitive() {
        let html = r#"{"priceCurrency":"eur"}"#;
        assert_eq!(detect_currency(html, "USD").code, "EUR");
    }

    #[test]
    fn unknown_metadata_code_falls_through() {
        let html = r#"{"priceCurrency":"CHF"} <span>£ 20</span>"#;
        assert_eq!(detect_currency(html, "USD").code, "GBP");
    }

    #[test]
    fn open_graph_currency_meta() {
        let html = r#"<html><head><meta property="og:price:currency" content="JPY"></head></html>"#;
        assert_eq!(detect_currency(html, "USD").code, "JPY");
    }

    #[test]
    fn product_price_currency_meta_tag() {
        // Attribute order defeats the raw-text pattern; the DOM lookup catches it.
        let html = r#"<html><head><meta content="SGD" property="product:price:currency"></head></html>"#;
        let currency = detect_currency(html, "USD");
        assert_eq!(currency.code, "SGD");
        assert_eq!(currency.symbol, "S$");
    }

    #[test]
    fn rupee_beats_dollar() {
        let html = "<p>Was $12 now ₹999</p>";
        assert_eq!(detect_currency(html, "USD").code, "INR");
    }

    #[test]
    fn dollar_only() {
        let html = "<p>Only $12.99 today</p>";
        assert_eq!(detect_currency(html, "INR").code, "USD");
    }

    #[test]
    fn falls_back_to_site_default() {
        let html = "<p>no prices here</p>";
        let currency = detect_currency(html, "AED");
        assert_eq!(currency.code, "AED");
        assert_eq!(currency.symbol, "AED");
    }
}
