//! Schema.org JSON-LD price extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::patterns::text_pattern_candidates;
use super::text::element_text;
use crate::price::{is_plausible, parse_price_value};

static JSON_LD_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// Collects every plausible price from the page's
/// `<script type="application/ld+json">` blocks.
///
/// Keys named `price`, `lowPrice` or `highPrice` (any case) are read
/// directly; other scalar leaves are scanned with the text patterns so prices
/// embedded in descriptions still count. A block that is not valid JSON is
/// scanned as raw text.
pub(crate) fn json_ld_prices(document: &Html) -> Vec<f64> {
    let mut prices = Vec::new();

    for script in document.select(&JSON_LD_SCRIPT) {
        let raw = element_text(script);
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(payload) => collect_prices(&payload, &mut prices),
            Err(e) => {
                tracing::debug!(error = %e, "malformed JSON-LD block; scanning raw text");
                prices.extend(text_pattern_candidates(raw));
            }
        }
    }

    prices
}

fn is_price_key(key: &str) -> bool {
    ["price", "lowprice", "highprice"]
        .iter()
        .any(|k| key.eq_ignore_ascii_case(k))
}

fn collect_prices(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if !is_price_key(key) {
                    collect_prices(child, out);
                    continue;
                }
                match child {
                    // `"price": {"value": ...}` style nesting.
                    Value::Object(_) | Value::Array(_) => collect_prices(child, out),
                    scalar => {
                        if let Some(price) = parse_price_value(scalar).filter(|v| is_plausible(*v))
                        {
                            out.push(price);
                        }
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_prices(item, out);
            }
        }
        Value::String(s) => out.extend(text_pattern_candidates(s)),
        Value::Number(n) => out.extend(text_pattern_candidates(&n.to_string())),
        Value::Bool(_) | Value::Null => {}
    }
}
