//! Text-node helpers shared by the DOM extractors.

use std::ops::Range;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::price::{is_plausible, parse_price, plausible_price};

/// Concatenated text content of an element.
pub(super) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Text of the first element matching `selector`, parsed as a plausible price.
pub(super) fn select_price(document: &Html, selector: &Selector) -> Option<f64> {
    document
        .select(selector)
        .next()
        .and_then(|el| plausible_price(&element_text(el)))
}

/// Finds the first text node matching `node_pattern`, then returns the first
/// `value_pattern` capture inside it that parses into the open interval
/// `bounds` (and the global plausibility bound).
///
/// Text nodes are visited in document order, including script and style
/// bodies.
pub(super) fn first_text_node_price(
    document: &Html,
    node_pattern: &Regex,
    value_pattern: &Regex,
    bounds: &Range<f64>,
) -> Option<f64> {
    let node = document
        .root_element()
        .text()
        .find(|text| node_pattern.is_match(text))?;

    value_pattern
        .captures_iter(node)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| parse_price(&m.as_str().replace(',', "")))
        .find(|v| open_interval_contains(bounds, *v) && is_plausible(*v))
}

/// All `value_pattern` captures across the page's full text, parsed and
/// filtered to `bounds`.
pub(super) fn all_text_prices(
    document: &Html,
    value_pattern: &Regex,
    bounds: &Range<f64>,
) -> Vec<f64> {
    let all_text = document.root_element().text().collect::<String>();
    value_pattern
        .captures_iter(&all_text)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| parse_price(&m.as_str().replace(',', "")))
        .filter(|v| open_interval_contains(bounds, *v) && is_plausible(*v))
        .collect()
}

fn open_interval_contains(bounds: &Range<f64>, value: f64) -> bool {
    value > bounds.start && value < bounds.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rupee_node() -> Regex {
        Regex::new(r"₹\s*[\d,]+").unwrap()
    }

    fn rupee_value() -> Regex {
        Regex::new(r"₹\s*([\d,]+\.?\d*)").unwrap()
    }

    #[test]
    fn first_node_value_inside_bounds() {
        let doc = Html::parse_document("<p>Save ₹ 20 now</p><p>₹ 1,499</p>");
        // First matching node only has 20, which is outside (50, 100000).
        assert_eq!(
            first_text_node_price(&doc, &rupee_node(), &rupee_value(), &(50.0..100_000.0)),
            None
        );
    }

    #[test]
    fn first_node_multiple_values() {
        let doc = Html::parse_document("<p>MRP ₹10 deal ₹1,299.50</p>");
        assert_eq!(
            first_text_node_price(&doc, &rupee_node(), &rupee_value(), &(50.0..100_000.0)),
            Some(1299.5)
        );
    }

    #[test]
    fn bounds_are_exclusive() {
        let doc = Html::parse_document("<p>₹50</p>");
        assert_eq!(
            first_text_node_price(&doc, &rupee_node(), &rupee_value(), &(50.0..100_000.0)),
            None
        );
    }

    #[test]
    fn all_text_prices_collects_every_match() {
        let doc = Html::parse_document("<div>₹ 1,999</div><div>₹ 2,499</div><div>₹ 5</div>");
        let re = Regex::new(r"₹\s*([\d,]+)").unwrap();
        assert_eq!(all_text_prices(&doc, &re, &(100.0..100_000.0)), vec![1999.0, 2499.0]);
    }
}
