//! Price extraction from a fetched product page.
//!
//! Three strategies run in a fixed order and the first one that produces a
//! plausible price wins:
//!
//! 1. CSS selectors (universal, then retailer-specific, then symbol scans)
//! 2. JSON-LD structured data, taking the lowest price found
//! 3. Regex patterns over the raw HTML, taking the lowest price found

mod dom;
mod jsonld;
mod name;
mod patterns;
mod sites;
mod text;

use scraper::Html;

use crate::currency::{detect_currency_in, Currency};
use crate::site::{SiteId, SiteInfo};

pub use patterns::text_pattern_candidates;

/// Which strategy produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Selector,
    StructuredData,
    TextPattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPrice {
    pub value: f64,
    pub source: PriceSource,
}

/// Everything learned from one HTML page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnalysis {
    pub price: Option<ExtractedPrice>,
    /// Detected from the page when a price was found, otherwise the site
    /// default.
    pub currency: Currency,
    pub product_name: String,
}

/// Runs the extractor chain over `html`.
///
/// The parsed document never outlives this call, so callers in async code
/// can hold the returned value across `.await` points.
#[must_use]
pub fn analyze_page(html: &str, site: &SiteInfo) -> PageAnalysis {
    let document = Html::parse_document(html);
    let price = extract_price(&document, html, site.site);
    let currency = if price.is_some() {
        detect_currency_in(&document, html, &site.default_currency.code)
    } else {
        site.default_currency.clone()
    };
    PageAnalysis {
        price,
        currency,
        product_name: name::product_name(&document),
    }
}

fn extract_price(document: &Html, html: &str, site: SiteId) -> Option<ExtractedPrice> {
    if let Some(value) = dom::selector_price(document, site) {
        return Some(ExtractedPrice {
            value,
            source: PriceSource::Selector,
        });
    }

    if let Some(value) = lowest(jsonld::json_ld_prices(document)) {
        return Some(ExtractedPrice {
            value,
            source: PriceSource::StructuredData,
        });
    }

    lowest(text_pattern_candidates(html)).map(|value| ExtractedPrice {
        value,
        source: PriceSource::TextPattern,
    })
}

fn lowest(values: Vec<f64>) -> Option<f64> {
    values.into_iter().reduce(f64::min)
}
