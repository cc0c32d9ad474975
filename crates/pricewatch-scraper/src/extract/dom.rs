//! CSS-selector price extraction.
//!
//! Universal selectors (schema.org microdata, Open Graph product tags, common
//! `price` classes) are probed first. If none yields a plausible price, the
//! retailer's [`SiteExtractor`] runs, and finally the generic currency-symbol
//! text scan.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sites::{extractor_for, GenericExtractor};
use super::text::element_text;
use crate::price::plausible_price;
use crate::site::SiteId;

/// Per-retailer price extraction over a parsed page.
pub(crate) trait SiteExtractor: Sync {
    fn site(&self) -> SiteId;

    /// Returns the first plausible price found with this retailer's
    /// selectors, or `None` to let the next strategy run.
    fn extract(&self, document: &Html) -> Option<f64>;
}

const UNIVERSAL_SELECTORS: [&str; 11] = [
    r#"meta[property="product:price:amount"]"#,
    r#"meta[name="product:price:amount"]"#,
    r#"meta[itemprop="price"]"#,
    r#"[itemprop="price"]"#,
    "[data-price]",
    "[data-sale-price]",
    "[data-product-price]",
    ".price",
    ".product-price",
    ".sale-price",
    ".current-price",
];

static UNIVERSAL: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    UNIVERSAL_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
});

/// Runs the selector strategy for `site`.
pub(crate) fn selector_price(document: &Html, site: SiteId) -> Option<f64> {
    if let Some(price) = universal_price(document) {
        return Some(price);
    }
    let extractor = extractor_for(site);
    if let Some(price) = extractor.extract(document) {
        tracing::debug!(site = %extractor.site(), price, "site selector matched");
        return Some(price);
    }
    // Unknown sites are already served by the generic extractor.
    if site == SiteId::Unknown {
        return None;
    }
    GenericExtractor.extract(document)
}

/// Probes [`UNIVERSAL_SELECTORS`] in order, looking only at the first match of
/// each.
fn universal_price(document: &Html) -> Option<f64> {
    UNIVERSAL.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        plausible_price(&universal_value(element))
    })
}

/// `content` for meta tags; otherwise a `data-price`/`data-sale-price`
/// attribute, falling back to the element's text.
fn universal_value(element: ElementRef<'_>) -> String {
    let node = element.value();
    if node.name() == "meta" {
        return node.attr("content").unwrap_or_default().to_owned();
    }
    node.attr("data-price")
        .filter(|v| !v.is_empty())
        .or_else(|| node.attr("data-sale-price").filter(|v| !v.is_empty()))
        .map_or_else(|| element_text(element), str::to_owned)
}
