//! Retailer-specific selector strategies.
//!
//! Each retailer's markup has drifted over the years, so most strategies try
//! several historical selectors in order. Range filters below are tighter
//! than the global plausibility bound where a retailer's page furniture is
//! known to produce small stray numbers.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::dom::SiteExtractor;
use super::text::{all_text_prices, element_text, first_text_node_price, select_price};
use crate::price::plausible_price;
use crate::site::SiteId;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static RUPEE_NODE: LazyLock<Regex> = LazyLock::new(|| regex(r"₹\s*[\d,]+"));
static RUPEE_VALUE: LazyLock<Regex> = LazyLock::new(|| regex(r"₹\s*([\d,]+\.?\d*)"));

/// Rupee text-node fallback used by Amazon and the generic extractor.
const RUPEE_NODE_RANGE: Range<f64> = 50.0..100_000.0;

pub(crate) struct AmazonExtractor;
pub(crate) struct FlipkartExtractor;
pub(crate) struct GenericExtractor;

/// Retailers whose only signal is a single price element.
pub(crate) struct SingleSelectorExtractor {
    site: SiteId,
    selector: &'static LazyLock<Selector>,
}

static MYNTRA_PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.pdp-price"));
static AJIO_PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.prod-price"));
static MEESHO_PRICE: LazyLock<Selector> = LazyLock::new(|| selector("h3.Sc-product-price"));
static SNAPDEAL_PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.product-price"));

static MYNTRA: SingleSelectorExtractor = SingleSelectorExtractor {
    site: SiteId::Myntra,
    selector: &MYNTRA_PRICE,
};
static AJIO: SingleSelectorExtractor = SingleSelectorExtractor {
    site: SiteId::Ajio,
    selector: &AJIO_PRICE,
};
static MEESHO: SingleSelectorExtractor = SingleSelectorExtractor {
    site: SiteId::Meesho,
    selector: &MEESHO_PRICE,
};
static SNAPDEAL: SingleSelectorExtractor = SingleSelectorExtractor {
    site: SiteId::Snapdeal,
    selector: &SNAPDEAL_PRICE,
};

/// Looks up the extraction strategy registered for `site`.
pub(crate) fn extractor_for(site: SiteId) -> &'static dyn SiteExtractor {
    match site {
        SiteId::Amazon => &AmazonExtractor,
        SiteId::Flipkart => &FlipkartExtractor,
        SiteId::Myntra => &MYNTRA,
        SiteId::Ajio => &AJIO,
        SiteId::Meesho => &MEESHO,
        SiteId::Snapdeal => &SNAPDEAL,
        SiteId::Unknown => &GenericExtractor,
    }
}

impl SiteExtractor for SingleSelectorExtractor {
    fn site(&self) -> SiteId {
        self.site
    }

    fn extract(&self, document: &Html) -> Option<f64> {
        select_price(document, self.selector)
    }
}

// ---------------------------------------------------------------------------
// Amazon
// ---------------------------------------------------------------------------

static AMAZON_OFFSCREEN: LazyLock<Selector> =
    LazyLock::new(|| selector("span.a-price span.a-offscreen"));
static AMAZON_PRICE_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price"));
static AMAZON_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price-whole"));
static AMAZON_FRACTION: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price-fraction"));
static AMAZON_ANY_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-whole"));
static AMAZON_OUR_PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector("span#priceblock_ourprice"));

impl AmazonExtractor {
    /// Joins the split `a-price-whole` / `a-price-fraction` spans of the first
    /// `a-price` block. The whole part usually carries a trailing `.`.
    fn split_price(document: &Html) -> Option<f64> {
        let block = document.select(&AMAZON_PRICE_BLOCK).next()?;
        let whole = block.select(&AMAZON_WHOLE).next()?;
        let whole_text = element_text(whole).replace(',', "");
        let whole_text = whole_text.trim().trim_end_matches('.');

        let fraction = block
            .select(&AMAZON_FRACTION)
            .next()
            .map(|f| element_text(f).trim().to_owned())
            .filter(|f| !f.is_empty());

        let joined = match fraction {
            Some(fraction) => format!("{whole_text}.{fraction}"),
            None => whole_text.to_owned(),
        };
        plausible_price(&joined)
    }
}

impl SiteExtractor for AmazonExtractor {
    fn site(&self) -> SiteId {
        SiteId::Amazon
    }

    fn extract(&self, document: &Html) -> Option<f64> {
        select_price(document, &AMAZON_OFFSCREEN)
            .or_else(|| Self::split_price(document))
            .or_else(|| select_price(document, &AMAZON_ANY_WHOLE))
            .or_else(|| select_price(document, &AMAZON_OUR_PRICE))
            .or_else(|| {
                first_text_node_price(document, &RUPEE_NODE, &RUPEE_VALUE, &RUPEE_NODE_RANGE)
            })
    }
}

// ---------------------------------------------------------------------------
// Flipkart
// ---------------------------------------------------------------------------

static FLIPKART_SELECTORS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("div._30jeq3"),
        selector("div.Nx9bqj"),
        selector(r#"div[data-id="price"]"#),
    ]
});
static FLIPKART_NODE: LazyLock<Regex> = LazyLock::new(|| regex(r"₹[\d,]+"));
static FLIPKART_NODE_VALUE: LazyLock<Regex> = LazyLock::new(|| regex(r"₹([\d,]+)"));
static FLIPKART_PAGE_VALUE: LazyLock<Regex> = LazyLock::new(|| regex(r"₹\s*([\d,]+)"));

/// Flipkart apparel pages: anything outside this window is usually a
/// delivery fee, EMI amount or bundle total.
const FLIPKART_TEXT_RANGE: Range<f64> = 100.0..100_000.0;
const FLIPKART_MIN_SELECTOR_PRICE: f64 = 10.0;

impl SiteExtractor for FlipkartExtractor {
    fn site(&self) -> SiteId {
        SiteId::Flipkart
    }

    fn extract(&self, document: &Html) -> Option<f64> {
        let from_selectors = FLIPKART_SELECTORS.iter().find_map(|sel| {
            select_price(document, sel).filter(|p| *p > FLIPKART_MIN_SELECTOR_PRICE)
        });
        if from_selectors.is_some() {
            return from_selectors;
        }

        if let Some(price) = first_text_node_price(
            document,
            &FLIPKART_NODE,
            &FLIPKART_NODE_VALUE,
            &FLIPKART_TEXT_RANGE,
        ) {
            return Some(price);
        }

        // The struck-through MRP tends to appear before the selling price in
        // raw text order, and is the larger of the two; taking the maximum is
        // the long-standing behavior here.
        all_text_prices(document, &FLIPKART_PAGE_VALUE, &FLIPKART_TEXT_RANGE)
            .into_iter()
            .reduce(f64::max)
    }
}

// ---------------------------------------------------------------------------
// Generic
// ---------------------------------------------------------------------------

/// Symbol scans tried after the rupee scan. Each regex is used both to pick
/// the text node and to pull values out of it.
static SYMBOL_SCANS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\$", "£", "€", "¥"]
        .iter()
        .map(|sym| regex(&format!(r"{sym}\s*([\d,]+\.?\d*)")))
        .collect()
});
const SYMBOL_RANGE: Range<f64> = 1.0..10_000_000.0;

impl SiteExtractor for GenericExtractor {
    fn site(&self) -> SiteId {
        SiteId::Unknown
    }

    fn extract(&self, document: &Html) -> Option<f64> {
        first_text_node_price(document, &RUPEE_NODE, &RUPEE_VALUE, &RUPEE_NODE_RANGE).or_else(
            || {
                SYMBOL_SCANS
                    .iter()
                    .find_map(|re| first_text_node_price(document, re, re, &SYMBOL_RANGE))
            },
        )
    }
}
