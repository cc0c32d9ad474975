//! Product display name from page metadata.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::text::element_text;

pub(crate) const DEFAULT_PRODUCT_NAME: &str = "Product";

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("valid selector")
});
static RETAILER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[-|]\s*(Amazon|Flipkart|Myntra|Ajio|Meesho|Snapdeal)\s*$")
        .expect("valid regex")
});

/// `og:title` when present, else `<title>` minus a trailing
/// `- Amazon` / `| Flipkart` style suffix, else [`DEFAULT_PRODUCT_NAME`].
pub(crate) fn product_name(document: &Html) -> String {
    let og_title = document
        .select(&OG_TITLE)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(title) = og_title {
        return title.to_owned();
    }

    document
        .select(&TITLE)
        .next()
        .map(|el| {
            let title = element_text(el);
            RETAILER_SUFFIX.replace(title.trim(), "").trim().to_owned()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_owned())
}
