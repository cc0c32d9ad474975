//! Ordered list of URLs to try for one resolution.

use std::sync::LazyLock;

use regex::Regex;

use super::origin::extract_origin;
use crate::site::SiteId;

static ASIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/(?:dp|gp/product)/([A-Z0-9]{10})").expect("valid regex")
});

/// The 10-character Amazon product identifier in `url`, uppercased.
#[must_use]
pub fn extract_amazon_asin(url: &str) -> Option<String> {
    ASIN.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Amazon URLs collapse to `{origin}/dp/{ASIN}`; everything else, and any
/// URL without an HTTP origin, is returned unchanged.
#[must_use]
pub fn canonical_url(url: &str, site: SiteId) -> String {
    if site != SiteId::Amazon {
        return url.to_owned();
    }
    match (extract_origin(url), extract_amazon_asin(url)) {
        (Some(origin), Some(asin)) => format!("{origin}/dp/{asin}"),
        _ => url.to_owned(),
    }
}

/// Canonical form first, then the original URL, then Amazon's mobile and
/// variant-pinned alternates. Duplicates are dropped, order preserved.
#[must_use]
pub fn fetch_candidates(url: &str, site: SiteId) -> Vec<String> {
    let mut candidates = vec![canonical_url(url, site), url.to_owned()];

    if site == SiteId::Amazon {
        if let (Some(origin), Some(asin)) = (extract_origin(url), extract_amazon_asin(url)) {
            candidates.push(format!("{origin}/gp/aw/d/{asin}"));
            candidates.push(format!("{origin}/dp/{asin}?th=1&psc=1"));
        }
    }

    dedup_preserving_order(candidates)
}

fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(urls.len());
    for url in urls {
        if !unique.contains(&url) {
            unique.push(url);
        }
    }
    unique
}
