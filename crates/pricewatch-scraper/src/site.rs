//! Retailer identification from URL text.

use std::fmt;

use crate::currency::Currency;

/// Retailers with dedicated extraction logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    Amazon,
    Flipkart,
    Myntra,
    Ajio,
    Meesho,
    Snapdeal,
    Unknown,
}

impl SiteId {
    /// Known retailers all serve the Indian storefront and expect `en-IN`.
    #[must_use]
    pub fn prefers_indian_locale(self) -> bool {
        !matches!(self, SiteId::Unknown)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SiteId::Amazon => "amazon",
            SiteId::Flipkart => "flipkart",
            SiteId::Myntra => "myntra",
            SiteId::Ajio => "ajio",
            SiteId::Meesho => "meesho",
            SiteId::Snapdeal => "snapdeal",
            SiteId::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub site: SiteId,
    pub default_currency: Currency,
}

const INDIAN_RETAILERS: [(&str, SiteId); 5] = [
    ("flipkart", SiteId::Flipkart),
    ("myntra", SiteId::Myntra),
    ("ajio", SiteId::Ajio),
    ("meesho", SiteId::Meesho),
    ("snapdeal", SiteId::Snapdeal),
];

/// Maps a URL to a retailer and its default currency.
///
/// Matching is a case-insensitive substring test over the whole URL, so
/// `https://www.amazon.in/...` and `https://AMAZON.co.uk/...` both classify
/// as Amazon. Unknown sites get a currency guessed from the host's TLD.
#[must_use]
pub fn classify_site(url: &str) -> SiteInfo {
    let lower = url.to_lowercase();

    if lower.contains("amazon") {
        let code = if lower.contains("amazon.in") {
            "INR"
        } else if lower.contains("amazon.co.uk") {
            "GBP"
        } else {
            "USD"
        };
        return SiteInfo {
            site: SiteId::Amazon,
            default_currency: Currency::from_code(code),
        };
    }

    if let Some((_, site)) = INDIAN_RETAILERS.iter().find(|(needle, _)| lower.contains(needle)) {
        return SiteInfo {
            site: *site,
            default_currency: Currency::from_code("INR"),
        };
    }

    SiteInfo {
        site: SiteId::Unknown,
        default_currency: Currency::from_code(infer_currency_from_url(url)),
    }
}

/// Guesses a currency code from the URL host.
///
/// These are substring checks on the host, not strict suffix matches:
/// `shop.in.example.com` counts as Indian.
#[must_use]
pub fn infer_currency_from_url(url: &str) -> &'static str {
    let host = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();

    let any = |needles: &[&str]| needles.iter().any(|n| host.contains(n));

    if any(&[".in", "amazon.in", "flipkart", "myntra", "ajio", "meesho", "snapdeal"]) {
        "INR"
    } else if any(&[".co.uk", ".uk"]) {
        "GBP"
    } else if any(&[".de", ".fr", ".es", ".it", ".nl", ".eu"]) {
        "EUR"
    } else if any(&[".jp"]) {
        "JPY"
    } else if any(&[".com.au"]) {
        "AUD"
    } else if any(&[".ca"]) {
        "CAD"
    } else if any(&[".sg"]) {
        "SGD"
    } else if any(&[".ae"]) {
        "AED"
    } else {
        "USD"
    }
}
