//! Browser-like request headers.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION,
    REFERER, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};

use super::origin::referer_for;
use crate::site::SiteId;

pub(super) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

pub(super) const DESKTOP_LINUX_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Header overrides layered on the base set. Every candidate URL is tried
/// once with each variant, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    Default,
    DesktopLinux,
}

impl HeaderVariant {
    pub const ALL: [HeaderVariant; 2] = [HeaderVariant::Default, HeaderVariant::DesktopLinux];

    #[must_use]
    pub fn user_agent(self) -> &'static str {
        match self {
            HeaderVariant::Default => DEFAULT_UA,
            HeaderVariant::DesktopLinux => DESKTOP_LINUX_UA,
        }
    }
}

/// Full header set for one GET of `url`.
pub(super) fn request_headers(url: &str, site: SiteId, variant: HeaderVariant) -> HeaderMap {
    let accept_language = if site.prefers_indian_locale() {
        "en-IN,en;q=0.9"
    } else {
        "en-US,en;q=0.9"
    };

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(variant.user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(accept_language));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

    match referer_for(url).map(|r| HeaderValue::from_str(&r)) {
        Some(Ok(referer)) => {
            headers.insert(REFERER, referer);
        }
        Some(Err(e)) => tracing::debug!(url, error = %e, "skipping unrepresentable Referer"),
        None => tracing::debug!(url, "no origin for Referer"),
    }

    headers
}
