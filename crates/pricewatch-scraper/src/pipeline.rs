//! Single entry point: URL in, [`ExtractionResult`] or [`ScraperError`] out.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use reqwest::Url;

use crate::client::{FetchSettings, PriceClient};
use crate::error::ScraperError;
use crate::site::classify_site;
use crate::types::ExtractionResult;

const TEST_SCHEME_PREFIX: &str = "test://";

/// Validates a user-supplied URL, then classifies, fetches and extracts.
#[derive(Debug, Clone, Default)]
pub struct PriceResolver {
    client: PriceClient,
}

impl PriceResolver {
    #[must_use]
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            client: PriceClient::new(settings),
        }
    }

    /// Resolves the current price at `url`.
    ///
    /// Input is trimmed first. `test://` URLs (any case) short-circuit to a
    /// random mock price without touching the network.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UrlRequired`] for blank input.
    /// - [`ScraperError::InvalidUrl`] for non-HTTP schemes, missing hosts and
    ///   local addresses.
    /// - Any error from [`PriceClient::fetch_price`].
    pub async fn resolve(&self, url: &str) -> Result<ExtractionResult, ScraperError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScraperError::UrlRequired);
        }
        if is_test_url(url) {
            tracing::debug!(url, "returning mock price for test URL");
            return Ok(mock_result(url));
        }

        validate_url(url)?;
        let site = classify_site(url);
        tracing::info!(url, site = %site.site, "resolving price");
        self.client.fetch_price(url, &site).await
    }
}

fn is_test_url(url: &str) -> bool {
    url.get(..TEST_SCHEME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TEST_SCHEME_PREFIX))
}

/// Uniform price in `[10, 500]`, rounded to cents.
fn mock_result(url: &str) -> ExtractionResult {
    let raw: f64 = rand::random_range(10.0..=500.0);
    ExtractionResult {
        price: (raw * 100.0).round() / 100.0,
        currency: "USD".to_owned(),
        currency_symbol: "$".to_owned(),
        product_name: "Test Product".to_owned(),
        source_url: url.to_owned(),
        is_test_mode: true,
    }
}

fn invalid(url: &str, reason: &str) -> ScraperError {
    ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    }
}

/// Requires `http`/`https` with a host, and refuses local targets.
pub(crate) fn validate_url(url: &str) -> Result<(), ScraperError> {
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(invalid(url, "Invalid URL format"));
    }

    let parsed = Url::parse(url).map_err(|_| invalid(url, "Invalid URL"))?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid(url, "Invalid URL"))?;

    if is_local_host(host) {
        return Err(invalid(url, "Local URLs are not allowed"));
    }
    Ok(())
}

/// `localhost`, any `*.localhost` name, and loopback or unspecified
/// addresses, including IPv4 addresses in IPv6-mapped form.
fn is_local_host(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();
    if host == "localhost" || host.ends_with(".localhost") {
        return true;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => is_local_v4(ip),
        Ok(IpAddr::V6(ip)) => {
            ip.is_loopback()
                || ip == Ipv6Addr::UNSPECIFIED
                || ip.to_ipv4_mapped().is_some_and(is_local_v4)
        }
        Err(_) => false,
    }
}

fn is_local_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip == Ipv4Addr::UNSPECIFIED
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(url: &str) -> String {
        match validate_url(url) {
            Err(ScraperError::InvalidUrl { reason, .. }) => reason,
            other => panic!("expected InvalidUrl for {url}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_public_http_and_https() {
        assert!(validate_url("https://www.amazon.in/dp/B08N5WRWNW").is_ok());
        assert!(validate_url("HTTP://shop.example.com/p/1").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(reason("ftp://example.com/file"), "Invalid URL format");
        assert_eq!(reason("www.amazon.in/dp/B08N5WRWNW"), "Invalid URL format");
    }

    #[test]
    fn rejects_missing_host() {
        assert_eq!(reason("http://"), "Invalid URL");
    }

    #[test]
    fn rejects_local_targets() {
        for url in [
            "http://localhost:5000/admin",
            "http://LOCALHOST/",
            "http://127.0.0.1/",
            "http://127.10.0.3:8080/x",
            "http://0.0.0.0/",
            "http://[::1]/",
            "http://[::]/",
            "http://[::ffff:127.0.0.1]/p",
            "http://[::ffff:0.0.0.0]/p",
            "http://localhost./p",
            "http://api.localhost/p",
            "http://API.LocalHost./p",
        ] {
            assert_eq!(reason(url), "Local URLs are not allowed", "{url}");
        }
    }

    #[test]
    fn private_network_addresses_are_not_local() {
        assert!(validate_url("http://192.168.1.10/p").is_ok());
        assert!(validate_url("http://[::ffff:192.168.1.10]/p").is_ok());
    }

    #[test]
    fn localhost_lookalike_domains_are_allowed() {
        assert!(validate_url("https://mylocalhost.com/p").is_ok());
        assert!(validate_url("https://localhost.example.com/p").is_ok());
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        assert!(is_test_url("test://anything"));
        assert!(is_test_url("TEST://Widget"));
        assert!(!is_test_url("tes"));
        assert!(!is_test_url("https://test.example.com"));
    }

    #[test]
    fn mock_price_in_range_with_cents() {
        for _ in 0..200 {
            let result = mock_result("test://x");
            assert!((10.0..=500.0).contains(&result.price), "{}", result.price);
            let cents = result.price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
            assert!(result.is_test_mode);
            assert_eq!(result.currency, "USD");
            assert_eq!(result.currency_symbol, "$");
            assert_eq!(result.product_name, "Test Product");
        }
    }

    #[tokio::test]
    async fn resolve_blank_is_url_required() {
        let resolver = PriceResolver::default();
        let err = resolver.resolve("   ").await.unwrap_err();
        assert!(matches!(err, ScraperError::UrlRequired), "got {err:?}");
    }

    #[tokio::test]
    async fn resolve_trims_test_url() {
        let resolver = PriceResolver::default();
        let result = resolver.resolve("  test://demo  ").await.unwrap();
        assert!(result.is_test_mode);
        assert_eq!(result.source_url, "test://demo");
    }

    #[tokio::test]
    async fn resolve_rejects_loopback_before_fetching() {
        let resolver = PriceResolver::default();
        let err = resolver
            .resolve("http://127.0.0.1:9/p/1")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
