use super::*;

use reqwest::header::{ACCEPT_LANGUAGE, REFERER, USER_AGENT};

use crate::site::classify_site;

#[test]
fn asin_from_dp_path() {
    assert_eq!(
        extract_amazon_asin("https://www.amazon.in/Boat-Rockerz/dp/B08N5WRWNW/ref=sr_1_1"),
        Some("B08N5WRWNW".to_owned())
    );
}

#[test]
fn asin_from_gp_product_path_is_uppercased() {
    assert_eq!(
        extract_amazon_asin("https://www.amazon.com/gp/product/b07xjwd3m4?psc=1"),
        Some("B07XJWD3M4".to_owned())
    );
}

#[test]
fn asin_absent() {
    assert_eq!(extract_amazon_asin("https://www.amazon.in/s?k=headphones"), None);
}

#[test]
fn canonical_amazon_url_drops_slug_and_query() {
    assert_eq!(
        canonical_url(
            "https://www.amazon.in/Boat-Rockerz/dp/B08N5WRWNW/ref=sr_1_1?keywords=x",
            SiteId::Amazon
        ),
        "https://www.amazon.in/dp/B08N5WRWNW"
    );
}

#[test]
fn canonical_non_amazon_url_unchanged() {
    let url = "https://www.flipkart.com/item/p/itm123?pid=ABC";
    assert_eq!(canonical_url(url, SiteId::Flipkart), url);
}

#[test]
fn amazon_candidates_in_order() {
    let url = "https://www.amazon.in/Boat-Rockerz/dp/B08N5WRWNW/ref=sr_1_1";
    assert_eq!(
        fetch_candidates(url, SiteId::Amazon),
        vec![
            "https://www.amazon.in/dp/B08N5WRWNW".to_owned(),
            url.to_owned(),
            "https://www.amazon.in/gp/aw/d/B08N5WRWNW".to_owned(),
            "https://www.amazon.in/dp/B08N5WRWNW?th=1&psc=1".to_owned(),
        ]
    );
}

#[test]
fn canonical_input_is_not_repeated() {
    let url = "https://www.amazon.in/dp/B08N5WRWNW";
    let candidates = fetch_candidates(url, SiteId::Amazon);
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0], url);
}

#[test]
fn non_amazon_has_single_candidate() {
    let url = "https://shop.example.com/p/1";
    assert_eq!(fetch_candidates(url, SiteId::Unknown), vec![url.to_owned()]);
}

#[test]
fn extract_origin_strips_path() {
    assert_eq!(
        extract_origin("https://www.amazon.in/dp/B08N5WRWNW?th=1").as_deref(),
        Some("https://www.amazon.in")
    );
}

#[test]
fn extract_origin_keeps_port() {
    assert_eq!(
        extract_origin("http://127.0.0.1:8080/p/1").as_deref(),
        Some("http://127.0.0.1:8080")
    );
}

#[test]
fn extract_origin_rejects_unparseable_and_opaque() {
    assert_eq!(extract_origin("not a url/with/path"), None);
    assert_eq!(extract_origin("data:text/html,hi"), None);
}

#[test]
fn canonical_url_without_origin_is_unchanged() {
    let url = "amazon/dp/B08N5WRWNW";
    assert_eq!(canonical_url(url, SiteId::Amazon), url);
    assert_eq!(fetch_candidates(url, SiteId::Amazon), vec![url.to_owned()]);
}

#[test]
fn referer_omitted_without_origin() {
    let headers = request_headers("not a url", SiteId::Unknown, HeaderVariant::Default);
    assert!(headers.get(REFERER).is_none());
    assert!(headers.get(USER_AGENT).is_some());
}

#[test]
fn indian_retailers_get_en_in() {
    let url = "https://www.myntra.com/tshirts/1";
    let headers = request_headers(url, classify_site(url).site, HeaderVariant::Default);
    assert_eq!(headers[ACCEPT_LANGUAGE], "en-IN,en;q=0.9");
    assert_eq!(headers[REFERER], "https://www.myntra.com/");
}

#[test]
fn unknown_sites_get_en_us() {
    let headers = request_headers(
        "https://shop.example.com/p/1",
        SiteId::Unknown,
        HeaderVariant::Default,
    );
    assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.9");
}

#[test]
fn variants_differ_only_in_user_agent() {
    let url = "https://shop.example.com/p/1";
    let default = request_headers(url, SiteId::Unknown, HeaderVariant::Default);
    let linux = request_headers(url, SiteId::Unknown, HeaderVariant::DesktopLinux);
    assert_ne!(default[USER_AGENT], linux[USER_AGENT]);
    assert_eq!(default.len(), linux.len());
    assert_eq!(default["sec-fetch-mode"], "navigate");
    assert_eq!(linux["sec-fetch-mode"], "navigate");
}

#[test]
fn captcha_markers_case_insensitive() {
    assert!(is_captcha_like(200, "<title>Amazon.in - Robot Check</title>"));
    assert!(is_captcha_like(
        200,
        "Enter the characters you see below"
    ));
    assert!(is_captcha_like(
        200,
        "Sorry, we just need to make sure you're not a robot."
    ));
    assert!(!is_captcha_like(200, "<title>Boat Rockerz 450</title>"));
}

#[test]
fn captcha_statuses() {
    assert!(is_captcha_like(429, ""));
    assert!(is_captcha_like(503, ""));
    assert!(!is_captcha_like(500, ""));
}

#[test]
fn settings_from_app_config() {
    let config = pricewatch_core::AppConfig {
        env: pricewatch_core::Environment::Test,
        log_level: "debug".to_owned(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        resolve_deadline_secs: 30,
        captcha_pause_ms: 0,
        max_concurrent_resolves: 1,
    };
    let settings = FetchSettings::from(&config);
    assert_eq!(settings.request_timeout, Duration::from_secs(5));
    assert_eq!(settings.connect_timeout, Duration::from_secs(2));
    assert_eq!(settings.deadline, Duration::from_secs(30));
    assert!(settings.captcha_pause.is_zero());
}

#[test]
fn default_settings() {
    let settings = PriceClient::default().settings().clone();
    assert_eq!(settings.request_timeout, Duration::from_secs(20));
    assert_eq!(settings.deadline, Duration::from_secs(60));
    assert_eq!(settings.captcha_pause, Duration::from_millis(600));
}
