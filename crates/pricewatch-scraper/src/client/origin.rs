//! URL origin helpers for candidate building and `Referer` headers.

/// Scheme, host and port of an HTTP(S) URL.
///
/// `"https://www.amazon.in/Boat-Rockerz/dp/B08N5WRWNW"` gives
/// `"https://www.amazon.in"`. Returns `None` for input that does not parse or
/// has no tuple origin (`data:`, `file:` and similar).
#[must_use]
pub fn extract_origin(url: &str) -> Option<String> {
    let origin = reqwest::Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// `Referer` value for a candidate: its origin plus a trailing slash.
pub(super) fn referer_for(url: &str) -> Option<String> {
    extract_origin(url).map(|origin| format!("{origin}/"))
}
