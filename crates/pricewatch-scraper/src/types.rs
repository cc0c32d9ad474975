//! Result and attempt types.

use serde::Serialize;

use crate::client::is_captcha_like;

/// Successful resolution, serialized in the shape browsers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub price: f64,
    pub currency: String,
    pub currency_symbol: String,
    pub product_name: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_test_mode: bool,
}

/// One HTTP response as seen by the fetch loop. Never outlives the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    pub status: u16,
    pub body: String,
    /// Rate-limited or showing an anti-bot challenge.
    pub captcha_like: bool,
    /// A 200 that is not a challenge page; only these reach the extractors.
    pub succeeded: bool,
}

impl FetchAttempt {
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        let captcha_like = is_captcha_like(status, &body);
        Self {
            status,
            body,
            captcha_like,
            succeeded: status == 200 && !captcha_like,
        }
    }
}
