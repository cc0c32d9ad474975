//! Sequential fetch loop over URL candidates and header variants.

mod candidates;
mod captcha;
mod headers;
mod origin;
mod state;

use std::sync::Arc;
use std::time::Duration;

use pricewatch_core::AppConfig;
use reqwest::cookie::Jar;
use reqwest::Client;
use tokio::time::Instant;

use crate::error::ScraperError;
use crate::extract::analyze_page;
use crate::site::{SiteId, SiteInfo};
use crate::types::{ExtractionResult, FetchAttempt};

pub use candidates::{canonical_url, extract_amazon_asin, fetch_candidates};
pub use captcha::is_captcha_like;
pub use headers::HeaderVariant;
pub use origin::extract_origin;

use headers::request_headers;
use state::{AttemptOutcome, FetchState, PricedPage, TransportFailure};

/// Cookies that pin Amazon to the Indian storefront in English.
const AMAZON_COOKIES: [&str; 2] = ["i18n-prefs=INR; Path=/", "lc-main=en_IN; Path=/"];

/// Timing knobs for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Wall-clock budget across every attempt. No attempt starts after it
    /// and each request's timeout is clamped to what is left.
    pub deadline: Duration,
    pub captcha_pause: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            deadline: Duration::from_secs(60),
            captcha_pause: Duration::from_millis(600),
        }
    }
}

impl From<&AppConfig> for FetchSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            deadline: Duration::from_secs(config.resolve_deadline_secs),
            captcha_pause: Duration::from_millis(config.captcha_pause_ms),
        }
    }
}

/// Fetches a product page and extracts its price.
///
/// Every call builds its own `reqwest::Client` and cookie jar, so concurrent
/// resolutions share no connection or cookie state.
#[derive(Debug, Clone, Default)]
pub struct PriceClient {
    settings: FetchSettings,
}

impl PriceClient {
    #[must_use]
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Tries each candidate URL with each [`HeaderVariant`] in turn until one
    /// page yields a price or the candidates or the deadline run out.
    ///
    /// `url` must already be validated; no scheme or host checks happen here.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::CaptchaBlocked`]: some attempt hit an anti-bot page
    ///   and none produced a price.
    /// - [`ScraperError::PriceNotFound`]: a page loaded but had no price.
    /// - [`ScraperError::Timeout`]: every attempt timed out, or the deadline
    ///   passed before anything usable came back.
    /// - [`ScraperError::ConnectionError`]: only connection failures.
    /// - [`ScraperError::FetchFailed`]: any other mix of failures.
    /// - [`ScraperError::Http`]: the HTTP client could not be built.
    pub async fn fetch_price(
        &self,
        url: &str,
        site: &SiteInfo,
    ) -> Result<ExtractionResult, ScraperError> {
        let deadline = Instant::now() + self.settings.deadline;
        let canonical = canonical_url(url, site.site);
        let candidates = fetch_candidates(url, site.site);
        let session = self.session(site.site, &candidates)?;

        tracing::debug!(
            url,
            site = %site.site,
            candidates = candidates.len(),
            "starting fetch loop"
        );

        let mut state = FetchState::initial();
        let mut deadline_expired = false;

        'candidates: for candidate in &candidates {
            for variant in HeaderVariant::ALL {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    deadline_expired = true;
                    tracing::warn!(url, "resolution deadline reached");
                    break 'candidates;
                }

                let outcome = self
                    .attempt(&session, candidate, site, variant, remaining)
                    .await;
                let captcha = outcome == AttemptOutcome::Captcha;
                state = state.apply(outcome);
                if state.is_done() {
                    break 'candidates;
                }

                if captcha {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    tokio::time::sleep(self.settings.captcha_pause.min(remaining)).await;
                }
            }
        }

        match &state {
            FetchState::HtmlNoPrice { product_name }
            | FetchState::CaptchaSeen {
                product_name: Some(product_name),
            } => {
                tracing::debug!(url, product_name = %product_name, "best page had no price");
            }
            _ => {}
        }

        let page = state.finish(url, &canonical, deadline_expired)?;
        Ok(into_result(page))
    }

    /// Per-resolution HTTP client with a fresh cookie jar. Amazon jars are
    /// seeded for every candidate host.
    fn session(&self, site: SiteId, candidates: &[String]) -> Result<Client, ScraperError> {
        let jar = Arc::new(Jar::default());
        if site == SiteId::Amazon {
            for candidate in candidates {
                let Ok(parsed) = reqwest::Url::parse(candidate) else {
                    continue;
                };
                for cookie in AMAZON_COOKIES {
                    jar.add_cookie_str(cookie, &parsed);
                }
            }
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .connect_timeout(self.settings.connect_timeout)
            .build()?;
        Ok(client)
    }

    async fn attempt(
        &self,
        session: &Client,
        candidate: &str,
        site: &SiteInfo,
        variant: HeaderVariant,
        remaining: Duration,
    ) -> AttemptOutcome {
        let response = session
            .get(candidate)
            .headers(request_headers(candidate, site.site, variant))
            .timeout(self.settings.request_timeout.min(remaining))
            .send()
            .await;

        let attempt = match response {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(body) => FetchAttempt::new(status, body),
                    Err(e) => return transport_failure(candidate, variant, &e),
                }
            }
            Err(e) => return transport_failure(candidate, variant, &e),
        };

        tracing::debug!(
            url = candidate,
            ?variant,
            status = attempt.status,
            captcha_like = attempt.captcha_like,
            "fetch attempt"
        );

        if attempt.captcha_like {
            tracing::warn!(url = candidate, status = attempt.status, "anti-bot response");
            return AttemptOutcome::Captcha;
        }
        if !attempt.succeeded {
            return AttemptOutcome::Rejected {
                status: attempt.status,
            };
        }

        let page = analyze_page(&attempt.body, site);
        match page.price {
            Some(price) => AttemptOutcome::Priced(PricedPage {
                url: candidate.to_owned(),
                price,
                currency: page.currency,
                product_name: page.product_name,
            }),
            None => AttemptOutcome::NoPrice {
                product_name: page.product_name,
            },
        }
    }
}

fn transport_failure(
    candidate: &str,
    variant: HeaderVariant,
    error: &reqwest::Error,
) -> AttemptOutcome {
    let failure = TransportFailure::from_reqwest(error);
    tracing::warn!(url = candidate, ?variant, ?failure, error = %error, "request failed");
    AttemptOutcome::Transport(failure)
}

fn into_result(page: PricedPage) -> ExtractionResult {
    tracing::info!(
        url = %page.url,
        price = page.price.value,
        currency = %page.currency.code,
        source = ?page.price.source,
        "price resolved"
    );
    ExtractionResult {
        price: page.price.value,
        currency: page.currency.code,
        currency_symbol: page.currency.symbol,
        product_name: page.product_name,
        source_url: page.url,
        is_test_mode: false,
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
