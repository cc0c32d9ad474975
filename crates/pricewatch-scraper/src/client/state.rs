//! Attempt bookkeeping for one resolution.
//!
//! Outcomes are folded into a [`FetchState`] in the order attempts ran. The
//! state only ever moves up `NoResponse < HtmlNoPrice < CaptchaSeen <
//! PriceFound`, and [`FetchState::finish`] maps whatever is left when the
//! candidates run out to the caller-facing result.

use crate::currency::Currency;
use crate::error::ScraperError;
use crate::extract::ExtractedPrice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportFailure {
    Timeout,
    Connect,
    Other,
}

impl TransportFailure {
    pub(crate) fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportFailure::Timeout
        } else if error.is_connect() {
            TransportFailure::Connect
        } else {
            TransportFailure::Other
        }
    }
}

/// A 200 page that yielded a price.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PricedPage {
    pub url: String,
    pub price: ExtractedPrice,
    pub currency: Currency,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AttemptOutcome {
    Transport(TransportFailure),
    Captcha,
    Rejected { status: u16 },
    NoPrice { product_name: String },
    Priced(PricedPage),
}

/// Failure tally while nothing usable has come back yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Misses {
    pub timeouts: u32,
    pub connect_failures: u32,
    pub other_failures: u32,
    pub rejected: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FetchState {
    NoResponse(Misses),
    /// Best page so far: fetched fine, no price on it.
    HtmlNoPrice { product_name: String },
    CaptchaSeen { product_name: Option<String> },
    PriceFound(PricedPage),
}

impl FetchState {
    pub(crate) fn initial() -> Self {
        FetchState::NoResponse(Misses::default())
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self, FetchState::PriceFound(_))
    }

    #[must_use]
    pub(crate) fn apply(self, outcome: AttemptOutcome) -> Self {
        match (self, outcome) {
            (done @ FetchState::PriceFound(_), _) => done,
            (_, AttemptOutcome::Priced(page)) => FetchState::PriceFound(page),

            (
                FetchState::CaptchaSeen { product_name },
                AttemptOutcome::NoPrice { product_name: name },
            ) => FetchState::CaptchaSeen {
                product_name: product_name.or(Some(name)),
            },
            (state @ FetchState::CaptchaSeen { .. }, _) => state,

            (FetchState::HtmlNoPrice { product_name }, AttemptOutcome::Captcha) => {
                FetchState::CaptchaSeen {
                    product_name: Some(product_name),
                }
            }
            (state @ FetchState::HtmlNoPrice { .. }, _) => state,

            (FetchState::NoResponse(_), AttemptOutcome::Captcha) => {
                FetchState::CaptchaSeen { product_name: None }
            }
            (FetchState::NoResponse(_), AttemptOutcome::NoPrice { product_name }) => {
                FetchState::HtmlNoPrice { product_name }
            }
            (FetchState::NoResponse(mut misses), AttemptOutcome::Rejected { .. }) => {
                misses.rejected += 1;
                FetchState::NoResponse(misses)
            }
            (FetchState::NoResponse(mut misses), AttemptOutcome::Transport(failure)) => {
                match failure {
                    TransportFailure::Timeout => misses.timeouts += 1,
                    TransportFailure::Connect => misses.connect_failures += 1,
                    TransportFailure::Other => misses.other_failures += 1,
                }
                FetchState::NoResponse(misses)
            }
        }
    }

    /// Terminal mapping once no more attempts will run.
    ///
    /// `deadline_expired` turns an otherwise empty-handed resolution into a
    /// timeout.
    pub(crate) fn finish(
        self,
        url: &str,
        canonical: &str,
        deadline_expired: bool,
    ) -> Result<PricedPage, ScraperError> {
        let url = url.to_owned();
        match self {
            FetchState::PriceFound(page) => Ok(page),
            FetchState::CaptchaSeen { .. } => Err(ScraperError::CaptchaBlocked {
                url,
                suggested_url: canonical.to_owned(),
            }),
            FetchState::HtmlNoPrice { .. } => Err(ScraperError::PriceNotFound { url }),
            FetchState::NoResponse(_) if deadline_expired => Err(ScraperError::Timeout { url }),
            FetchState::NoResponse(misses) => Err(no_response_error(misses, url)),
        }
    }
}

fn no_response_error(misses: Misses, url: String) -> ScraperError {
    let only_transport = misses.rejected == 0 && misses.other_failures == 0;
    if only_transport && misses.connect_failures == 0 && misses.timeouts > 0 {
        ScraperError::Timeout { url }
    } else if only_transport && misses.connect_failures > 0 {
        ScraperError::ConnectionError { url }
    } else {
        ScraperError::FetchFailed { url }
    }
}
