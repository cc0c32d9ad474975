use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("URL is required")]
    UrlRequired,

    /// `reason` is the user-facing message.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("anti-bot challenge on every attempt for {url}")]
    CaptchaBlocked { url: String, suggested_url: String },

    #[error("no usable response from {url}")]
    FetchFailed { url: String },

    #[error("page fetched but no price found at {url}")]
    PriceNotFound { url: String },

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("could not connect to {url}")]
    ConnectionError { url: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse failure category exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    UrlRequired,
    InvalidUrl,
    CaptchaBlocked,
    FetchFailed,
    PriceNotFound,
    Timeout,
    ConnectionError,
    Internal,
}

/// Error payload in the shape the web layer returns to browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_url: Option<String>,
}

impl ScraperError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScraperError::UrlRequired => ErrorKind::UrlRequired,
            ScraperError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ScraperError::CaptchaBlocked { .. } => ErrorKind::CaptchaBlocked,
            ScraperError::FetchFailed { .. } => ErrorKind::FetchFailed,
            ScraperError::PriceNotFound { .. } => ErrorKind::PriceNotFound,
            ScraperError::Timeout { .. } => ErrorKind::Timeout,
            ScraperError::ConnectionError { .. } => ErrorKind::ConnectionError,
            ScraperError::Http(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status the web layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::UrlRequired | ErrorKind::InvalidUrl => 400,
            ErrorKind::CaptchaBlocked => 429,
            ErrorKind::FetchFailed | ErrorKind::ConnectionError => 502,
            ErrorKind::PriceNotFound => 404,
            ErrorKind::Timeout => 504,
            ErrorKind::Internal => 500,
        }
    }

    /// User-facing message and, for anti-bot blocks, the URL worth retrying.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let error = match self {
            ScraperError::UrlRequired => "URL is required".to_owned(),
            ScraperError::InvalidUrl { reason, .. } => reason.clone(),
            ScraperError::CaptchaBlocked { .. } => "Website temporarily blocked automated access (captcha). Please retry in a minute with a direct product URL.".to_owned(),
            ScraperError::FetchFailed { .. } => {
                "Could not fetch product page. Please verify the URL and try again.".to_owned()
            }
            ScraperError::PriceNotFound { .. } => {
                "Could not find price on this page. Use a product page URL with visible price."
                    .to_owned()
            }
            ScraperError::Timeout { .. } => "Request timed out. Please try again.".to_owned(),
            ScraperError::ConnectionError { .. } => {
                "Could not connect to the website. Please check the URL.".to_owned()
            }
            ScraperError::Http(e) => format!("Error: {e}"),
        };
        let suggested_url = match self {
            ScraperError::CaptchaBlocked { suggested_url, .. } => Some(suggested_url.clone()),
            _ => None,
        };
        ErrorBody {
            error,
            suggested_url,
        }
    }
}
