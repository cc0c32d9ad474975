pub mod client;
pub mod currency;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod price;
pub mod site;
pub mod types;

pub use client::{FetchSettings, HeaderVariant, PriceClient};
pub use currency::{detect_currency, Currency};
pub use error::{ErrorBody, ErrorKind, ScraperError};
pub use extract::{analyze_page, PageAnalysis};
pub use pipeline::PriceResolver;
pub use price::parse_price;
pub use site::{classify_site, SiteId, SiteInfo};
pub use types::{ExtractionResult, FetchAttempt};
