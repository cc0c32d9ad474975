//! `resolve` subcommand: concurrent price lookups printed as JSON lines.

use futures::stream::{self, StreamExt};
use serde_json::{json, Value};

use pricewatch_core::AppConfig;
use pricewatch_scraper::{ExtractionResult, FetchSettings, PriceResolver, ScraperError};

/// Resolves every URL with at most `max_concurrent` in flight and prints one
/// JSON object per URL, in input order. Returns how many failed.
pub(crate) async fn run_resolve(
    config: &AppConfig,
    urls: &[String],
    max_concurrent: usize,
    pretty: bool,
) -> anyhow::Result<usize> {
    let resolver = PriceResolver::new(FetchSettings::from(config));

    let mut results: Vec<(usize, Value, bool)> = stream::iter(urls.iter().enumerate())
        .map(|(index, url)| {
            let resolver = &resolver;
            async move {
                let result = resolver.resolve(url).await;
                (index, outcome_json(url, &result), result.is_ok())
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut failed = 0usize;
    for (_, output, succeeded) in &results {
        if !succeeded {
            failed += 1;
        }
        let line = if pretty {
            serde_json::to_string_pretty(output)?
        } else {
            serde_json::to_string(output)?
        };
        println!("{line}");
    }

    tracing::info!(total = urls.len(), failed, "resolve finished");
    Ok(failed)
}

/// Wraps a resolution in `{url, status, body}`, where `body` is either the
/// extraction result or the error body browsers would receive.
pub(crate) fn outcome_json(url: &str, result: &Result<ExtractionResult, ScraperError>) -> Value {
    match result {
        Ok(extraction) => json!({
            "url": url,
            "status": 200,
            "body": extraction,
        }),
        Err(e) => {
            tracing::warn!(url, error = %e, "price resolution failed");
            json!({
                "url": url,
                "status": e.status_code(),
                "kind": e.kind(),
                "body": e.to_body(),
            })
        }
    }
}
