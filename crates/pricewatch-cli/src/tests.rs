use super::*;

use pricewatch_scraper::{ExtractionResult, ScraperError};

#[test]
fn parses_single_resolve_url() {
    let cli = Cli::try_parse_from(["pricewatch-cli", "resolve", "test://mock"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Resolve {
            urls,
            pretty,
            concurrency,
        }) => {
            assert_eq!(urls, vec!["test://mock".to_owned()]);
            assert!(!pretty);
            assert!(concurrency.is_none());
        }
        other => panic!("expected Resolve, got {other:?}"),
    }
}

#[test]
fn parses_resolve_with_flags() {
    let cli = Cli::try_parse_from([
        "pricewatch-cli",
        "resolve",
        "https://www.amazon.in/dp/B08N5WRWNW",
        "https://www.flipkart.com/p/itm1",
        "--pretty",
        "--concurrency",
        "2",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Resolve {
            ref urls,
            pretty: true,
            concurrency: Some(2),
        }) if urls.len() == 2
    ));
}

#[test]
fn resolve_requires_a_url() {
    assert!(Cli::try_parse_from(["pricewatch-cli", "resolve"]).is_err());
}

#[test]
fn parses_notify_command() {
    let cli = Cli::try_parse_from([
        "pricewatch-cli",
        "notify",
        "--old",
        "1299",
        "--new",
        "999.5",
        "--target",
        "1000",
        "--notified",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Notify {
            old,
            new,
            target,
            notified,
        }) => {
            assert!((old - 1299.0).abs() < f64::EPSILON);
            assert!((new - 999.5).abs() < f64::EPSILON);
            assert!((target - 1000.0).abs() < f64::EPSILON);
            assert!(notified);
        }
        other => panic!("expected Notify, got {other:?}"),
    }
}

#[test]
fn notify_requires_target() {
    let result = Cli::try_parse_from(["pricewatch-cli", "notify", "--old", "1", "--new", "2"]);
    assert!(result.is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricewatch-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn success_outcome_wraps_result() {
    let result: Result<ExtractionResult, ScraperError> = Ok(ExtractionResult {
        price: 299.0,
        currency: "INR".to_owned(),
        currency_symbol: "₹".to_owned(),
        product_name: "Steel Bottle".to_owned(),
        source_url: "https://www.ajio.com/p/1".to_owned(),
        is_test_mode: false,
    });
    let json = resolve::outcome_json("https://www.ajio.com/p/1", &result);

    assert_eq!(json["status"], 200);
    assert_eq!(json["body"]["price"], 299.0);
    assert_eq!(json["body"]["currencySymbol"], "₹");
}

#[test]
fn error_outcome_carries_status_and_suggestion() {
    let result: Result<ExtractionResult, ScraperError> = Err(ScraperError::CaptchaBlocked {
        url: "https://www.amazon.in/x/dp/B08N5WRWNW".to_owned(),
        suggested_url: "https://www.amazon.in/dp/B08N5WRWNW".to_owned(),
    });
    let json = resolve::outcome_json("https://www.amazon.in/x/dp/B08N5WRWNW", &result);

    assert_eq!(json["status"], 429);
    assert_eq!(json["kind"], "CAPTCHA_BLOCKED");
    assert_eq!(
        json["body"]["suggestedUrl"],
        "https://www.amazon.in/dp/B08N5WRWNW"
    );
}
