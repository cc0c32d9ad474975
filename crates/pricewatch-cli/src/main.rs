mod resolve;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch-cli")]
#[command(about = "Look up current prices on retailer product pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the current price of one or more product URLs
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Pretty-print each JSON result
        #[arg(long)]
        pretty: bool,
        /// Maximum URLs resolved at once (overrides `PRICEWATCH_MAX_CONCURRENT_RESOLVES`)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Decide whether a tracked price change should send an alert
    Notify {
        #[arg(long)]
        old: f64,
        #[arg(long)]
        new: f64,
        #[arg(long)]
        target: f64,
        /// An alert was already sent for the current dip
        #[arg(long)]
        notified: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Resolve {
            urls,
            pretty,
            concurrency,
        }) => {
            let max_concurrent = concurrency.unwrap_or(config.max_concurrent_resolves);
            let failed = resolve::run_resolve(&config, &urls, max_concurrent, pretty).await?;
            if failed > 0 {
                anyhow::bail!("{failed} of {} URLs could not be resolved", urls.len());
            }
        }
        Some(Commands::Notify {
            old,
            new,
            target,
            notified,
        }) => {
            let decision = pricewatch_core::evaluate_price_update(old, new, target, notified);
            println!("{}", serde_json::to_string(&decision)?);
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
