//! Channel Metrics - Engagement Report for One Channel
//!
//! Prints member, pinned-post, file, post, reply and reaction counts for a
//! single channel, one `Label: value` line per metric. Diagnostics go to stderr
//! through `tracing`, so stdout only ever carries the report.
//!
//! # Usage
//!
//! ```bash
//! # Everything from the environment
//! SERVER_URL=https://chat.example.com CHANNEL_ID=abc ACCESS_TOKEN=xyz channel-metrics
//!
//! # Legacy details endpoint, per-post reaction lookups
//! channel-metrics --summary details --reactions lookup
//!
//! # JSON output, fail when the summary is unavailable
//! channel-metrics --format json --missing unavailable --strict
//! ```

use anyhow::Context;
use channel_metrics::{ApiClient, Args, Config, MetricsAggregator};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::try_from(args).context("invalid configuration")?;

    if !config.verify_ssl {
        tracing::warn!("TLS certificate verification is disabled; the connection is insecure");
    }

    let client = ApiClient::new(&config).context("failed to build HTTP client")?;

    let report = MetricsAggregator::new(&client, &config).run().await;

    println!("{}", report.render(config.format, config.missing));

    if config.strict && report.summary_failed() {
        tracing::error!("Channel summary could not be fetched");
        std::process::exit(2);
    }

    Ok(())
}
