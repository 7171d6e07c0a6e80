//! Run configuration.
//!
//! Every setting is a command-line flag that can also be supplied through the
//! environment. `Args` is what clap parses; `Config` is the validated form that
//! the rest of the crate is handed by reference.

use clap::{ArgAction, Parser, ValueEnum, builder::BoolishValueParser};
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Largest page size the listing endpoint accepts.
pub const MAX_PER_PAGE: u32 = 200;

/// Channel engagement metrics for a Mattermost-compatible server.
#[derive(Parser, Debug, Clone)]
#[command(name = "channel-metrics")]
#[command(about = "Prints engagement metrics for a single chat channel")]
pub struct Args {
    /// Base URL of the chat server.
    #[arg(long, env = "SERVER_URL")]
    pub server_url: String,

    /// Channel to inspect.
    #[arg(long, env = "CHANNEL_ID")]
    pub channel_id: String,

    /// Bearer token sent with every request.
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Verify TLS certificates.
    #[arg(
        long,
        env = "VERIFY_SSL",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub verify_ssl: bool,

    /// Posts requested per page.
    #[arg(long, env = "PER_PAGE", default_value = "60")]
    pub per_page: u32,

    /// Stop paging after this many pages even if the server keeps returning posts.
    #[arg(long, env = "MAX_PAGES", default_value = "10000")]
    pub max_pages: u32,

    /// Request timeout in seconds.
    #[arg(short, long, env = "REQUEST_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Where member and pinned counts come from.
    #[arg(long, env = "SUMMARY_SOURCE", value_enum, default_value = "stats")]
    pub summary: SummarySource,

    /// How reactions are counted.
    #[arg(long, env = "REACTION_SOURCE", value_enum, default_value = "auto")]
    pub reactions: ReactionMode,

    /// Concurrent per-post reaction lookups.
    #[arg(long, env = "REACTION_CONCURRENCY", default_value = "8")]
    pub reaction_concurrency: usize,

    /// How metrics that could not be fetched are printed.
    #[arg(long, env = "MISSING_VALUES", value_enum, default_value = "zero")]
    pub missing: MissingValues,

    /// Output format.
    #[arg(short, long, env = "OUTPUT_FORMAT", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with status 2 when the channel summary could not be fetched.
    #[arg(long, env = "STRICT")]
    pub strict: bool,
}

/// Endpoint family used for the channel summary.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    /// `/channels/{id}/stats` plus `/channels/{id}/pinned`.
    Stats,
    /// Legacy `/channels/{id}` details, which also carries the guest count.
    Details,
}

/// Reaction counting strategy.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionMode {
    /// Pick based on whether listed posts carry metadata.
    Auto,
    /// Read `metadata.reactions` from each listed post.
    Embedded,
    /// One `/posts/{id}/reactions` call per post.
    Lookup,
}

/// Rendering of metrics that could not be fetched.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValues {
    Zero,
    Unavailable,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("per-page must be between 1 and 200, got {0}")]
    PerPage(u32),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server base URL without a trailing slash.
    pub server_url: String,
    pub channel_id: String,
    pub access_token: String,
    pub verify_ssl: bool,
    pub per_page: u32,
    pub max_pages: u32,
    pub timeout: Duration,
    pub summary: SummarySource,
    pub reactions: ReactionMode,
    pub reaction_concurrency: usize,
    pub missing: MissingValues,
    pub format: OutputFormat,
    pub strict: bool,
}

impl Config {
    /// Builds a config with default tuning for the given server, channel and token.
    pub fn new(
        server_url: impl Into<String>,
        channel_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Args {
            server_url: server_url.into(),
            channel_id: channel_id.into(),
            access_token: access_token.into(),
            verify_ssl: true,
            per_page: 60,
            max_pages: 10_000,
            timeout: 30,
            summary: SummarySource::Stats,
            reactions: ReactionMode::Auto,
            reaction_concurrency: 8,
            missing: MissingValues::Zero,
            format: OutputFormat::Text,
            strict: false,
        }
        .try_into()
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let server_url = args.server_url.trim().trim_end_matches('/').to_string();
        if server_url.is_empty() {
            return Err(ConfigError::Empty("server URL"));
        }

        match Url::parse(&server_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidUrl {
                    url: server_url,
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidUrl {
                    url: server_url,
                    reason: e.to_string(),
                });
            }
        }

        let channel_id = args.channel_id.trim().to_string();
        if channel_id.is_empty() {
            return Err(ConfigError::Empty("channel id"));
        }

        let access_token = args.access_token.trim().to_string();
        if access_token.is_empty() {
            return Err(ConfigError::Empty("access token"));
        }

        if args.per_page == 0 || args.per_page > MAX_PER_PAGE {
            return Err(ConfigError::PerPage(args.per_page));
        }
        if args.max_pages == 0 {
            return Err(ConfigError::Zero("max-pages"));
        }
        if args.timeout == 0 {
            return Err(ConfigError::Zero("timeout"));
        }
        if args.reaction_concurrency == 0 {
            return Err(ConfigError::Zero("reaction-concurrency"));
        }

        Ok(Self {
            server_url,
            channel_id,
            access_token,
            verify_ssl: args.verify_ssl,
            per_page: args.per_page,
            max_pages: args.max_pages,
            timeout: Duration::from_secs(args.timeout),
            summary: args.summary,
            reactions: args.reactions,
            reaction_concurrency: args.reaction_concurrency,
            missing: args.missing,
            format: args.format,
            strict: args.strict,
        })
    }
}
