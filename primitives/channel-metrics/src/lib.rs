//! Channel Metrics
//!
//! Walks a chat channel's post history through the server's `/api/v4` HTTP API
//! and aggregates engagement counts: members, pinned posts, files, posts,
//! replies and reactions.
//!
//! Every fetch is best effort. A failed call is logged and its value degrades to
//! "unavailable" (printed as `0` by default) while the rest of the run continues.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod model;
pub mod pager;
pub mod reactions;
pub mod report;
pub mod summary;

pub use aggregator::{MetricsAggregator, RunningTotals};
pub use client::{ApiClient, FetchError};
pub use config::{Args, Config, ConfigError};
pub use report::ChannelReport;
pub use summary::ChannelSummary;
