//! Channel summary: member, guest and pinned-post counts.

use crate::client::ApiClient;
use crate::config::SummarySource;
use crate::model::{ChannelDetails, ChannelStats, PostList};

/// Summary counts read once per run. `None` marks a value that could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSummary {
    pub member_count: Option<u64>,
    pub guest_count: Option<u64>,
    pub pinned_post_count: Option<u64>,
    /// Server-side file count, only returned by the legacy details endpoint.
    /// Informational; the report's files count is summed from the posts.
    pub reported_files_count: Option<u64>,
    /// Set when any summary call failed or came back incomplete.
    pub degraded: bool,
}

/// Reads the channel summary. Failures degrade to `None` and are logged.
pub struct ChannelStatsFetcher<'a> {
    client: &'a ApiClient,
    source: SummarySource,
}

impl<'a> ChannelStatsFetcher<'a> {
    pub fn new(client: &'a ApiClient, source: SummarySource) -> Self {
        Self { client, source }
    }

    pub async fn fetch(&self, channel_id: &str) -> ChannelSummary {
        match self.source {
            SummarySource::Stats => self.fetch_stats(channel_id).await,
            SummarySource::Details => self.fetch_details(channel_id).await,
        }
    }

    async fn fetch_stats(&self, channel_id: &str) -> ChannelSummary {
        let mut summary = ChannelSummary::default();

        match self
            .client
            .get_json::<ChannelStats>(&format!("/channels/{channel_id}/stats"), &[])
            .await
        {
            Ok(stats) => {
                summary.member_count = summary.require(stats.member_count, "member_count");
            }
            Err(e) => {
                tracing::warn!("Error fetching channel stats: {e}");
                summary.degraded = true;
            }
        }

        match self
            .client
            .get_json::<PostList>(&format!("/channels/{channel_id}/pinned"), &[])
            .await
        {
            Ok(pinned) => summary.pinned_post_count = Some(pinned.order.len() as u64),
            Err(e) => {
                tracing::warn!("Error fetching pinned posts: {e}");
                summary.degraded = true;
            }
        }

        summary
    }

    async fn fetch_details(&self, channel_id: &str) -> ChannelSummary {
        let mut summary = ChannelSummary::default();

        match self
            .client
            .get_json::<ChannelDetails>(&format!("/channels/{channel_id}"), &[])
            .await
        {
            Ok(details) => {
                summary.member_count = summary.require(details.member_count, "member_count");
                summary.guest_count = summary.require(details.guest_count, "guest_count");
                summary.pinned_post_count =
                    summary.require(details.pinnedpost_count, "pinnedpost_count");
                summary.reported_files_count = details.files_count;
                tracing::debug!(files_count = ?details.files_count, "Server-reported file count");
            }
            Err(e) => {
                tracing::warn!("Error fetching channel details: {e}");
                summary.degraded = true;
            }
        }

        summary
    }
}

impl ChannelSummary {
    fn require(&mut self, value: Option<u64>, field: &str) -> Option<u64> {
        if value.is_none() {
            tracing::warn!("Channel summary response is missing `{field}`");
            self.degraded = true;
        }
        value
    }
}
