//! Runs the summary fetch and the post walk, and accumulates the totals.

use crate::client::ApiClient;
use crate::config::Config;
use crate::model::PostList;
use crate::pager::PostPager;
use crate::reactions::{ReactionSource, Reactions};
use crate::report::ChannelReport;
use crate::summary::ChannelStatsFetcher;
use serde::Serialize;

/// Counters accumulated while paging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunningTotals {
    pub total_posts: u64,
    pub total_replies: u64,
    pub total_reactions: u64,
    pub total_files: u64,
    pub pages_fetched: u64,
}

impl RunningTotals {
    /// Folds one page into the totals. `reactions` is the page's reaction count.
    pub fn record_page(&mut self, page: &PostList, reactions: u64) {
        self.pages_fetched += 1;
        self.total_posts += page.len() as u64;
        self.total_reactions += reactions;

        for post in page.posts.values() {
            if post.is_reply() {
                self.total_replies += 1;
            }
            self.total_files += post.file_count();
        }
    }
}

/// Drives one metrics run against a single channel.
pub struct MetricsAggregator<'a> {
    client: &'a ApiClient,
    config: &'a Config,
}

impl<'a> MetricsAggregator<'a> {
    pub fn new(client: &'a ApiClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    pub async fn run(&self) -> ChannelReport {
        let config = self.config;

        let summary = ChannelStatsFetcher::new(self.client, config.summary)
            .fetch(&config.channel_id)
            .await;

        let mut pager = PostPager::new(
            self.client,
            &config.channel_id,
            config.per_page,
            config.max_pages,
        );
        let mut reactions =
            Reactions::from_mode(config.reactions, self.client, config.reaction_concurrency);
        let mut totals = RunningTotals::default();

        while let Some(page) = pager.next_page().await {
            let source = reactions.get_or_insert_with(|| {
                Reactions::detect(&page, self.client, config.reaction_concurrency)
            });
            let page_reactions = source.count(&page).await;
            totals.record_page(&page, page_reactions);
        }

        tracing::debug!(?totals, "Finished paging");

        ChannelReport::new(summary, totals, config.summary)
    }
}
