//! Reaction counting.
//!
//! Newer servers embed each post's reactions in `metadata.reactions`, so a page
//! can be counted without further requests. Older servers only expose
//! `/posts/{id}/reactions`, which costs one round trip per post.

use crate::client::ApiClient;
use crate::config::ReactionMode;
use crate::model::PostList;
use futures::{StreamExt, stream};
use serde::de::IgnoredAny;
use std::future::Future;

/// Counts the reactions attached to the posts of one listing page.
pub trait ReactionSource {
    fn count(&self, page: &PostList) -> impl Future<Output = u64>;
}

/// Reads reactions already present in the listing response.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedReactions;

impl ReactionSource for EmbeddedReactions {
    async fn count(&self, page: &PostList) -> u64 {
        page.posts
            .values()
            .map(|post| post.embedded_reaction_count())
            .sum()
    }
}

/// Fetches the reaction list of every post individually.
#[derive(Debug, Clone)]
pub struct ReactionLookup<'a> {
    client: &'a ApiClient,
    concurrency: usize,
}

impl<'a> ReactionLookup<'a> {
    pub fn new(client: &'a ApiClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    async fn count_post(&self, post_id: &str) -> u64 {
        match self
            .client
            .get_json::<Option<Vec<IgnoredAny>>>(&format!("/posts/{post_id}/reactions"), &[])
            .await
        {
            Ok(reactions) => reactions.map_or(0, |r| r.len() as u64),
            Err(e) => {
                tracing::warn!(post_id, "Error counting reactions: {e}");
                0
            }
        }
    }
}

impl ReactionSource for ReactionLookup<'_> {
    async fn count(&self, page: &PostList) -> u64 {
        stream::iter(page.posts.keys())
            .map(|post_id| self.count_post(post_id))
            .buffer_unordered(self.concurrency)
            .fold(0, |total, n| async move { total + n })
            .await
    }
}

/// The reaction source chosen for a run.
#[derive(Debug, Clone)]
pub enum Reactions<'a> {
    Embedded(EmbeddedReactions),
    Lookup(ReactionLookup<'a>),
}

impl<'a> Reactions<'a> {
    /// Resolves an explicit mode. `Auto` needs a page to inspect and yields `None`.
    pub fn from_mode(
        mode: ReactionMode,
        client: &'a ApiClient,
        concurrency: usize,
    ) -> Option<Self> {
        match mode {
            ReactionMode::Auto => None,
            ReactionMode::Embedded => Some(Self::Embedded(EmbeddedReactions)),
            ReactionMode::Lookup => Some(Self::Lookup(ReactionLookup::new(client, concurrency))),
        }
    }

    /// Picks the embedded source when the server attaches metadata to listed posts.
    pub fn detect(page: &PostList, client: &'a ApiClient, concurrency: usize) -> Self {
        if supports_embedded(page) {
            tracing::debug!("Posts carry metadata; reading embedded reactions");
            Self::Embedded(EmbeddedReactions)
        } else {
            tracing::debug!("Posts carry no metadata; looking up reactions per post");
            Self::Lookup(ReactionLookup::new(client, concurrency))
        }
    }
}

impl ReactionSource for Reactions<'_> {
    async fn count(&self, page: &PostList) -> u64 {
        match self {
            Self::Embedded(source) => source.count(page).await,
            Self::Lookup(source) => source.count(page).await,
        }
    }
}

/// True when any post on the page carries a `metadata` object.
pub fn supports_embedded(page: &PostList) -> bool {
    page.posts.values().any(|post| post.metadata.is_some())
}
