//! Page-by-page walk over a channel's post history.

use crate::client::ApiClient;
use crate::model::PostList;

/// Lazily fetches listing pages 0, 1, 2, ... until the server returns an empty page.
///
/// A failed request ends the walk the same way an empty page does. The walk also
/// ends after `max_pages` non-empty pages so a server that never runs out of posts
/// cannot keep the run alive forever. Once finished, `next_page` returns `None`
/// without touching the network until `reset` is called.
pub struct PostPager<'a> {
    client: &'a ApiClient,
    channel_id: &'a str,
    per_page: u32,
    max_pages: u32,
    page: u32,
    finished: bool,
}

impl<'a> PostPager<'a> {
    pub fn new(client: &'a ApiClient, channel_id: &'a str, per_page: u32, max_pages: u32) -> Self {
        Self {
            client,
            channel_id,
            per_page,
            max_pages,
            page: 0,
            finished: false,
        }
    }

    /// Index of the page the next call will request.
    pub fn page_index(&self) -> u32 {
        self.page
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Restarts the walk from page 0.
    pub fn reset(&mut self) {
        self.page = 0;
        self.finished = false;
    }

    pub async fn next_page(&mut self) -> Option<PostList> {
        if self.finished {
            return None;
        }

        if self.page >= self.max_pages {
            tracing::warn!(
                max_pages = self.max_pages,
                "Stopped paging after reaching the page limit; totals may be incomplete"
            );
            self.finished = true;
            return None;
        }

        let path = format!("/channels/{}/posts", self.channel_id);
        let query = [
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];

        match self.client.get_json::<PostList>(&path, &query).await {
            Ok(list) if list.is_empty() => {
                tracing::debug!(page = self.page, "Reached the end of the post history");
                self.finished = true;
                None
            }
            Ok(list) => {
                tracing::debug!(page = self.page, posts = list.len(), "Fetched page");
                self.page += 1;
                Some(list)
            }
            Err(e) => {
                tracing::warn!(page = self.page, "Error fetching posts: {e}");
                self.finished = true;
                None
            }
        }
    }
}
