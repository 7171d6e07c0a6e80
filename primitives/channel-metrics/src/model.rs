//! Response payloads.
//!
//! Only the fields the metrics need are modelled. Everything is lenient about
//! absent or `null` collections since servers omit them on older versions.

use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::HashMap;

/// Body of `/channels/{id}/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelStats {
    #[serde(default)]
    pub member_count: Option<u64>,
}

/// Body of the legacy `/channels/{id}` details call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelDetails {
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub guest_count: Option<u64>,
    #[serde(default)]
    pub pinnedpost_count: Option<u64>,
    #[serde(default)]
    pub files_count: Option<u64>,
}

/// One page of the post listing, also returned by `/channels/{id}/pinned`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: HashMap<String, Post>,
}

impl PostList {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub metadata: Option<PostMetadata>,
}

impl Post {
    /// A post is a reply iff it references a parent.
    pub fn is_reply(&self) -> bool {
        !self.parent_id.is_empty()
    }

    pub fn file_count(&self) -> u64 {
        self.file_ids.len() as u64
    }

    /// Reactions embedded in the post metadata, if the server sent any.
    pub fn embedded_reaction_count(&self) -> u64 {
        self.metadata
            .as_ref()
            .map_or(0, |metadata| metadata.reactions.len() as u64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMetadata {
    /// Only the number of entries matters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reactions: Vec<IgnoredAny>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
