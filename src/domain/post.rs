use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized Medium post.
///
/// Produced once by the transformer and treated as immutable afterwards;
/// the cache store only serializes and deserializes it. Field names follow
/// the cache file's camelCase convention so batches written by earlier
/// tooling stay readable.
///
/// `pub_date` and `iso_date` are always `Some` when a post comes out of the
/// transformer (epoch-zero when the feed omitted the date). They are `None`
/// only when rehydrated from a cache record that predates the field, which
/// means "unknown", not "source omitted it".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub iso_date: Option<DateTime<Utc>>,
    pub description: String,
    pub content: String,
    pub canonical: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl Post {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
