pub mod http_fetcher;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// One feed entry as reported by the source, before normalization.
///
/// Absent fields stay `None` here; the transformer decides the defaults.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    /// The feed's per-item identifier, used for diagnostics.
    pub guid: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub iso_date: Option<DateTime<Utc>>,
    /// Raw encoded HTML body (`content:encoded`), entity-decoded.
    pub content: Option<String>,
    /// Plain-text rendition of the body, tags stripped.
    pub snippet: Option<String>,
    /// `dc:creator`, when the feed reports one.
    pub creator: Option<String>,
    pub categories: Vec<String>,
}

#[async_trait]
pub trait FeedFetcher {
    /// Fetch and parse the user's entire feed in one request.
    ///
    /// No retries and no caching at this layer; a single failure is fatal
    /// to the call.
    async fn fetch(&self, username: &str) -> Result<Vec<RawItem>>;
}
