use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use html_escape::decode_html_entities;
use regex::Regex;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::app::{FreshetError, Result};
use crate::fetcher::{FeedFetcher, RawItem};

/// Feed host used when no override is configured.
pub const DEFAULT_FEED_BASE: &str = "https://medium.com";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_FEED_BASE).expect("default feed base is a valid URL")
    }

    /// Build a fetcher against a different feed host, e.g. a mirror.
    pub fn with_base(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("freshet/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self { client, base })
    }

    fn feed_url(&self, username: &str) -> Result<Url> {
        Ok(self.base.join(&format!("feed/@{username}"))?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, username: &str) -> Result<Vec<RawItem>> {
        let url = self.feed_url(username)?;
        debug!(%url, "fetching Medium feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FreshetError::fetch(username, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FreshetError::fetch(username, e))?;

        parse_feed(username, &body)
    }
}

/// Parse a feed document into raw items.
///
/// Fails with a `Fetch` error naming the username when the body is not a
/// recognizable feed.
pub(crate) fn parse_feed(username: &str, body: &[u8]) -> Result<Vec<RawItem>> {
    let feed = parser::parse(body).map_err(|e| FreshetError::fetch(username, e))?;
    Ok(feed.entries.into_iter().map(raw_item).collect())
}

fn raw_item(entry: feed_rs::model::Entry) -> RawItem {
    let content = entry
        .content
        .and_then(|c| c.body)
        .map(|b| decode_html_entities(&b).to_string());
    let snippet = content.as_deref().map(plain_text).filter(|s| !s.is_empty());

    RawItem {
        guid: entry.id,
        title: entry
            .title
            .map(|t| decode_html_entities(&t.content).to_string()),
        link: entry.links.first().map(|l| l.href.clone()),
        pub_date: entry.published,
        iso_date: entry.published.or(entry.updated),
        content,
        snippet,
        creator: entry.authors.first().map(|a| a.name.clone()),
        categories: entry.categories.into_iter().map(|c| c.term).collect(),
    }
}

/// Strip markup and collapse whitespace, leaving the readable text.
fn plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIUM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/" version="2.0">
  <channel>
    <title>Stories by Alice on Medium</title>
    <link>https://medium.com/@alice</link>
    <item>
      <title><![CDATA[Hello, World!]]></title>
      <link>https://medium.com/@alice/hello-world-123</link>
      <guid isPermaLink="false">https://medium.com/p/abc123</guid>
      <category><![CDATA[rust]]></category>
      <category><![CDATA[testing]]></category>
      <dc:creator><![CDATA[Alice Writer]]></dc:creator>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <content:encoded><![CDATA[<h3>Hello</h3><p>First &amp; foremost, a greeting.</p><img src="https://cdn.example.com/hero.png" alt="">]]></content:encoded>
    </item>
    <item>
      <title><![CDATA[Bare Bones]]></title>
      <link>https://medium.com/@alice/bare-bones-456</link>
      <guid isPermaLink="false">https://medium.com/p/def456</guid>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_medium_feed() {
        let items = parse_feed("alice", MEDIUM_SAMPLE.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        let item = &items[0];
        assert_eq!(item.title.as_deref(), Some("Hello, World!"));
        assert_eq!(
            item.link.as_deref(),
            Some("https://medium.com/@alice/hello-world-123")
        );
        assert_eq!(item.guid, "https://medium.com/p/abc123");
        assert_eq!(item.creator.as_deref(), Some("Alice Writer"));
        assert_eq!(item.categories, vec!["rust", "testing"]);
        assert!(item.pub_date.is_some());
        assert_eq!(item.iso_date, item.pub_date);
        assert!(item.content.as_deref().unwrap().contains("<h3>Hello</h3>"));
    }

    #[test]
    fn test_snippet_is_tag_stripped_text() {
        let items = parse_feed("alice", MEDIUM_SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            items[0].snippet.as_deref(),
            Some("Hello First & foremost, a greeting.")
        );
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let items = parse_feed("alice", MEDIUM_SAMPLE.as_bytes()).unwrap();
        let bare = &items[1];
        assert_eq!(bare.content, None);
        assert_eq!(bare.snippet, None);
        assert_eq!(bare.pub_date, None);
        assert!(bare.categories.is_empty());
    }

    #[test]
    fn test_unparseable_body_is_fetch_error() {
        let err = parse_feed("alice", b"this is not xml").unwrap_err();
        assert!(err.to_string().contains("@alice"));
    }

    #[test]
    fn test_feed_url_shape() {
        let fetcher = HttpFetcher::new();
        let url = fetcher.feed_url("alice").unwrap();
        assert_eq!(url.as_str(), "https://medium.com/feed/@alice");
    }

    #[test]
    fn test_feed_url_with_custom_base() {
        let fetcher = HttpFetcher::with_base("https://mirror.example.com").unwrap();
        let url = fetcher.feed_url("bob").unwrap();
        assert_eq!(url.as_str(), "https://mirror.example.com/feed/@bob");
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        assert_eq!(
            plain_text("<p>one</p>\n  <p>two\tthree</p>"),
            "one two three"
        );
    }
}
