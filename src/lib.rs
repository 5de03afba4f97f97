//! # Freshet
//!
//! Cache-first ingestion of a Medium user's RSS feed into normalized
//! [`Post`](domain::Post) records.
//!
//! ## Architecture
//!
//! Freshet is a small linear pipeline:
//!
//! ```text
//! Fetcher → Transformer → JsonCache
//!     └────────── Ingestor ─────────┘
//! ```
//!
//! - [`fetcher`]: one HTTP GET per call, feed parsing via feed-rs
//! - [`transform`]: pure per-item normalization (slug, hero image,
//!   excerpt, boilerplate stripping, canonical link, date defaults)
//! - [`store`]: whole-batch JSON file cache keyed by username
//! - [`ingest`]: the cache-first orchestration gluing them together
//!
//! ## Quick start
//!
//! ```no_run
//! use freshet::{Config, Ingestor};
//!
//! # async fn run() -> freshet::Result<()> {
//! let ingestor = Ingestor::new();
//! let posts = ingestor
//!     .get_posts(&Config::with_cache("alice", ".cache/medium"))
//!     .await?;
//! for post in &posts {
//!     println!("{}: {}", post.slug, post.display_title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A non-empty cached batch short-circuits the network entirely; a missing,
//! empty, or corrupt cache falls through to a full fetch that replaces the
//! cached batch. Cache faults never fail a call.

/// Error types and the crate-wide `Result` alias.
pub mod app;

/// Typed ingestion configuration with TOML support.
pub mod config;

/// The normalized post record.
pub mod domain;

/// Feed fetching: the [`FeedFetcher`](fetcher::FeedFetcher) trait and the
/// reqwest-backed [`HttpFetcher`](fetcher::HttpFetcher).
pub mod fetcher;

/// Cache-first orchestration.
pub mod ingest;

/// JSON file cache for post batches.
pub mod store;

/// Raw item to [`Post`](domain::Post) normalization rules.
pub mod transform;

pub use app::{FreshetError, Result};
pub use config::{CacheConfig, Config};
pub use domain::Post;
pub use fetcher::{FeedFetcher, HttpFetcher, RawItem};
pub use ingest::Ingestor;
pub use store::JsonCache;
pub use transform::Transformer;

/// Fetch a user's posts with the default HTTP fetcher.
///
/// Convenience wrapper over [`Ingestor::get_posts`] for hosts that do not
/// need to hold an ingestor.
pub async fn get_posts(config: &Config) -> Result<Vec<Post>> {
    Ingestor::new().get_posts(config).await
}
