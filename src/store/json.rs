//! File-backed post cache.
//!
//! One JSON file per username, whole-batch granularity. The cache is an
//! optimization, never required for correctness: every read-side fault is
//! reported as an empty batch, which callers treat as a miss. Writes are
//! not atomic; a truncated file parses as malformed on the next read and
//! the batch is simply re-fetched.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::Post;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache file does not exist: {0}")]
    Missing(PathBuf),

    #[error("Malformed cache file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode cache for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct JsonCache;

impl JsonCache {
    pub fn new() -> Self {
        Self
    }

    /// Load a cached batch, treating every fault as a miss.
    ///
    /// An empty return means "no usable cache", never "the feed has zero
    /// posts"; faults are logged at warn level and absorbed.
    pub fn read(&self, path: &Path) -> Vec<Post> {
        match self.try_read(path) {
            Ok(posts) => {
                info!(path = %path.display(), count = posts.len(), "loaded posts from cache");
                posts
            }
            Err(CacheError::Missing(_)) => {
                warn!(path = %path.display(), "cache file does not exist");
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "failed to load cache, treating as miss");
                Vec::new()
            }
        }
    }

    /// Read variant that keeps "missing" and "malformed" distinct.
    pub fn try_read(&self, path: &Path) -> Result<Vec<Post>, CacheError> {
        if !path.exists() {
            return Err(CacheError::Missing(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&raw).map_err(|e| CacheError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serialize the full batch, overwriting any existing file.
    ///
    /// Intermediate directories are created as needed.
    pub fn write(&self, path: &Path, posts: &[Post]) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(posts).map_err(|e| CacheError::Encode {
            path: path.to_path_buf(),
            source: e,
        })?;

        fs::write(path, json).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(path = %path.display(), count = posts.len(), "wrote posts to cache");
        Ok(())
    }
}
