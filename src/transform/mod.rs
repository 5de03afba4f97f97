//! Raw feed items to normalized [`Post`] records.
//!
//! Pure and infallible: malformed or missing source fields degrade to
//! defaults instead of erroring, so one bad item never poisons a batch.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use tracing::warn;

use crate::domain::Post;
use crate::fetcher::RawItem;

/// Maximum whitespace-delimited tokens kept in a description.
const DESCRIPTION_TOKENS: usize = 32;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src=["']([^"'>]+)["']"#).expect("img pattern is valid")
});

// Medium appends an attribution paragraph to every syndicated body. It is
// stripped here because the canonical snippet replaces it.
static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<hr><p>.*?was originally published in.*?</p>")
        .expect("boilerplate pattern is valid")
});

#[derive(Debug, Clone, Default)]
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize one raw item into a post.
    pub fn transform(&self, item: RawItem) -> Post {
        let title = item.title.unwrap_or_default();
        let link = item.link.unwrap_or_default();

        let slug = derive_slug(&title, &link);
        if slug.is_empty() {
            warn!(guid = %item.guid, "item produced an empty slug");
        }

        let hero_image = item.content.as_deref().and_then(hero_image);
        let description = item.snippet.as_deref().map(excerpt).unwrap_or_default();
        let content = item
            .content
            .as_deref()
            .map(strip_boilerplate)
            .unwrap_or_default();
        let canonical = canonical_snippet(&link, &title);

        Post {
            slug,
            title,
            link,
            pub_date: Some(item.pub_date.unwrap_or(DateTime::UNIX_EPOCH)),
            iso_date: Some(item.iso_date.unwrap_or(DateTime::UNIX_EPOCH)),
            description,
            content,
            canonical,
            categories: item.categories,
            creator: item.creator,
            hero_image,
        }
    }
}

/// Slug from the title, falling back to the link's last path segment.
///
/// Returns an empty string when both are unusable; the caller logs that
/// case since empty slugs are collision-prone.
fn derive_slug(title: &str, link: &str) -> String {
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }
    link.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// URL of the first image in the body, if any.
fn hero_image(html: &str) -> Option<String> {
    IMG_SRC_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
}

/// First 32 tokens of the snippet, ellipsis-suffixed when truncated.
fn excerpt(snippet: &str) -> String {
    let words: Vec<&str> = snippet.split_whitespace().collect();
    let mut description = words
        .iter()
        .take(DESCRIPTION_TOKENS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > DESCRIPTION_TOKENS {
        description.push_str("...");
    }
    description
}

fn strip_boilerplate(html: &str) -> String {
    BOILERPLATE_RE.replace(html, "").into_owned()
}

fn canonical_snippet(link: &str, title: &str) -> String {
    format!(
        r#"<hr><p>Read the original post on: <a href="{link}" rel="canonical" target="_blank">{title}</a></p>"#
    )
}
