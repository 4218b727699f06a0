//! Placeholder records for pages whose extraction produced nothing usable.

use url::Url;

use crate::types::Interaction;

/// Bio text that marks a synthesized record.
pub const FALLBACK_BIO: &str = "Bio not available - extraction failed";
/// Date stamped on synthesized records.
pub const FALLBACK_TIMESTAMP: &str = "2024-01-01";
pub const FALLBACK_POST_TYPE: &str = "question";
const USERNAME_PREFIX: &str = "User from ";
const USERNAME_SEGMENT_CHARS: usize = 15;

/// The single record synthesized for `url`. Deterministic per URL.
pub fn fallback_interaction(url: &str) -> Interaction {
    Interaction {
        username: Some(fallback_username(url)),
        bio: Some(FALLBACK_BIO.to_string()),
        post_type: Some(FALLBACK_POST_TYPE.to_string()),
        timestamp: Some(FALLBACK_TIMESTAMP.to_string()),
        upvotes: Some(0),
        links: Some(Vec::new()),
    }
}

/// True when `interaction` was produced by [`fallback_interaction`].
pub fn is_fallback(interaction: &Interaction) -> bool {
    interaction.bio.as_deref() == Some(FALLBACK_BIO)
}

/// `"User from "` followed by the first 15 characters of the URL's
/// trailing segment.
pub fn fallback_username(url: &str) -> String {
    let segment: String = trailing_segment(url)
        .chars()
        .take(USERNAME_SEGMENT_CHARS)
        .collect();
    format!("{}{}", USERNAME_PREFIX, segment)
}

/// Last non-empty path segment, ignoring query and fragment.
///
/// Falls back to the host when the path is empty, and to the raw string
/// when the URL does not parse.
fn trailing_segment(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_else(|| url.to_string()),
        Err(_) => url
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .unwrap_or(url)
            .to_string(),
    }
}
