use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{ThumbError, ThumbResult};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|/shorts/|/embed/)([A-Za-z0-9_-]{11})")
        .expect("video id pattern is valid")
});

/// Extract the 11-character video id from a watch, short-link, shorts or embed URL.
pub fn extract_video_id(url: &str) -> ThumbResult<String> {
    VIDEO_ID_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ThumbError::unresolvable(format!("no video id in '{}'", url.trim())))
}

#[cfg(test)]
#[path = "../../tests/unit/source/video_id.rs"]
mod tests;
