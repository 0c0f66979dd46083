use std::sync::LazyLock;

use regex::Regex;

use crate::source::fetch::ThumbnailSource;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").expect("title pattern is valid"));

const SITE_SUFFIX: &str = " - YouTube";

/// Characters that are not allowed in output file names.
pub const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Human-readable title from page markup: the first `<title>` element, site suffix removed.
pub fn parse_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str().trim_end();
    let title = raw.strip_suffix(SITE_SUFFIX).unwrap_or(raw).trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Fetch `page_url` and parse its title. Any failure is logged and yields `None`.
pub fn fetch_title(source: &dyn ThumbnailSource, page_url: &str) -> Option<String> {
    match source.fetch_bytes(page_url) {
        Ok(body) => {
            let title = parse_title(&String::from_utf8_lossy(&body));
            if title.is_none() {
                tracing::warn!(marker = "title-fallback", %page_url, "page has no usable title");
            }
            title
        }
        Err(err) => {
            tracing::warn!(marker = "title-fallback", %page_url, %err, "failed to fetch title");
            None
        }
    }
}

/// Strip characters that are unsafe in file names and trim surrounding whitespace.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/source/title.rs"]
mod tests;
