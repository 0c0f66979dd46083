use std::{collections::HashMap, sync::Mutex, time::Duration};

use image::DynamicImage;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Resolution names tried in order, best first.
pub const DEFAULT_RESOLUTIONS: [&str; 5] =
    ["maxresdefault", "sddefault", "hqdefault", "mqdefault", "default"];

/// Host serving `<id>/<resolution>.jpg` thumbnails.
pub const DEFAULT_THUMBNAIL_BASE: &str = "https://i.ytimg.com/vi";

/// Canonical page URL prefix; the video id is appended.
pub const DEFAULT_WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

const USER_AGENT: &str = "Mozilla/5.0";

/// Why a single retrieval failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("http status {0}")]
    Status(u16),
    /// Connection, TLS, timeout or body-read failure.
    #[error("transport: {0}")]
    Transport(String),
}

/// Blocking byte retrieval by URL.
///
/// Implementations must be shareable across batch workers.
pub trait ThumbnailSource: Send + Sync {
    /// Fetch the full response body of `url`.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`ThumbnailSource`] over a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Client with a browser-like user agent and the given request timeout.
    pub fn new(timeout: Duration) -> ThumbResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ThumbError::validation(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl ThumbnailSource for HttpSource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

/// In-memory [`ThumbnailSource`]: registered URLs return their bytes, everything else 404s.
#[derive(Debug, Default)]
pub struct MemorySource {
    responses: HashMap<String, Result<Vec<u8>, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Empty source; every request fails with status 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    /// Fail `url` with `err`.
    pub fn with_error(mut self, url: impl Into<String>, err: FetchError) -> Self {
        self.responses.insert(url.into(), Err(err));
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ThumbnailSource for MemorySource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.requests.lock() {
            Ok(mut r) => r.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// Candidate thumbnail URLs for `video_id`, in the order of `resolutions`.
pub fn thumbnail_candidates(base: &str, video_id: &str, resolutions: &[String]) -> Vec<String> {
    let base = base.trim_end_matches('/');
    resolutions
        .iter()
        .map(|res| format!("{base}/{video_id}/{res}.jpg"))
        .collect()
}

/// Decode encoded image bytes.
pub fn decode_image(bytes: &[u8]) -> ThumbResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| ThumbError::decode(e.to_string()))
}

/// First candidate that both answers successfully and decodes.
///
/// Failures on one candidate fall through to the next; only exhausting the list is an error.
pub fn fetch_thumbnail(
    source: &dyn ThumbnailSource,
    base: &str,
    video_id: &str,
    resolutions: &[String],
) -> ThumbResult<DynamicImage> {
    for url in thumbnail_candidates(base, video_id, resolutions) {
        let bytes = match source.fetch_bytes(&url) {
            Ok(b) => b,
            Err(err) => {
                tracing::debug!(%url, %err, "thumbnail candidate unavailable");
                continue;
            }
        };
        match decode_image(&bytes) {
            Ok(img) => {
                tracing::info!(%url, w = img.width(), h = img.height(), "using thumbnail");
                return Ok(img);
            }
            Err(err) => {
                tracing::warn!(marker = "undecodable-thumbnail", %url, %err, "skipping candidate");
            }
        }
    }
    Err(ThumbError::fetch(format!(
        "no thumbnail candidate succeeded for video {video_id}"
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/source/fetch.rs"]
mod tests;
