/// Convenience result type used across thumbkit.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error taxonomy used by pipeline and batch APIs.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Invalid caller-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The URL does not carry a recognizable video identifier.
    #[error("unresolvable identifier: {0}")]
    Unresolvable(String),

    /// No candidate thumbnail resource could be retrieved.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Bytes could not be decoded into a raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output directory itself could not be prepared. Aborts a batch.
    #[error("output error: {0}")]
    Output(String),

    /// A single output file could not be written. Skips the item.
    #[error("write error: {0}")]
    Write(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbError::Unresolvable`] value.
    pub fn unresolvable(msg: impl Into<String>) -> Self {
        Self::Unresolvable(msg.into())
    }

    /// Build a [`ThumbError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ThumbError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ThumbError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Build a [`ThumbError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Whether this error must abort a whole batch rather than skip one item.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
