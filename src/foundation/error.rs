/// Convenience result type used across storyslide.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy used by the rendering and translation paths.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// A background or element resource could not be fetched in time.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Fetched bytes are not a decodable image or glyph.
    #[error("decode error: {0}")]
    Decode(String),

    /// A requested font could not be loaded or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid or missing scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An element could not be expressed in the platform schema.
    #[error("translation error: {0}")]
    Translation(String),

    /// The remote publishing client rejected a login or upload.
    #[error("publish error: {0}")]
    Publish(String),

    /// Raster encoding or output storage failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing boundary payloads.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`StoryError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StoryError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Translation`] value.
    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    /// Build a [`StoryError::Publish`] value.
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }

    /// Build a [`StoryError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the pipeline absorbs this error (fallback or skip) instead of failing the
    /// enclosing operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Decode(_) | Self::Font(_) | Self::Translation(_)
        )
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
