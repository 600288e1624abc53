use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::StoryResult;
use crate::scene::model::StoryDataDef;
use crate::scene::slide::{SceneDefaults, Slide};
use crate::translate::platform::TranslatedStory;
use crate::translate::translator::Translator;

/// Platform account credentials.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    /// Account name.
    #[serde(default)]
    pub username: Option<String>,
    /// Account password.
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    fn pair(&self) -> Option<(&str, &str)> {
        let user = self.username.as_deref().filter(|s| !s.is_empty())?;
        let pass = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((user, pass))
    }
}

/// Body of a publish request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishRequest {
    /// Authored story; only the first slide is published.
    #[serde(rename = "storyData", default)]
    pub story_data: StoryDataDef,
    /// Account to publish with.
    #[serde(default)]
    pub credentials: Credentials,
    /// Already-rendered media file.
    #[serde(rename = "mediaPath", default)]
    pub media_path: PathBuf,
}

/// A story accepted by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedStory {
    /// Platform identifier of the story.
    pub story_id: String,
    /// Public URL of the story.
    pub story_url: String,
}

/// Client side of the publishing platform.
pub trait Publisher {
    /// Open a session for `username`.
    fn login(&mut self, username: &str, password: &str) -> StoryResult<()>;
    /// Upload `media` with the translated stickers attached.
    fn upload(&mut self, media: &Path, story: &TranslatedStory) -> StoryResult<PublishedStory>;
}

/// Outcome of [`handle_publish_request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PublishResult {
    /// The story is live.
    Published {
        /// Always `true`.
        success: bool,
        /// Platform identifier.
        story_id: String,
        /// Public URL.
        story_url: String,
    },
    /// Nothing was published.
    Failed {
        /// Always `false`.
        success: bool,
        /// Human-readable error.
        error: String,
    },
}

impl PublishResult {
    fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        tracing::warn!(error = %error, "publish failed");
        Self::Failed {
            success: false,
            error,
        }
    }

    /// Whether the story was published.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Error when credentials are absent or empty.
pub const MISSING_CREDENTIALS: &str = "missing platform credentials";
/// Error when the request carries no slides.
pub const NO_SLIDES: &str = "story has no slides";

/// Translate the first slide of a JSON publish request and hand it to `publisher`.
pub fn handle_publish_request(
    body: &[u8],
    translator: &Translator,
    defaults: &SceneDefaults,
    publisher: &mut dyn Publisher,
) -> PublishResult {
    let req: PublishRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return PublishResult::failed(format!("invalid publish request: {e}")),
    };
    let Some((username, password)) = req.credentials.pair() else {
        return PublishResult::failed(MISSING_CREDENTIALS);
    };
    if !req.media_path.is_file() {
        return PublishResult::failed(format!(
            "media file not found: {}",
            req.media_path.display()
        ));
    }
    if let Err(e) = publisher.login(username, password) {
        return PublishResult::failed(format!("platform login failed: {e}"));
    }

    let slides: Vec<Slide> = req
        .story_data
        .slides
        .iter()
        .map(|s| Slide::from_def(s, defaults))
        .collect();
    if slides.is_empty() {
        return PublishResult::failed(NO_SLIDES);
    }
    let story = match translator.translate_slides(&slides) {
        Ok(s) => s,
        Err(e) => return PublishResult::failed(e.to_string()),
    };
    tracing::info!(
        stickers = story.sticker_count(),
        skipped = story.skipped.len(),
        "uploading story"
    );

    match publisher.upload(&req.media_path, &story) {
        Ok(p) => PublishResult::Published {
            success: true,
            story_id: p.story_id,
            story_url: p.story_url,
        },
        Err(e) => PublishResult::failed(e.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/publish.rs"]
mod tests;
