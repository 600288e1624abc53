use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assets::fonts::default_font_search_paths;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::slide::SceneDefaults;

const MIN_JPEG_QUALITY: u8 = 85;
const MAX_JPEG_QUALITY: u8 = 95;

/// Immutable settings handed to the compositor at construction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output raster size.
    pub canvas: Canvas,
    /// Per-fetch timeout for background and image elements.
    pub fetch_timeout_ms: u64,
    /// Outline font candidates, probed in order.
    pub font_search_paths: Vec<PathBuf>,
    /// Panel width for poll, quiz, slider and question widgets.
    pub widget_width: u32,
    /// JPEG quality for the publish path.
    pub jpeg_quality: u8,
    /// Worker count for multi-slide renders. `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Payload fallbacks.
    pub scene: SceneDefaults,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::STORY,
            fetch_timeout_ms: 10_000,
            font_search_paths: default_font_search_paths(),
            widget_width: 300,
            jpeg_quality: 90,
            threads: None,
            scene: SceneDefaults::default(),
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            StoryError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings no render could honour.
    pub fn validate(&self) -> StoryResult<()> {
        self.canvas.validate()?;
        if self.fetch_timeout_ms == 0 {
            return Err(StoryError::validation("fetch_timeout_ms must be > 0"));
        }
        if self.widget_width < 40 {
            return Err(StoryError::validation("widget_width must be >= 40"));
        }
        if self.threads == Some(0) {
            return Err(StoryError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Fetch timeout as a duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// JPEG quality clamped to the supported range.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
