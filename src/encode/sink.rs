use std::path::{Path, PathBuf};

use image::ImageEncoder;

use crate::foundation::error::{StoryError, StoryResult};
use crate::render::surface::Frame;

/// Encoded raster format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, used for previews.
    Png,
    /// Lossy, used for publishing.
    Jpeg {
        /// Encoder quality, 1..=100.
        quality: u8,
    },
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Encode a full frame. JPEG output drops alpha.
pub fn encode_frame(frame: &Frame, format: OutputFormat) -> StoryResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(StoryError::encode(format!(
            "frame buffer is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let rgba = frame.to_straight_rgba8();
    let mut out = Vec::new();
    match format {
        OutputFormat::Png => image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &rgba,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| StoryError::encode(format!("png: {e}")))?,
        OutputFormat::Jpeg { quality } => {
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .map_err(|e| StoryError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(out)
}

/// Destination for encoded slide rasters.
pub trait OutputSink: Send {
    /// Store slide `index` and return the URL it can be fetched from.
    fn store(&mut self, index: usize, format: OutputFormat, bytes: &[u8]) -> StoryResult<String>;
}

/// Writes `slide_<n>.<ext>` files into one directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    url_prefix: String,
}

impl DirSink {
    /// Sink writing into `dir` (created if missing) and publishing under `url_prefix`.
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> StoryResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StoryError::encode(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            url_prefix: url_prefix.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(index: usize, format: OutputFormat) -> String {
        format!("slide_{}.{}", index + 1, format.extension())
    }
}

impl OutputSink for DirSink {
    fn store(&mut self, index: usize, format: OutputFormat, bytes: &[u8]) -> StoryResult<String> {
        let name = Self::file_name(index, format);
        let path = self.dir.join(&name);
        std::fs::write(&path, bytes)
            .map_err(|e| StoryError::encode(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored slide");
        Ok(format!("{}/{name}", self.url_prefix))
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Stored rasters as `(index, format, bytes)` in store order.
    pub(crate) items: Vec<(usize, OutputFormat, Vec<u8>)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the stored rasters.
    pub fn items(&self) -> &[(usize, OutputFormat, Vec<u8>)] {
        &self.items
    }
}

impl OutputSink for InMemorySink {
    fn store(&mut self, index: usize, format: OutputFormat, bytes: &[u8]) -> StoryResult<String> {
        self.items.push((index, format, bytes.to_vec()));
        Ok(format!("memory://slide_{}.{}", index + 1, format.extension()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
