use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Raw outline font bytes plus a label for logging.
#[derive(Clone, Debug)]
pub struct FontFace {
    label: String,
    data: Arc<Vec<u8>>,
}

impl FontFace {
    /// Wrap font file bytes.
    pub fn new(label: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            data: Arc::new(data),
        }
    }

    /// Where the font came from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Font file bytes (TTF/OTF).
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Strategy for locating the outline font used by text-bearing elements.
///
/// Returning `None` selects the built-in raster font, which always works.
pub trait FontResolver: Send + Sync {
    /// Resolve the bold UI face.
    fn resolve(&self) -> Option<FontFace>;
}

/// Always selects the built-in raster font.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFonts;

impl FontResolver for BuiltinFonts {
    fn resolve(&self) -> Option<FontFace> {
        None
    }
}

/// Probes a list of font files once and keeps the first readable one.
#[derive(Debug)]
pub struct SystemFonts {
    search_paths: Vec<PathBuf>,
    loaded: OnceLock<Option<FontFace>>,
}

impl SystemFonts {
    /// Probe `search_paths` in order.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            loaded: OnceLock::new(),
        }
    }

    fn probe(&self) -> Option<FontFace> {
        for path in &self.search_paths {
            match std::fs::read(path) {
                Ok(bytes) if !bytes.is_empty() => {
                    tracing::debug!(path = %path.display(), "loaded outline font");
                    return Some(FontFace::new(path.display().to_string(), bytes));
                }
                Ok(_) => tracing::debug!(path = %path.display(), "font file is empty"),
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "font not found"),
            }
        }
        tracing::info!("no outline font found, using built-in raster font");
        None
    }
}

impl FontResolver for SystemFonts {
    fn resolve(&self) -> Option<FontFace> {
        self.loaded.get_or_init(|| self.probe()).clone()
    }
}

/// Bold sans faces commonly present on Linux and macOS hosts.
pub fn default_font_search_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
