use std::sync::Arc;

use crate::assets::decode::decode_resized;
use crate::assets::fetch::Fetch;
use crate::foundation::core::{Canvas, PixelPoint, Rgba8};
use crate::foundation::error::StoryResult;
use crate::render::surface::Surface;
use crate::scene::slide::Background;

/// A background raster plus the reason it fell back to black, if it did.
pub struct ResolvedBackground {
    /// Base raster for the slide.
    pub surface: Surface,
    /// Why the authored background could not be used.
    pub fallback: Option<String>,
}

/// Produces the base raster of a slide.
#[derive(Clone)]
pub struct BackgroundResolver {
    canvas: Canvas,
    fetcher: Arc<dyn Fetch>,
}

impl BackgroundResolver {
    /// Resolver painting onto `canvas`, fetching images through `fetcher`.
    pub fn new(canvas: Canvas, fetcher: Arc<dyn Fetch>) -> Self {
        Self { canvas, fetcher }
    }

    /// Resolve `bg`. Never fails: fetch or decode problems yield solid black.
    pub fn resolve(&self, bg: &Background) -> ResolvedBackground {
        match bg {
            Background::Color(c) => ResolvedBackground {
                surface: Surface::filled(self.canvas, *c),
                fallback: None,
            },
            Background::Image { url } => match self.stretched(url) {
                Ok(surface) => ResolvedBackground {
                    surface,
                    fallback: None,
                },
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "background image unavailable, using black");
                    ResolvedBackground {
                        surface: Surface::filled(self.canvas, Rgba8::BLACK),
                        fallback: Some(e.to_string()),
                    }
                }
            },
        }
    }

    fn stretched(&self, url: &str) -> StoryResult<Surface> {
        let bytes = self.fetcher.fetch(url)?;
        let Canvas { width, height } = self.canvas;
        let img = decode_resized(&bytes, |_, _| (width, height))?;
        if img.has_alpha {
            // Translucent backgrounds sit on black.
            let mut surface = Surface::filled(self.canvas, Rgba8::BLACK);
            surface.blit(&img, PixelPoint::new(0, 0));
            Ok(surface)
        } else {
            Surface::from_image(self.canvas, img)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
