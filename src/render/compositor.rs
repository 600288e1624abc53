use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::fetch::{Fetch, HttpFetcher};
use crate::assets::fonts::{FontResolver, SystemFonts};
use crate::foundation::error::{StoryError, StoryResult};
use crate::render::background::BackgroundResolver;
use crate::render::config::RenderConfig;
use crate::render::elements::ElementPainter;
use crate::render::surface::Frame;
use crate::scene::slide::Slide;

/// An element that was skipped while rendering.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ElementFailure {
    /// Index in the authored element list.
    pub index: usize,
    /// Element type tag.
    pub kind: String,
    /// Display form of the error.
    pub reason: String,
}

/// Final raster of one slide plus what had to be left out.
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    /// The 1080×1920 (or configured) raster.
    pub frame: Frame,
    /// Elements that failed to paint, in z-order.
    pub failures: Vec<ElementFailure>,
    /// Set when the background fell back to black.
    pub background_fallback: Option<String>,
}

/// Orchestrates background resolution and ordered element painting.
pub struct Compositor {
    config: RenderConfig,
    fetcher: Arc<dyn Fetch>,
    fonts: Arc<dyn FontResolver>,
    pool: rayon::ThreadPool,
}

impl Compositor {
    /// Compositor with injected fetch and font strategies.
    pub fn new(
        config: RenderConfig,
        fetcher: Arc<dyn Fetch>,
        fonts: Arc<dyn FontResolver>,
    ) -> StoryResult<Self> {
        config.validate()?;
        let pool = build_thread_pool(config.threads)?;
        Ok(Self {
            config,
            fetcher,
            fonts,
            pool,
        })
    }

    /// Compositor fetching over HTTP and probing `config.font_search_paths`.
    pub fn from_config(config: RenderConfig) -> StoryResult<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout())?);
        let fonts = Arc::new(SystemFonts::new(config.font_search_paths.clone()));
        Self::new(config, fetcher, fonts)
    }

    /// Settings this compositor was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Fresh painter sharing this compositor's fetcher and font.
    pub fn painter(&self) -> ElementPainter {
        ElementPainter::new(
            self.config.canvas,
            self.config.widget_width,
            Arc::clone(&self.fetcher),
            self.fonts.resolve(),
        )
    }

    /// Background resolver for this compositor's canvas and fetcher.
    pub fn background_resolver(&self) -> BackgroundResolver {
        BackgroundResolver::new(self.config.canvas, Arc::clone(&self.fetcher))
    }

    /// Render one slide: background first, then elements in list order.
    pub fn render_slide(&self, slide: &Slide) -> RenderedSlide {
        let mut painter = self.painter();
        self.render_with(&mut painter, slide)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(elements = slide.elements().len()))]
    fn render_with(&self, painter: &mut ElementPainter, slide: &Slide) -> RenderedSlide {
        let bg = self.background_resolver().resolve(slide.background());
        let mut surface = bg.surface;
        let mut failures = Vec::new();
        for el in slide.elements() {
            if let Err(e) = painter.paint(el, &mut surface) {
                tracing::warn!(
                    element = el.index(),
                    kind = el.kind().name(),
                    error = %e,
                    "element skipped"
                );
                failures.push(ElementFailure {
                    index: el.index(),
                    kind: el.kind().name().to_owned(),
                    reason: e.to_string(),
                });
            }
        }
        RenderedSlide {
            frame: surface.into_frame(),
            failures,
            background_fallback: bg.fallback,
        }
    }

    /// Render slides on the bounded worker pool. Results keep slide order.
    pub fn render_slides(&self, slides: &[Slide]) -> Vec<RenderedSlide> {
        tracing::info!(slides = slides.len(), "rendering slides");
        self.pool.install(|| {
            slides
                .par_iter()
                .map_init(|| self.painter(), |p, slide| self.render_with(p, slide))
                .collect()
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> StoryResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StoryError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
