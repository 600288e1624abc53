//! Storyslide renders percentage-positioned story slides into 1080×1920 rasters and translates
//! the same slides into a publishing platform's sticker schema.
//!
//! The two paths are independent:
//!
//! - Read a story with [`Scene::from_def`] (or [`Scene::from_path`])
//! - Rasterize slides with a [`Compositor`] and encode them with [`encode_frame`]
//! - Map the first slide onto platform stickers with a [`Translator`]
//!
//! The [`service`] handlers wrap both paths in JSON request/response payloads.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Raster encoding and storage.
pub mod encode;
/// CPU slide rendering.
pub mod render;
/// Boundary scene model.
pub mod scene;
/// JSON request handlers.
pub mod service;
/// Platform sticker translation.
pub mod translate;

pub use crate::foundation::core::{Canvas, PixelPoint, Rgba8};
pub use crate::foundation::error::{StoryError, StoryResult};

pub use crate::assets::fetch::{Fetch, HttpFetcher, MemoryFetcher};
pub use crate::assets::fonts::{
    BuiltinFonts, FontFace, FontResolver, SystemFonts, default_font_search_paths,
};
pub use crate::encode::sink::{DirSink, InMemorySink, OutputFormat, OutputSink, encode_frame};
pub use crate::render::background::{BackgroundResolver, ResolvedBackground};
pub use crate::render::compositor::{Compositor, ElementFailure, RenderedSlide};
pub use crate::render::config::RenderConfig;
pub use crate::render::elements::ElementPainter;
pub use crate::render::surface::{Frame, Surface};
pub use crate::scene::model::{
    BackgroundDef, ElementDef, PositionDef, SlideDef, StoryDataDef, StyleDef,
};
pub use crate::scene::slide::{
    Background, Element, ElementKind, ImageContent, ImageSizing, PollContent, Position,
    QuestionContent, QuizContent, RejectedElement, Scene, SceneDefaults, Slide, SliderContent,
    StickerContent, StickerKind, TextContent,
};
pub use crate::service::publish::{
    Credentials, PublishRequest, PublishResult, PublishedStory, Publisher, handle_publish_request,
};
pub use crate::service::render::{
    HealthResponse, RenderRequest, RenderResponse, RenderedImage, handle_render_request,
};
pub use crate::translate::platform::{
    DroppedOptions, PlatformPoll, PlatformQuestion, PlatformQuiz, PlatformSlider, SkippedElement,
    StickerFrame, TranslatedStory,
};
pub use crate::translate::translator::{StickerSize, Translator, TranslatorConfig};
