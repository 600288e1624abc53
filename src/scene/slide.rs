use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, PixelPoint, Rgba8};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::pct_to_px;
use crate::scene::model::{
    BackgroundDef, ElementDef, ImageContentDef, PollContentDef, QuestionContentDef,
    QuizContentDef, SlideDef, SliderContentDef, StickerContentDef, StoryDataDef, TextContentDef,
    content_def,
};

const DEFAULT_DURATION_SECS: f64 = 5.0;
const MAX_FONT_SIZE: u32 = 512;
const MAX_STICKER_SIZE: u32 = 1024;
const MAX_IMAGE_SIZE: u32 = 4096;

/// Fallbacks applied when a payload omits a field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneDefaults {
    /// Text font size in pixels.
    pub font_size: u32,
    /// Text color as hex.
    pub text_color: String,
    /// Longest side of an aspect-preserving image element.
    pub image_max_dimension: u32,
    /// Sticker glyph side in pixels.
    pub sticker_size: u32,
}

impl Default for SceneDefaults {
    fn default() -> Self {
        Self {
            font_size: 32,
            text_color: "#ffffff".to_owned(),
            image_max_dimension: 300,
            sticker_size: 50,
        }
    }
}

/// Validated, immutable story: a non-empty ordered list of slides.
#[derive(Debug, Clone)]
pub struct Scene {
    slides: Vec<Slide>,
}

impl Scene {
    /// Validate a `storyData` payload. Fails only when there are no slides.
    pub fn from_def(def: &StoryDataDef, defaults: &SceneDefaults) -> StoryResult<Self> {
        if def.slides.is_empty() {
            return Err(StoryError::validation("story has no slides"));
        }
        let slides = def
            .slides
            .iter()
            .map(|s| Slide::from_def(s, defaults))
            .collect();
        Ok(Self { slides })
    }

    /// Parse and validate a `storyData` JSON document.
    pub fn from_reader<R: std::io::Read>(r: R, defaults: &SceneDefaults) -> StoryResult<Self> {
        let def: StoryDataDef = serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse story JSON: {e}")))?;
        Self::from_def(&def, defaults)
    }

    /// Parse and validate a `storyData` JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>, defaults: &SceneDefaults) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::validation(format!("open story JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f), defaults)
    }

    /// Slides in playback order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}

/// Slide background.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Solid fill.
    Color(Rgba8),
    /// Remote image stretched over the whole canvas.
    Image {
        /// Source URL.
        url: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgba8::BLACK)
    }
}

impl Background {
    fn from_def(def: Option<&BackgroundDef>) -> Self {
        let Some(def) = def else {
            return Self::default();
        };
        match def.kind.as_deref().map(str::trim) {
            Some("image") => match def.value.as_deref().or(def.url.as_deref()) {
                Some(url) if !url.trim().is_empty() => Self::Image {
                    url: url.trim().to_owned(),
                },
                _ => Self::default(),
            },
            Some("color") | None => def
                .value
                .as_deref()
                .or(def.color.as_deref())
                .and_then(|hex| Rgba8::from_hex(hex).ok())
                .map(Self::Color)
                .unwrap_or_default(),
            Some(other) => {
                tracing::debug!(kind = other, "unknown background type, using black");
                Self::default()
            }
        }
    }
}

/// Element position in percent of canvas width/height, clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x_pct: f64,
    y_pct: f64,
}

impl Position {
    /// Clamp a position into `[0, 100]²`. Non-finite values become `0`.
    pub fn new(x_pct: f64, y_pct: f64) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
        }
        Self {
            x_pct: clamp(x_pct),
            y_pct: clamp(y_pct),
        }
    }

    /// Horizontal percentage.
    pub fn x_pct(self) -> f64 {
        self.x_pct
    }

    /// Vertical percentage.
    pub fn y_pct(self) -> f64 {
        self.y_pct
    }

    /// `floor(pct * extent / 100)` on both axes.
    pub fn to_pixels(self, canvas: Canvas) -> PixelPoint {
        PixelPoint::new(
            pct_to_px(self.x_pct, canvas.width),
            pct_to_px(self.y_pct, canvas.height),
        )
    }
}

/// One validated element of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    index: usize,
    position: Position,
    kind: ElementKind,
}

impl Element {
    /// Build an element; `index` is its place in the authored element list.
    pub fn new(index: usize, position: Position, kind: ElementKind) -> Self {
        Self {
            index,
            position,
            kind,
        }
    }

    /// Index in the authored element list (stable across rejected siblings).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Canvas position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Typed payload.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    fn from_def(
        index: usize,
        def: &ElementDef,
        defaults: &SceneDefaults,
    ) -> Result<Self, RejectedElement> {
        let reject = |reason: String| RejectedElement {
            index,
            kind: def.kind.clone(),
            reason,
        };
        let kind = ElementKind::from_def(def, defaults).map_err(reject)?;
        Ok(Self::new(
            index,
            Position::new(def.position.x, def.position.y),
            kind,
        ))
    }
}

/// Closed set of element kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Shadowed multi-line text.
    Text(TextContent),
    /// Remote raster image.
    Image(ImageContent),
    /// Two-or-more option poll.
    Poll(PollContent),
    /// Poll with one correct option.
    Quiz(QuizContent),
    /// Emoji slider with fixed midpoint handle.
    Slider(SliderContent),
    /// Glyph sticker.
    Sticker(StickerContent),
    /// Free-text question prompt.
    Question(QuestionContent),
}

impl ElementKind {
    /// Type tag as used in payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Poll(_) => "poll",
            Self::Quiz(_) => "quiz",
            Self::Slider(_) => "slider",
            Self::Sticker(_) => "sticker",
            Self::Question(_) => "question",
        }
    }

    fn from_def(def: &ElementDef, defaults: &SceneDefaults) -> Result<Self, String> {
        let style = &def.style;
        match def.kind.trim() {
            "text" => {
                let c: TextContentDef = content_def(&def.content, |s| {
                    Some(TextContentDef {
                        text: Some(s.to_owned()),
                        ..Default::default()
                    })
                })?;
                let size = c
                    .font_size
                    .or(style.font_size)
                    .and_then(positive_px)
                    .unwrap_or(defaults.font_size)
                    .clamp(1, MAX_FONT_SIZE);
                let color = c
                    .color
                    .as_deref()
                    .or(style.color.as_deref())
                    .and_then(|hex| Rgba8::from_hex(hex).ok())
                    .or_else(|| Rgba8::from_hex(&defaults.text_color).ok())
                    .unwrap_or(Rgba8::WHITE);
                Ok(Self::Text(TextContent::new(
                    c.text.unwrap_or_default(),
                    size,
                    color,
                )))
            }
            "image" | "ai-image" => {
                let c: ImageContentDef = content_def(&def.content, |s| {
                    Some(ImageContentDef {
                        url: Some(s.to_owned()),
                        ..Default::default()
                    })
                })?;
                let url = c
                    .url
                    .map(|u| u.trim().to_owned())
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| "image element has no url".to_owned())?;
                let explicit = c
                    .width
                    .and_then(image_px)
                    .zip(c.height.and_then(image_px));
                let styled = style
                    .width
                    .and_then(image_px)
                    .zip(style.height.and_then(image_px));
                let sizing = match (explicit, c.max_size.and_then(image_px), styled) {
                    (Some((width, height)), _, _) => ImageSizing::Stretch { width, height },
                    (None, Some(max), _) => ImageSizing::MaxDimension(max),
                    (None, None, Some((width, height))) => ImageSizing::Stretch { width, height },
                    (None, None, None) => ImageSizing::MaxDimension(
                        defaults.image_max_dimension.clamp(1, MAX_IMAGE_SIZE),
                    ),
                };
                Ok(Self::Image(ImageContent::new(url, sizing)))
            }
            "poll" => {
                let c: PollContentDef = content_def(&def.content, |_| None)?;
                Ok(Self::Poll(PollContent::new(
                    c.question.unwrap_or_default(),
                    c.options,
                )))
            }
            "quiz" => {
                let c: QuizContentDef = content_def(&def.content, |_| None)?;
                let correct = c.correct_answer.unwrap_or(0).max(0);
                Ok(Self::Quiz(QuizContent::new(
                    c.question.unwrap_or_default(),
                    c.options,
                    usize::try_from(correct).unwrap_or(usize::MAX),
                )))
            }
            "slider" => {
                let c: SliderContentDef = content_def(&def.content, |_| None)?;
                Ok(Self::Slider(SliderContent::new(
                    c.question.unwrap_or_else(|| "Rate from 1 to 10".to_owned()),
                    c.min_label.unwrap_or_else(|| "1".to_owned()),
                    c.max_label.unwrap_or_else(|| "10".to_owned()),
                    c.emoji,
                )))
            }
            "sticker" => {
                let c: StickerContentDef = content_def(&def.content, |s| {
                    Some(StickerContentDef {
                        kind: Some(s.to_owned()),
                        ..Default::default()
                    })
                })?;
                let size = c
                    .size
                    .and_then(positive_px)
                    .unwrap_or(defaults.sticker_size)
                    .clamp(1, MAX_STICKER_SIZE);
                let kind = c
                    .kind
                    .as_deref()
                    .map(StickerKind::from_name)
                    .unwrap_or_default();
                Ok(Self::Sticker(StickerContent::new(kind, size)))
            }
            "question" => {
                let c: QuestionContentDef = content_def(&def.content, |s| {
                    Some(QuestionContentDef {
                        question: Some(s.to_owned()),
                    })
                })?;
                Ok(Self::Question(QuestionContent::new(
                    c.question.unwrap_or_else(|| "Ask me a question".to_owned()),
                )))
            }
            "" => Err("element has no type".to_owned()),
            other => Err(format!("unknown element type '{other}'")),
        }
    }
}

/// Rounded pixel size, `None` unless finite and at least one pixel.
fn positive_px(v: f64) -> Option<u32> {
    if !v.is_finite() || v < 1.0 {
        return None;
    }
    Some(v.round().min(f64::from(u32::MAX)) as u32)
}

fn image_px(v: f64) -> Option<u32> {
    positive_px(v).map(|px| px.min(MAX_IMAGE_SIZE))
}

/// Text payload. Newlines are explicit line breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    text: String,
    font_size: u32,
    color: Rgba8,
}

impl TextContent {
    /// Build a text payload; a zero size becomes one pixel.
    pub fn new(text: impl Into<String>, font_size: u32, color: Rgba8) -> Self {
        Self {
            text: text.into(),
            font_size: font_size.max(1),
            color,
        }
    }

    /// Raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines split on explicit newline boundaries only.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(|l| l.trim_end_matches('\r'))
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Fill color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }
}

/// How an image element is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSizing {
    /// Preserve aspect so the longer side equals this many pixels.
    MaxDimension(u32),
    /// Stretch to exactly this size.
    Stretch {
        /// Target width.
        width: u32,
        /// Target height.
        height: u32,
    },
}

impl ImageSizing {
    /// Target size for a source image of `src_w × src_h`. Never returns a zero side.
    pub fn target_size(self, src_w: u32, src_h: u32) -> (u32, u32) {
        match self {
            Self::Stretch { width, height } => (width.max(1), height.max(1)),
            Self::MaxDimension(max) => {
                let (sw, sh) = (f64::from(src_w.max(1)), f64::from(src_h.max(1)));
                let ratio = (f64::from(max) / sw).min(f64::from(max) / sh);
                let w = (sw * ratio).floor().max(1.0) as u32;
                let h = (sh * ratio).floor().max(1.0) as u32;
                (w, h)
            }
        }
    }
}

/// Image payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    url: String,
    sizing: ImageSizing,
}

impl ImageContent {
    /// Build an image payload.
    pub fn new(url: impl Into<String>, sizing: ImageSizing) -> Self {
        Self {
            url: url.into(),
            sizing,
        }
    }

    /// Source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resize mode.
    pub fn sizing(&self) -> ImageSizing {
        self.sizing
    }
}

fn non_empty_options(options: Vec<String>, fallback: [&str; 2]) -> Vec<String> {
    if options.is_empty() {
        fallback.iter().map(|s| (*s).to_owned()).collect()
    } else {
        options
    }
}

/// Poll payload; options are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PollContent {
    question: String,
    options: Vec<String>,
}

impl PollContent {
    /// Build a poll; an empty option list gets two placeholder options.
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options: non_empty_options(options, ["Option 1", "Option 2"]),
        }
    }

    /// Question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Options in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Quiz payload; `correct_index` always addresses an existing option.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizContent {
    question: String,
    options: Vec<String>,
    correct_index: usize,
}

impl QuizContent {
    /// Build a quiz; the correct index is clamped into the option range.
    pub fn new(question: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        let options = non_empty_options(options, ["Option A", "Option B"]);
        let correct_index = correct_index.min(options.len() - 1);
        Self {
            question: question.into(),
            options,
            correct_index,
        }
    }

    /// Question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Options in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

/// Slider payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderContent {
    question: String,
    min_label: String,
    max_label: String,
    emoji: Option<String>,
}

impl SliderContent {
    /// Build a slider payload.
    pub fn new(
        question: impl Into<String>,
        min_label: impl Into<String>,
        max_label: impl Into<String>,
        emoji: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            min_label: min_label.into(),
            max_label: max_label.into(),
            emoji: emoji.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Label at the left end of the track.
    pub fn min_label(&self) -> &str {
        &self.min_label
    }

    /// Label at the right end of the track.
    pub fn max_label(&self) -> &str {
        &self.max_label
    }

    /// Handle emoji requested for the platform slider, if any.
    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }
}

/// Sticker glyph vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StickerKind {
    /// Red heart; also the fallback for unknown names.
    #[default]
    Heart,
    /// Flame.
    Fire,
    /// Five-point star.
    Star,
    /// Thumbs up.
    ThumbsUp,
    /// Clapping hands.
    Clap,
}

impl StickerKind {
    /// All kinds in vocabulary order.
    pub const ALL: [StickerKind; 5] = [
        StickerKind::Heart,
        StickerKind::Fire,
        StickerKind::Star,
        StickerKind::ThumbsUp,
        StickerKind::Clap,
    ];

    /// Map a payload name to a kind; unknown names map to [`StickerKind::Heart`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fire" => Self::Fire,
            "star" => Self::Star,
            "thumbs_up" | "thumbsup" | "like" => Self::ThumbsUp,
            "clap" => Self::Clap,
            _ => Self::Heart,
        }
    }

    /// Canonical payload name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Fire => "fire",
            Self::Star => "star",
            Self::ThumbsUp => "thumbs_up",
            Self::Clap => "clap",
        }
    }
}

/// Sticker payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerContent {
    kind: StickerKind,
    size: u32,
}

impl StickerContent {
    /// Build a sticker payload; a zero size becomes one pixel.
    pub fn new(kind: StickerKind, size: u32) -> Self {
        Self {
            kind,
            size: size.max(1),
        }
    }

    /// Glyph kind.
    pub fn kind(&self) -> StickerKind {
        self.kind
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Question-prompt payload.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionContent {
    question: String,
}

impl QuestionContent {
    /// Build a question prompt.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    /// Prompt text.
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// An authored element that did not survive validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RejectedElement {
    /// Index in the authored element list.
    pub index: usize,
    /// Authored type tag.
    pub kind: String,
    /// Human-readable reason.
    pub reason: String,
}

/// One validated slide. Immutable once built.
#[derive(Debug, Clone)]
pub struct Slide {
    background: Background,
    elements: Vec<Element>,
    duration: f64,
    rejected: Vec<RejectedElement>,
}

impl Slide {
    /// Build a slide from already-validated parts with the default duration.
    pub fn new(background: Background, elements: Vec<Element>) -> Self {
        Self {
            background,
            elements,
            duration: DEFAULT_DURATION_SECS,
            rejected: Vec::new(),
        }
    }

    /// Same slide with a different duration; non-positive values keep the default.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = valid_duration(Some(secs));
        self
    }

    /// Validate one authored slide. Bad elements are recorded, never fatal.
    pub fn from_def(def: &SlideDef, defaults: &SceneDefaults) -> Self {
        let mut elements = Vec::with_capacity(def.elements.len());
        let mut rejected = Vec::new();
        for (index, el) in def.elements.iter().enumerate() {
            match Element::from_def(index, el, defaults) {
                Ok(e) => elements.push(e),
                Err(r) => {
                    tracing::warn!(
                        slide = def.id.as_deref().unwrap_or("-"),
                        element = index,
                        kind = %r.kind,
                        reason = %r.reason,
                        "element rejected"
                    );
                    rejected.push(r);
                }
            }
        }
        Self {
            background: Background::from_def(def.background.as_ref()),
            elements,
            duration: valid_duration(def.duration),
            rejected,
        }
    }

    /// Background.
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Elements in z-order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Display duration in seconds (always positive).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Authored elements dropped during validation.
    pub fn rejected(&self) -> &[RejectedElement] {
        &self.rejected
    }
}

fn valid_duration(secs: Option<f64>) -> f64 {
    match secs {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => DEFAULT_DURATION_SECS,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/slide.rs"]
mod tests;
