use serde::Serialize;

/// Normalized placement of a platform sticker; every field is a fraction of the story frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StickerFrame {
    /// Left edge in `[0, 1]`.
    pub x: f64,
    /// Top edge in `[0, 1]`.
    pub y: f64,
    /// Width fraction.
    pub width: f64,
    /// Height fraction.
    pub height: f64,
}

/// Two-option poll sticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformPoll {
    /// Placement.
    #[serde(flatten)]
    pub frame: StickerFrame,
    /// Poll question.
    pub question: String,
    /// Exactly two options.
    pub options: Vec<String>,
}

/// Quiz sticker with up to four options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformQuiz {
    /// Placement.
    #[serde(flatten)]
    pub frame: StickerFrame,
    /// Quiz question.
    pub question: String,
    /// Two to four options.
    pub options: Vec<String>,
    /// Index of the correct option within `options`.
    pub correct_option: usize,
}

/// Emoji slider sticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSlider {
    /// Placement.
    #[serde(flatten)]
    pub frame: StickerFrame,
    /// Slider prompt.
    pub question: String,
    /// Handle emoji.
    pub emoji: String,
}

/// Free-text question sticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformQuestion {
    /// Placement.
    #[serde(flatten)]
    pub frame: StickerFrame,
    /// Prompt text.
    pub question: String,
}

/// An element that has no platform counterpart or could not be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    /// Index in the authored element list.
    pub index: usize,
    /// Element type tag.
    pub kind: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Options cut to satisfy platform cardinality limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedOptions {
    /// Index in the authored element list.
    pub index: usize,
    /// Element type tag.
    pub kind: String,
    /// Removed options, in authored order.
    pub options: Vec<String>,
    /// Set when the quiz's correct option was among the removed ones.
    pub correct_option_dropped: bool,
}

/// Platform stickers grouped by kind, plus translation diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslatedStory {
    /// Poll stickers.
    pub polls: Vec<PlatformPoll>,
    /// Quiz stickers.
    pub quizzes: Vec<PlatformQuiz>,
    /// Slider stickers.
    pub sliders: Vec<PlatformSlider>,
    /// Question stickers.
    pub questions: Vec<PlatformQuestion>,
    /// Elements left out, with reasons.
    pub skipped: Vec<SkippedElement>,
    /// Options removed by cardinality limits.
    pub dropped: Vec<DroppedOptions>,
}

impl TranslatedStory {
    /// Number of platform stickers across all buckets.
    pub fn sticker_count(&self) -> usize {
        self.polls.len() + self.quizzes.len() + self.sliders.len() + self.questions.len()
    }
}
