use crate::foundation::core::Canvas;
use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::slide::{
    Element, ElementKind, PollContent, Position, QuestionContent, QuizContent, Slide,
    SliderContent,
};
use crate::translate::platform::{
    DroppedOptions, PlatformPoll, PlatformQuestion, PlatformQuiz, PlatformSlider,
    SkippedElement, StickerFrame, TranslatedStory,
};

/// Width and height fractions of one sticker kind.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerSize {
    /// Width fraction of the story frame.
    pub width: f64,
    /// Height fraction of the story frame.
    pub height: f64,
}

impl StickerSize {
    const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Platform schema parameters.
///
/// Positions are projected through `reference`: `local = pct * W / 100`, then `x = local / W`.
/// The reference is the render canvas, so translated stickers land where the rasterized widgets
/// are drawn.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Frame the fractional coordinates are relative to.
    pub reference: Canvas,
    /// Poll sticker size.
    pub poll: StickerSize,
    /// Quiz sticker size.
    pub quiz: StickerSize,
    /// Slider sticker size.
    pub slider: StickerSize,
    /// Question sticker size.
    pub question: StickerSize,
    /// Poll options kept.
    pub max_poll_options: usize,
    /// Quiz options kept.
    pub max_quiz_options: usize,
    /// Emoji used when a slider does not name one.
    pub default_slider_emoji: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            reference: Canvas::STORY,
            poll: StickerSize::new(0.6, 0.15),
            quiz: StickerSize::new(0.6, 0.2),
            slider: StickerSize::new(0.6, 0.1),
            question: StickerSize::new(0.6, 0.15),
            max_poll_options: 2,
            max_quiz_options: 4,
            default_slider_emoji: "🔥".to_owned(),
        }
    }
}

/// Both platform polls and quizzes need at least this many options.
const MIN_OPTIONS: usize = 2;

impl TranslatorConfig {
    /// Reject limits and frames the platform schema cannot represent.
    pub fn validate(&self) -> StoryResult<()> {
        self.reference.validate()?;
        if self.max_poll_options < MIN_OPTIONS {
            return Err(StoryError::validation(format!(
                "max_poll_options must be >= {MIN_OPTIONS}"
            )));
        }
        if self.max_quiz_options < MIN_OPTIONS {
            return Err(StoryError::validation(format!(
                "max_quiz_options must be >= {MIN_OPTIONS}"
            )));
        }
        for (kind, size) in [
            ("poll", self.poll),
            ("quiz", self.quiz),
            ("slider", self.slider),
            ("question", self.question),
        ] {
            let fraction = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
            if !fraction(size.width) || !fraction(size.height) {
                return Err(StoryError::validation(format!(
                    "{kind} sticker size must be within (0, 1], got {}x{}",
                    size.width, size.height
                )));
            }
        }
        Ok(())
    }
}

/// Maps slides onto the platform's sticker buckets.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    /// Translator with explicit schema parameters.
    pub fn new(config: TranslatorConfig) -> StoryResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Schema parameters in use.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate a story. The platform format is single-frame, so only the first slide counts.
    pub fn translate_slides(&self, slides: &[Slide]) -> StoryResult<TranslatedStory> {
        let Some(first) = slides.first() else {
            return Err(StoryError::validation("story has no slides to translate"));
        };
        if slides.len() > 1 {
            tracing::info!(
                slides = slides.len(),
                "platform stories are single-frame, translating the first slide only"
            );
        }
        Ok(self.translate_slide(first))
    }

    /// Translate one slide. Unsupported elements and cut options are reported, never fatal.
    #[tracing::instrument(level = "debug", skip_all, fields(elements = slide.elements().len()))]
    pub fn translate_slide(&self, slide: &Slide) -> TranslatedStory {
        let mut out = TranslatedStory::default();
        for r in slide.rejected() {
            out.skipped.push(SkippedElement {
                index: r.index,
                kind: r.kind.clone(),
                reason: r.reason.clone(),
            });
        }

        for el in slide.elements() {
            if let Err(e) = self.translate_element(el, &mut out) {
                tracing::warn!(element = el.index(), kind = el.kind().name(), error = %e, "element not translated");
                out.skipped.push(SkippedElement {
                    index: el.index(),
                    kind: el.kind().name().to_owned(),
                    reason: e.to_string(),
                });
            }
        }
        out.skipped.sort_by_key(|s| s.index);
        out
    }

    fn translate_element(&self, el: &Element, out: &mut TranslatedStory) -> StoryResult<()> {
        let pos = el.position();
        match el.kind() {
            ElementKind::Poll(p) => {
                let poll = self.poll(el.index(), p, pos, out)?;
                out.polls.push(poll);
            }
            ElementKind::Quiz(q) => {
                let quiz = self.quiz(el.index(), q, pos, out)?;
                out.quizzes.push(quiz);
            }
            ElementKind::Slider(s) => out.sliders.push(self.slider(s, pos)),
            ElementKind::Question(q) => out.questions.push(self.question(q, pos)),
            ElementKind::Text(_) | ElementKind::Image(_) | ElementKind::Sticker(_) => {
                return Err(StoryError::translation(format!(
                    "'{}' has no platform sticker; it is only part of the rendered media",
                    el.kind().name()
                )));
            }
        }
        Ok(())
    }

    fn frame(&self, pos: Position, size: StickerSize) -> StickerFrame {
        let Canvas { width, height } = self.config.reference;
        let (w, h) = (f64::from(width), f64::from(height));
        let local_x = pos.x_pct() * w / 100.0;
        let local_y = pos.y_pct() * h / 100.0;
        StickerFrame {
            x: (local_x / w).clamp(0.0, 1.0),
            y: (local_y / h).clamp(0.0, 1.0),
            width: size.width,
            height: size.height,
        }
    }

    fn poll(
        &self,
        index: usize,
        p: &PollContent,
        pos: Position,
        out: &mut TranslatedStory,
    ) -> StoryResult<PlatformPoll> {
        let options = p.options();
        if options.len() < MIN_OPTIONS {
            return Err(StoryError::translation(format!(
                "poll needs at least {MIN_OPTIONS} options, got {}",
                options.len()
            )));
        }
        let keep = options.len().min(self.config.max_poll_options);
        record_dropped(out, index, "poll", &options[keep..], false);
        Ok(PlatformPoll {
            frame: self.frame(pos, self.config.poll),
            question: p.question().to_owned(),
            options: options[..keep].to_vec(),
        })
    }

    fn quiz(
        &self,
        index: usize,
        q: &QuizContent,
        pos: Position,
        out: &mut TranslatedStory,
    ) -> StoryResult<PlatformQuiz> {
        let options = q.options();
        if options.len() < MIN_OPTIONS {
            return Err(StoryError::translation(format!(
                "quiz needs at least {MIN_OPTIONS} options, got {}",
                options.len()
            )));
        }
        let keep = options.len().min(self.config.max_quiz_options);
        let correct_dropped = q.correct_index() >= keep;
        record_dropped(out, index, "quiz", &options[keep..], correct_dropped);
        Ok(PlatformQuiz {
            frame: self.frame(pos, self.config.quiz),
            question: q.question().to_owned(),
            options: options[..keep].to_vec(),
            correct_option: q.correct_index().min(keep.saturating_sub(1)),
        })
    }

    fn slider(&self, s: &SliderContent, pos: Position) -> PlatformSlider {
        PlatformSlider {
            frame: self.frame(pos, self.config.slider),
            question: s.question().to_owned(),
            emoji: s
                .emoji()
                .unwrap_or(self.config.default_slider_emoji.as_str())
                .to_owned(),
        }
    }

    fn question(&self, q: &QuestionContent, pos: Position) -> PlatformQuestion {
        PlatformQuestion {
            frame: self.frame(pos, self.config.question),
            question: q.question().to_owned(),
        }
    }
}

fn record_dropped(
    out: &mut TranslatedStory,
    index: usize,
    kind: &str,
    removed: &[String],
    correct_option_dropped: bool,
) {
    if removed.is_empty() {
        return;
    }
    tracing::debug!(
        element = index,
        kind,
        dropped = removed.len(),
        correct_option_dropped,
        "options over platform limit dropped"
    );
    out.dropped.push(DroppedOptions {
        index,
        kind: kind.to_owned(),
        options: removed.to_vec(),
        correct_option_dropped,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/translate/translator.rs"]
mod tests;
