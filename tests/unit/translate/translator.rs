use super::*;
use crate::foundation::core::Rgba8;
use crate::scene::slide::{Background, StickerContent, StickerKind, TextContent};

fn opts(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("o{i}")).collect()
}

fn slide(elements: Vec<ElementKind>) -> Slide {
    let elements = elements
        .into_iter()
        .enumerate()
        .map(|(i, k)| Element::new(i, Position::new(25.0, 50.0), k))
        .collect();
    Slide::new(Background::default(), elements)
}

#[test]
fn zero_slides_is_a_validation_error() {
    let err = Translator::default().translate_slides(&[]).unwrap_err();
    assert!(matches!(err, StoryError::Validation(_)));
}

#[test]
fn poll_keeps_first_two_options_and_reports_the_rest() {
    let s = slide(vec![ElementKind::Poll(PollContent::new("Q", opts(5)))]);
    let out = Translator::default().translate_slide(&s);
    assert_eq!(out.polls.len(), 1);
    assert_eq!(out.polls[0].options, vec!["o1", "o2"]);
    assert_eq!(out.dropped.len(), 1);
    assert_eq!(out.dropped[0].options, vec!["o3", "o4", "o5"]);
    assert!(!out.dropped[0].correct_option_dropped);
}

#[test]
fn positions_are_fractions_of_the_reference_frame() {
    let s = slide(vec![ElementKind::Poll(PollContent::new("Q", opts(2)))]);
    let out = Translator::default().translate_slide(&s);
    let f = out.polls[0].frame;
    assert!((f.x - 0.25).abs() < 1e-12);
    assert!((f.y - 0.5).abs() < 1e-12);
    assert_eq!((f.width, f.height), (0.6, 0.15));
    assert!(out.dropped.is_empty());
}

#[test]
fn quiz_correct_option_survives_truncation() {
    let s = slide(vec![ElementKind::Quiz(QuizContent::new("Q", opts(6), 2))]);
    let out = Translator::default().translate_slide(&s);
    let q = &out.quizzes[0];
    assert_eq!(q.options.len(), 4);
    assert_eq!(q.correct_option, 2);
    assert!(!out.dropped[0].correct_option_dropped);
}

#[test]
fn quiz_with_removed_correct_option_is_clamped_and_flagged() {
    let s = slide(vec![ElementKind::Quiz(QuizContent::new("Q", opts(6), 5))]);
    let out = Translator::default().translate_slide(&s);
    assert_eq!(out.quizzes[0].correct_option, 3);
    assert_eq!(out.dropped[0].options, vec!["o5", "o6"]);
    assert!(out.dropped[0].correct_option_dropped);
}

#[test]
fn single_option_poll_is_skipped_with_reason() {
    let s = slide(vec![ElementKind::Poll(PollContent::new("Q", opts(1)))]);
    let out = Translator::default().translate_slide(&s);
    assert!(out.polls.is_empty());
    assert_eq!(out.skipped.len(), 1);
    assert!(out.skipped[0].reason.contains("at least 2"));
}

#[test]
fn render_only_elements_are_skipped_and_others_bucketed() {
    let s = slide(vec![
        ElementKind::Text(TextContent::new("hi", 32, Rgba8::WHITE)),
        ElementKind::Slider(SliderContent::new("Rate", "1", "10", None)),
        ElementKind::Sticker(StickerContent::new(StickerKind::Star, 50)),
        ElementKind::Question(QuestionContent::new("Ask")),
        ElementKind::Slider(SliderContent::new("Love", "no", "yes", Some("😍".into()))),
    ]);
    let out = Translator::default().translate_slide(&s);
    assert_eq!(out.sticker_count(), 3);
    assert_eq!(out.sliders[0].emoji, "🔥");
    assert_eq!(out.sliders[1].emoji, "😍");
    assert_eq!(out.questions[0].frame.height, 0.15);
    let skipped: Vec<_> = out.skipped.iter().map(|s| (s.index, s.kind.as_str())).collect();
    assert_eq!(skipped, vec![(0, "text"), (2, "sticker")]);
    assert!(out.skipped[0].reason.starts_with("translation error:"));
}

#[test]
fn only_first_slide_is_translated() {
    let a = slide(vec![ElementKind::Question(QuestionContent::new("first"))]);
    let b = slide(vec![ElementKind::Question(QuestionContent::new("second"))]);
    let out = Translator::default().translate_slides(&[a, b]).unwrap();
    assert_eq!(out.questions.len(), 1);
    assert_eq!(out.questions[0].question, "first");
}

#[test]
fn limits_below_two_options_are_rejected() {
    for config in [
        TranslatorConfig {
            max_quiz_options: 0,
            ..TranslatorConfig::default()
        },
        TranslatorConfig {
            max_poll_options: 0,
            ..TranslatorConfig::default()
        },
        TranslatorConfig {
            max_quiz_options: 1,
            ..TranslatorConfig::default()
        },
    ] {
        let err = Translator::new(config).unwrap_err();
        assert!(matches!(err, StoryError::Validation(_)), "{err}");
    }
}

#[test]
fn degenerate_reference_frame_and_sizes_are_rejected() {
    let zero_frame = TranslatorConfig {
        reference: Canvas {
            width: 0,
            height: 1920,
        },
        ..TranslatorConfig::default()
    };
    assert!(matches!(
        Translator::new(zero_frame).unwrap_err(),
        StoryError::Validation(_)
    ));

    let nan_size = TranslatorConfig {
        slider: StickerSize {
            width: f64::NAN,
            height: 0.1,
        },
        ..TranslatorConfig::default()
    };
    assert!(matches!(
        Translator::new(nan_size).unwrap_err(),
        StoryError::Validation(_)
    ));
}

#[test]
fn minimal_valid_limits_translate_without_panicking() {
    let translator = Translator::new(TranslatorConfig {
        max_poll_options: 2,
        max_quiz_options: 2,
        ..TranslatorConfig::default()
    })
    .unwrap();
    let s = slide(vec![ElementKind::Quiz(QuizContent::new("Q", opts(4), 3))]);
    let out = translator.translate_slide(&s);
    assert_eq!(out.quizzes.len(), 1);
    assert_eq!(out.quizzes[0].options, vec!["o1", "o2"]);
    assert_eq!(out.quizzes[0].correct_option, 1);
    assert!(out.dropped[0].correct_option_dropped);
    assert!(out.quizzes[0].frame.x.is_finite());
}
