use serde_json::json;

use super::*;

fn slide_from(v: serde_json::Value) -> Slide {
    let def: SlideDef = serde_json::from_value(v).unwrap();
    Slide::from_def(&def, &SceneDefaults::default())
}

#[test]
fn empty_story_is_a_validation_error() {
    let err = Scene::from_def(&StoryDataDef::default(), &SceneDefaults::default()).unwrap_err();
    assert!(matches!(err, StoryError::Validation(_)));
}

#[test]
fn missing_background_and_duration_use_defaults() {
    let s = slide_from(json!({ "elements": [] }));
    assert_eq!(s.background(), &Background::Color(Rgba8::BLACK));
    assert_eq!(s.duration(), 5.0);

    let s = slide_from(json!({ "duration": -2.0 }));
    assert_eq!(s.duration(), 5.0);
    let s = slide_from(json!({ "duration": 7.5 }));
    assert_eq!(s.duration(), 7.5);
}

#[test]
fn background_variants_and_legacy_fields() {
    let s = slide_from(json!({ "background": { "type": "color", "value": "#ff0000" } }));
    assert_eq!(s.background(), &Background::Color(Rgba8::opaque(255, 0, 0)));

    let s = slide_from(json!({ "background": { "type": "color", "color": "#00ff00" } }));
    assert_eq!(s.background(), &Background::Color(Rgba8::opaque(0, 255, 0)));

    let s = slide_from(json!({ "background": { "type": "color", "value": "not-a-color" } }));
    assert_eq!(s.background(), &Background::Color(Rgba8::BLACK));

    let s = slide_from(json!({ "background": { "type": "image", "value": "https://x/bg.jpg" } }));
    assert_eq!(
        s.background(),
        &Background::Image {
            url: "https://x/bg.jpg".to_owned()
        }
    );

    let s = slide_from(json!({ "background": { "type": "image" } }));
    assert_eq!(s.background(), &Background::Color(Rgba8::BLACK));
}

#[test]
fn positions_are_clamped_not_rejected() {
    let s = slide_from(json!({
        "elements": [
            { "type": "text", "position": { "x": -20, "y": 140 }, "content": "hi" }
        ]
    }));
    let p = s.elements()[0].position();
    assert_eq!((p.x_pct(), p.y_pct()), (0.0, 100.0));
    assert_eq!(p.to_pixels(Canvas::STORY), PixelPoint::new(0, 1920));
}

#[test]
fn text_accepts_object_or_bare_string_with_style() {
    let s = slide_from(json!({
        "elements": [
            { "type": "text", "content": { "text": "a\nb", "fontSize": 40, "color": "#123456" } },
            { "type": "text", "content": "plain", "style": { "fontSize": 20, "color": "#000000" } },
            { "type": "text", "content": "fallback" }
        ]
    }));
    let texts: Vec<&TextContent> = s
        .elements()
        .iter()
        .map(|e| match e.kind() {
            ElementKind::Text(t) => t,
            other => panic!("expected text, got {other:?}"),
        })
        .collect();
    assert_eq!(texts[0].lines().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(texts[0].font_size(), 40);
    assert_eq!(texts[0].color(), Rgba8::opaque(0x12, 0x34, 0x56));
    assert_eq!(texts[1].text(), "plain");
    assert_eq!(texts[1].font_size(), 20);
    assert_eq!(texts[1].color(), Rgba8::BLACK);
    assert_eq!(texts[2].font_size(), 32);
    assert_eq!(texts[2].color(), Rgba8::WHITE);
}

#[test]
fn quiz_correct_index_is_clamped_and_options_defaulted() {
    let s = slide_from(json!({
        "elements": [
            { "type": "quiz", "content": { "question": "Q", "options": ["A", "B", "C"], "correctAnswer": 9 } },
            { "type": "quiz", "content": { "question": "Q", "options": [], "correctIndex": 1 } },
            { "type": "poll", "content": "{\"question\":\"Encoded?\",\"options\":[]}" }
        ]
    }));
    let ElementKind::Quiz(q) = s.elements()[0].kind() else {
        panic!("expected quiz");
    };
    assert_eq!(q.correct_index(), 2);

    let ElementKind::Quiz(q) = s.elements()[1].kind() else {
        panic!("expected quiz");
    };
    assert_eq!(q.options().len(), 2);
    assert_eq!(q.correct_index(), 1);

    let ElementKind::Poll(p) = s.elements()[2].kind() else {
        panic!("expected poll");
    };
    assert_eq!(p.question(), "Encoded?");
    assert!(!p.options().is_empty());
}

#[test]
fn unknown_and_malformed_elements_are_recorded() {
    let s = slide_from(json!({
        "elements": [
            { "type": "hologram" },
            { "type": "poll", "content": { "options": [1, 2] } },
            { "type": "image", "content": {} },
            { "content": "no type" },
            { "type": "sticker", "content": { "type": "fire", "size": 80 } }
        ]
    }));
    assert_eq!(s.elements().len(), 1);
    assert_eq!(s.elements()[0].index(), 4);
    let indices: Vec<usize> = s.rejected().iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(s.rejected()[0].reason.contains("hologram"));
}

#[test]
fn sticker_unknown_kind_falls_back_to_heart() {
    assert_eq!(StickerKind::from_name("unicorn"), StickerKind::Heart);
    assert_eq!(StickerKind::from_name("Thumbs-Up"), StickerKind::ThumbsUp);
    for k in StickerKind::ALL {
        assert_eq!(StickerKind::from_name(k.as_str()), k);
    }
}

#[test]
fn image_sizing_modes() {
    let s = slide_from(json!({
        "elements": [
            { "type": "image", "content": { "url": "u", "width": 120, "height": 40 } },
            { "type": "image", "content": { "url": "u", "maxSize": 200 } },
            { "type": "image", "content": "u", "style": { "width": 10, "height": 20 } },
            { "type": "image", "content": { "url": "u" } }
        ]
    }));
    let sizings: Vec<ImageSizing> = s
        .elements()
        .iter()
        .map(|e| match e.kind() {
            ElementKind::Image(i) => i.sizing(),
            other => panic!("expected image, got {other:?}"),
        })
        .collect();
    assert_eq!(
        sizings,
        vec![
            ImageSizing::Stretch {
                width: 120,
                height: 40
            },
            ImageSizing::MaxDimension(200),
            ImageSizing::Stretch {
                width: 10,
                height: 20
            },
            ImageSizing::MaxDimension(300),
        ]
    );

    assert_eq!(ImageSizing::MaxDimension(300).target_size(600, 300), (300, 150));
    assert_eq!(ImageSizing::MaxDimension(300).target_size(100, 400), (75, 300));
}

#[test]
fn image_sizes_are_clamped() {
    let s = slide_from(json!({
        "elements": [
            { "type": "image", "content": { "url": "u", "width": 4000000000u64, "height": 4000000000u64 } },
            { "type": "image", "content": { "url": "u", "maxSize": 1e12 } }
        ]
    }));
    let sizings: Vec<ImageSizing> = s
        .elements()
        .iter()
        .map(|e| match e.kind() {
            ElementKind::Image(i) => i.sizing(),
            other => panic!("expected image, got {other:?}"),
        })
        .collect();
    assert_eq!(
        sizings,
        vec![
            ImageSizing::Stretch {
                width: 4096,
                height: 4096
            },
            ImageSizing::MaxDimension(4096),
        ]
    );
}
