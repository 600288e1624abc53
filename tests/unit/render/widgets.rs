use super::*;
use crate::foundation::core::Canvas;
use crate::render::surface::Surface;

fn rgb(c: Rgba8) -> Option<[u8; 4]> {
    Some([c.r, c.g, c.b, 255])
}

fn draw(bg: Rgba8, f: impl FnOnce(&mut vello_cpu::RenderContext, &mut TextPainter)) -> Surface {
    let mut s = Surface::filled(Canvas::new(400, 400).unwrap(), bg);
    let mut text = TextPainter::new(None);
    s.paint_layer(|ctx| {
        f(ctx, &mut text);
        Ok(())
    })
    .unwrap();
    s
}

#[test]
fn panel_geometry() {
    assert_eq!(panel_height(0), 50);
    assert_eq!(panel_height(3), 170);
    let r = row_rect(PixelPoint::new(100, 200), 300, 2);
    assert_eq!((r.x0, r.y0, r.x1, r.y1), (110.0, 330.0, 390.0, 360.0));
}

#[test]
fn poll_draws_panel_rows_and_outline() {
    let poll = PollContent::new("Pick", vec!["A".into(), "B".into()]);
    let s = draw(Rgba8::WHITE, |ctx, text| {
        draw_poll(ctx, text, &poll, PixelPoint::new(10, 10), 300)
    });
    assert_eq!(s.pixel(210, 75), rgb(ROW_FILL));
    assert_eq!(s.pixel(210, 115), rgb(ROW_FILL));
    assert_eq!(s.pixel(10, 30), rgb(PANEL_OUTLINE));
    assert_eq!(s.pixel(309, 30), rgb(PANEL_OUTLINE));
    assert_eq!(s.pixel(100, 139), rgb(PANEL_OUTLINE));
    assert_eq!(s.pixel(100, 145), rgb(Rgba8::WHITE));
}

#[test]
fn quiz_highlights_only_correct_row_with_check() {
    let quiz = QuizContent::new("Q", vec!["A".into(), "B".into(), "C".into()], 1);
    let s = draw(Rgba8::WHITE, |ctx, text| {
        draw_quiz(ctx, text, &quiz, PixelPoint::new(10, 10), 300)
    });
    assert_eq!(s.pixel(210, 75), rgb(ROW_FILL));
    assert_eq!(s.pixel(210, 115), rgb(CORRECT_ROW_FILL));
    assert_eq!(s.pixel(210, 155), rgb(ROW_FILL));
    assert_eq!(s.pixel(288, 119), rgb(CHECK_COLOR));
    assert_eq!(s.pixel(288, 79), rgb(ROW_FILL));
}

#[test]
fn slider_draws_track_and_centered_handle() {
    let slider = SliderContent::new("Rate", "1", "10", None);
    let s = draw(Rgba8::BLACK, |ctx, text| {
        draw_slider(ctx, text, &slider, PixelPoint::new(50, 100), 300)
    });
    assert_eq!(s.pixel(60, 140), rgb(TRACK_COLOR));
    assert_eq!(s.pixel(340, 139), rgb(TRACK_COLOR));
    assert_eq!(s.pixel(200, 140), rgb(HANDLE_COLOR));
    assert_eq!(s.pixel(200, 126), rgb(Rgba8::WHITE));
    assert_eq!(s.pixel(200, 160), rgb(Rgba8::BLACK));
}

#[test]
fn question_draws_answer_box() {
    let q = QuestionContent::new("Ask me");
    let s = draw(Rgba8::BLACK, |ctx, text| {
        draw_question(ctx, text, &q, PixelPoint::new(10, 10), 300)
    });
    assert_eq!(s.pixel(250, 100), rgb(ROW_FILL));
    assert_eq!(s.pixel(10, 60), rgb(PANEL_OUTLINE));
}

/// Rightmost label ink column per option row. Panics on ink outside every row.
fn label_extent_per_row(s: &Surface, origin: PixelPoint, width: u32, rows: usize) -> Vec<u32> {
    let mut extent = vec![0u32; rows];
    for y in 0..400 {
        for x in 0..400 {
            if s.pixel(x, y) != rgb(OPTION_COLOR) {
                continue;
            }
            let (fx, fy) = (f64::from(x), f64::from(y));
            let row = (0..rows)
                .find(|&i| {
                    let r = row_rect(origin, width, i);
                    fx >= r.x0 && fx < r.x1 && fy >= r.y0 && fy < r.y1
                })
                .unwrap_or_else(|| panic!("label ink at ({x},{y}) outside every row"));
            extent[row] = extent[row].max(x);
        }
    }
    extent
}

#[test]
fn poll_option_i_is_drawn_in_row_i() {
    let origin = PixelPoint::new(10, 10);
    for (labels, wide_row) in [(["I", "WWW"], 1), (["WWW", "I"], 0)] {
        let poll = PollContent::new("", labels.iter().map(|l| l.to_string()).collect());
        let s = draw(Rgba8::WHITE, |ctx, text| {
            draw_poll(ctx, text, &poll, origin, 300)
        });
        let extent = label_extent_per_row(&s, origin, 300, 2);
        let narrow_row = 1 - wide_row;
        assert!(extent[narrow_row] > 0, "no ink in row {narrow_row}");
        assert!(
            extent[wide_row] > extent[narrow_row] + 20,
            "{labels:?} gave extents {extent:?}"
        );
    }
}

#[test]
fn quiz_option_i_is_drawn_in_row_i() {
    let origin = PixelPoint::new(10, 10);
    let quiz = QuizContent::new("", vec!["WWW".into(), "I".into(), "WW".into()], 2);
    let s = draw(Rgba8::WHITE, |ctx, text| {
        draw_quiz(ctx, text, &quiz, origin, 300)
    });
    let extent = label_extent_per_row(&s, origin, 300, 3);
    assert!(extent[1] > 0);
    assert!(extent[0] > extent[2] && extent[2] > extent[1], "{extent:?}");
}
