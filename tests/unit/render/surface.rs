use super::*;

fn small() -> Canvas {
    Canvas::new(8, 8).unwrap()
}

#[test]
fn filled_surface_reports_color_everywhere() {
    let s = Surface::filled(small(), Rgba8::opaque(10, 20, 30));
    assert_eq!(s.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(s.pixel(7, 7), Some([10, 20, 30, 255]));
    assert_eq!(s.pixel(8, 0), None);
}

#[test]
fn paint_layer_composites_filled_rect() {
    let mut s = Surface::filled(small(), Rgba8::BLACK);
    s.paint_layer(|ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(2.0, 2.0, 4.0, 4.0));
        Ok(())
    })
    .unwrap();
    assert_eq!(s.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(3, 3), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 255]));
}

#[test]
fn failed_layer_leaves_surface_untouched() {
    let mut s = Surface::filled(small(), Rgba8::BLACK);
    let err = s
        .paint_layer(|ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 8.0, 8.0));
            Err(StoryError::fetch("boom"))
        })
        .unwrap_err();
    assert!(matches!(err, StoryError::Fetch(_)));
    assert_eq!(s.pixel(4, 4), Some([0, 0, 0, 255]));
}

#[test]
fn blit_clips_and_blends() {
    let mut s = Surface::filled(small(), Rgba8::WHITE);
    let img = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: [[0, 0, 0, 255], [0, 0, 0, 0], [0, 0, 128, 128], [0, 0, 0, 255]].concat(),
        has_alpha: true,
    };
    s.blit(&img, PixelPoint::new(7, 7));
    assert_eq!(s.pixel(7, 7), Some([0, 0, 0, 255]));

    s.blit(&img, PixelPoint::new(0, 0));
    assert_eq!(s.pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(0, 1), Some([127, 127, 255, 255]));
}

#[test]
fn opaque_blit_pastes_and_negative_origin_clips() {
    let mut s = Surface::filled(small(), Rgba8::WHITE);
    let img = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: [[1, 2, 3, 255], [4, 5, 6, 255], [7, 8, 9, 255], [10, 11, 12, 255]].concat(),
        has_alpha: false,
    };
    s.blit(&img, PixelPoint::new(-1, -1));
    assert_eq!(s.pixel(0, 0), Some([10, 11, 12, 255]));
    assert_eq!(s.pixel(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn frame_unpremultiplies_on_request() {
    let frame = Frame {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(0, 0), Some([64, 0, 0, 128]));
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 0, 128]);
}
