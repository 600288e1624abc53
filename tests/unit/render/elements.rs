use std::io::Cursor;

use super::*;
use crate::assets::fetch::MemoryFetcher;
use crate::foundation::core::Rgba8;
use crate::foundation::error::StoryError;
use crate::scene::slide::{ImageSizing, Position, StickerKind};

fn canvas() -> Canvas {
    Canvas::new(100, 100).unwrap()
}

fn painter(fetcher: MemoryFetcher) -> ElementPainter {
    ElementPainter::new(canvas(), 60, Arc::new(fetcher), None)
}

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn text_lines_step_by_font_size_plus_gap() {
    let el = Element::new(
        0,
        Position::new(0.0, 0.0),
        ElementKind::Text(TextContent::new("I\nI", 8, Rgba8::opaque(0, 0, 255))),
    );
    let mut s = Surface::filled(canvas(), Rgba8::WHITE);
    painter(MemoryFetcher::new()).paint(&el, &mut s).unwrap();
    assert_eq!(s.pixel(2, 0), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(2, 13), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(2, 10), Some([255, 255, 255, 255]));
}

#[test]
fn image_is_fitted_and_placed_at_position() {
    let fetcher = MemoryFetcher::new().with("mem://img", png(4, 2, [255, 0, 0, 255]));
    let el = Element::new(
        0,
        Position::new(10.0, 10.0),
        ElementKind::Image(ImageContent::new("mem://img", ImageSizing::MaxDimension(10))),
    );
    let mut s = Surface::filled(canvas(), Rgba8::WHITE);
    painter(fetcher).paint(&el, &mut s).unwrap();
    assert_eq!(s.pixel(14, 12), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(14, 16), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(21, 12), Some([255, 255, 255, 255]));
}

#[test]
fn missing_image_errors_without_touching_surface() {
    let el = Element::new(
        3,
        Position::new(0.0, 0.0),
        ElementKind::Image(ImageContent::new("mem://nope", ImageSizing::MaxDimension(10))),
    );
    let mut s = Surface::filled(canvas(), Rgba8::WHITE);
    let err = painter(MemoryFetcher::new()).paint(&el, &mut s).unwrap_err();
    assert!(matches!(err, StoryError::Fetch(_)));
    assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn sticker_is_drawn_at_requested_size() {
    let el = Element::new(
        0,
        Position::new(0.0, 0.0),
        ElementKind::Sticker(StickerContent::new(StickerKind::Heart, 64)),
    );
    let mut s = Surface::filled(canvas(), Rgba8::WHITE);
    painter(MemoryFetcher::new()).paint(&el, &mut s).unwrap();
    assert_eq!(s.pixel(32, 30), Some([0xe5, 0x39, 0x35, 0xff]));
    assert_eq!(s.pixel(80, 80), Some([255, 255, 255, 255]));
}

#[test]
fn huge_stretch_fails_the_element_only() {
    let fetcher = MemoryFetcher::new().with("mem://img", png(1, 1, [255, 0, 0, 255]));
    let el = Element::new(
        0,
        Position::new(0.0, 0.0),
        ElementKind::Image(ImageContent::new(
            "mem://img",
            ImageSizing::Stretch {
                width: 4_000_000_000,
                height: 4_000_000_000,
            },
        )),
    );
    let mut s = Surface::filled(canvas(), Rgba8::WHITE);
    let err = painter(fetcher).paint(&el, &mut s).unwrap_err();
    assert!(matches!(err, StoryError::Decode(_)));
    assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
}
