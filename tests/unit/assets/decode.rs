use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let prepared = decode_resized(&png_bytes(image::DynamicImage::ImageRgba8(img)), |w, h| {
        (w, h)
    })
    .unwrap();
    assert_eq!((prepared.width, prepared.height), (1, 1));
    assert!(prepared.has_alpha);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_resizes_to_target_and_reports_opaque_sources() {
    let img = image::RgbImage::from_pixel(8, 4, image::Rgb([10, 20, 30]));
    let prepared =
        decode_resized(&png_bytes(image::DynamicImage::ImageRgb8(img)), |_, _| (16, 16)).unwrap();
    assert_eq!((prepared.width, prepared.height), (16, 16));
    assert!(!prepared.has_alpha);
    assert_eq!(prepared.rgba8_premul.len(), 16 * 16 * 4);
    for (got, want) in prepared.rgba8_premul[..4].iter().zip([10u8, 20, 30, 255]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_resized(b"definitely not an image", |w, h| (w, h)).unwrap_err();
    assert!(matches!(err, StoryError::Decode(_)));
}

#[test]
fn oversized_target_is_a_decode_error() {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
    let err = decode_resized(&png_bytes(image::DynamicImage::ImageRgba8(img)), |_, _| {
        (4_000_000_000, 4_000_000_000)
    })
    .unwrap_err();
    assert!(matches!(err, StoryError::Decode(_)));
    assert!(err.to_string().contains("exceeds"));
}
