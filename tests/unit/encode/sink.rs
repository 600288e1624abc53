use super::*;

fn frame(w: u32, h: u32, px: [u8; 4]) -> Frame {
    Frame {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn png_round_trip_preserves_pixels() {
    let f = frame(3, 2, [10, 20, 30, 255]);
    let bytes = encode_frame(&f, OutputFormat::Png).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn jpeg_decodes_to_same_size() {
    let f = frame(16, 16, [200, 100, 50, 255]);
    let bytes = encode_frame(&f, OutputFormat::Jpeg { quality: 90 }).unwrap();
    assert_eq!(&bytes[..2], &[0xff, 0xd8]);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (16, 16));
}

#[test]
fn short_buffer_is_an_encode_error() {
    let mut f = frame(2, 2, [0, 0, 0, 255]);
    f.data.pop();
    assert!(matches!(
        encode_frame(&f, OutputFormat::Png),
        Err(StoryError::Encode(_))
    ));
}

#[test]
fn dir_sink_writes_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(dir.path().join("out"), "/generated/").unwrap();
    let url = sink.store(0, OutputFormat::Png, b"abc").unwrap();
    assert_eq!(url, "/generated/slide_1.png");
    assert_eq!(
        std::fs::read(dir.path().join("out/slide_1.png")).unwrap(),
        b"abc"
    );
    let url = sink
        .store(4, OutputFormat::Jpeg { quality: 85 }, b"x")
        .unwrap();
    assert_eq!(url, "/generated/slide_5.jpg");
}

#[test]
fn in_memory_sink_keeps_store_order() {
    let mut sink = InMemorySink::new();
    sink.store(1, OutputFormat::Png, b"b").unwrap();
    sink.store(0, OutputFormat::Png, b"a").unwrap();
    let idx: Vec<usize> = sink.items().iter().map(|i| i.0).collect();
    assert_eq!(idx, vec![1, 0]);
}
