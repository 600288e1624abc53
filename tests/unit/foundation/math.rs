use super::*;

#[test]
fn pct_to_px_maps_endpoints() {
    assert_eq!(pct_to_px(0.0, 1080), 0);
    assert_eq!(pct_to_px(100.0, 1080), 1080);
    assert_eq!(pct_to_px(10.0, 1080), 108);
    assert_eq!(pct_to_px(10.0, 1920), 192);
}

#[test]
fn pct_to_px_floors_and_clamps() {
    assert_eq!(pct_to_px(33.3, 1080), 359);
    assert_eq!(pct_to_px(-5.0, 1080), 0);
    assert_eq!(pct_to_px(250.0, 1920), 1920);
    assert_eq!(pct_to_px(f64::NAN, 1920), 0);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(premul_over_px([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_transparent_src_is_noop() {
    assert_eq!(premul_over_px([10, 20, 30, 40], [0, 0, 0, 0]), [10, 20, 30, 40]);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
}
