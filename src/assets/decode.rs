use anyhow::Context;

use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest resample target accepted, in pixels.
const MAX_TARGET_PIXELS: u64 = 4096 * 4096;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub(crate) struct PreparedImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Row-major premultiplied RGBA8.
    pub(crate) rgba8_premul: Vec<u8>,
    /// Whether the source carried an alpha channel.
    pub(crate) has_alpha: bool,
}

/// Decode encoded image bytes and resample with Lanczos3 to the size chosen by `target`.
///
/// `target` receives the source dimensions. Resampling happens on straight alpha, before
/// premultiplication.
pub(crate) fn decode_resized(
    bytes: &[u8],
    target: impl FnOnce(u32, u32) -> (u32, u32),
) -> StoryResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| StoryError::decode(format!("{e:#}")))?;
    let has_alpha = dyn_img.color().has_alpha();
    let rgba = dyn_img.to_rgba8();
    let (sw, sh) = rgba.dimensions();
    let (tw, th) = target(sw, sh);
    if tw == 0 || th == 0 {
        return Err(StoryError::decode(format!(
            "target size {tw}x{th} is degenerate"
        )));
    }
    if u64::from(tw) * u64::from(th) > MAX_TARGET_PIXELS {
        return Err(StoryError::decode(format!(
            "target size {tw}x{th} exceeds {MAX_TARGET_PIXELS} pixels"
        )));
    }

    let rgba = if (tw, th) == (sw, sh) {
        rgba
    } else {
        image::imageops::resize(&rgba, tw, th, image::imageops::FilterType::Lanczos3)
    };

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Ok(PreparedImage {
        width: tw,
        height: th,
        rgba8_premul,
        has_alpha,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
