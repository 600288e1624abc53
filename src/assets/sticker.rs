use crate::assets::decode::PreparedImage;
use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::slide::StickerKind;

const HEART: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<path d="M32 56C12 42 4 32 4 20C4 11 11 4 20 4C26 4 30 8 32 12C34 8 38 4 44 4C53 4 60 11 60 20C60 32 52 42 32 56Z" fill="#e53935"/>
</svg>"##;

const FIRE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<path d="M32 4C36 16 48 22 48 38C48 50 40 60 32 60C24 60 16 50 16 38C16 28 22 22 24 14C28 20 30 24 30 28C34 22 34 12 32 4Z" fill="#ff6d00"/>
<path d="M32 30C36 38 40 42 40 48C40 54 36 58 32 58C28 58 24 54 24 48C24 42 30 38 32 30Z" fill="#ffd600"/>
</svg>"##;

const STAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<polygon points="32,4 40,24 62,24 44,38 51,60 32,46 13,60 20,38 2,24 24,24" fill="#fdd835"/>
</svg>"##;

const THUMBS_UP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<rect x="6" y="28" width="12" height="30" rx="2" fill="#1565c0"/>
<path d="M22 28L32 8C36 6 40 8 40 14L38 24L54 24C58 24 60 28 59 32L54 54C53 57 50 58 47 58L22 58Z" fill="#ffca28"/>
</svg>"##;

const CLAP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<g fill="#ffca28">
<rect x="14" y="14" width="18" height="42" rx="9" transform="rotate(-20 23 35)"/>
<rect x="32" y="14" width="18" height="42" rx="9" transform="rotate(20 41 35)"/>
</g>
<path d="M32 3L32 10M22 5L26 11M42 5L38 11" stroke="#ff7043" stroke-width="3" stroke-linecap="round" fill="none"/>
</svg>"##;

fn source(kind: StickerKind) -> &'static str {
    match kind {
        StickerKind::Heart => HEART,
        StickerKind::Fire => FIRE,
        StickerKind::Star => STAR,
        StickerKind::ThumbsUp => THUMBS_UP,
        StickerKind::Clap => CLAP,
    }
}

/// Rasterize the glyph for `kind` into a `size × size` premultiplied image.
pub(crate) fn rasterize_sticker(kind: StickerKind, size: u32) -> StoryResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(source(kind).as_bytes(), &opts)
        .map_err(|e| StoryError::decode(format!("parse {} sticker: {e}", kind.as_str())))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| StoryError::decode(format!("sticker size {size} is not allocatable")))?;
    let sx = (size as f32) / tree.size().width();
    let sy = (size as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(PreparedImage {
        width: size,
        height: size,
        rgba8_premul: pixmap.data().to_vec(),
        has_alpha: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sticker.rs"]
mod tests;
