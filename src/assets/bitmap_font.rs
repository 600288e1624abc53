//! Built-in 5×7 raster font.
//!
//! Always available, so text never fails to draw when no outline font can be loaded. Glyphs are
//! column-major; bit 0 of each column byte is the top row.

const FIRST: u8 = 0x20;
const LAST: u8 = 0x7e;
const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Columns advanced per character (glyph plus one column of spacing).
const ADVANCE_COLS: u32 = 6;

#[rustfmt::skip]
const GLYPHS: [[u8; 5]; (LAST - FIRST + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5f, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7f, 0x14, 0x7f, 0x14], [0x24, 0x2a, 0x7f, 0x2a, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x55, 0x22, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], [0x00, 0x1c, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1c, 0x00], [0x08, 0x2a, 0x1c, 0x2a, 0x08], [0x08, 0x08, 0x3e, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3e, 0x51, 0x49, 0x45, 0x3e], [0x00, 0x42, 0x7f, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4b, 0x31], [0x18, 0x14, 0x12, 0x7f, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3c, 0x4a, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1e], [0x00, 0x36, 0x36, 0x00, 0x00],
    [0x00, 0x56, 0x36, 0x00, 0x00], [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], [0x32, 0x49, 0x79, 0x41, 0x3e],
    [0x7e, 0x11, 0x11, 0x11, 0x7e], [0x7f, 0x49, 0x49, 0x49, 0x36], [0x3e, 0x41, 0x41, 0x41, 0x22],
    [0x7f, 0x41, 0x41, 0x22, 0x1c], [0x7f, 0x49, 0x49, 0x49, 0x41], [0x7f, 0x09, 0x09, 0x01, 0x01],
    [0x3e, 0x41, 0x41, 0x51, 0x32], [0x7f, 0x08, 0x08, 0x08, 0x7f], [0x00, 0x41, 0x7f, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3f, 0x01], [0x7f, 0x08, 0x14, 0x22, 0x41], [0x7f, 0x40, 0x40, 0x40, 0x40],
    [0x7f, 0x02, 0x04, 0x02, 0x7f], [0x7f, 0x04, 0x08, 0x10, 0x7f], [0x3e, 0x41, 0x41, 0x41, 0x3e],
    [0x7f, 0x09, 0x09, 0x09, 0x06], [0x3e, 0x41, 0x51, 0x21, 0x5e], [0x7f, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31], [0x01, 0x01, 0x7f, 0x01, 0x01], [0x3f, 0x40, 0x40, 0x40, 0x3f],
    [0x1f, 0x20, 0x40, 0x20, 0x1f], [0x7f, 0x20, 0x18, 0x20, 0x7f], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x03, 0x04, 0x78, 0x04, 0x03], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x00, 0x7f, 0x41, 0x41],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x41, 0x41, 0x7f, 0x00, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7f, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], [0x38, 0x44, 0x44, 0x48, 0x7f],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7e, 0x09, 0x01, 0x02], [0x08, 0x14, 0x54, 0x54, 0x3c],
    [0x7f, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7d, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3d, 0x00],
    [0x00, 0x7f, 0x10, 0x28, 0x44], [0x00, 0x41, 0x7f, 0x40, 0x00], [0x7c, 0x04, 0x18, 0x04, 0x78],
    [0x7c, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0x7c, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7c], [0x7c, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3f, 0x44, 0x40, 0x20], [0x3c, 0x40, 0x40, 0x20, 0x7c], [0x1c, 0x20, 0x40, 0x20, 0x1c],
    [0x3c, 0x40, 0x30, 0x40, 0x3c], [0x44, 0x28, 0x10, 0x28, 0x44], [0x0c, 0x50, 0x50, 0x50, 0x3c],
    [0x44, 0x64, 0x54, 0x4c, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x7f, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x08, 0x04, 0x08, 0x10, 0x08],
];

/// Filled box drawn for characters outside printable ASCII.
const REPLACEMENT: [u8; 5] = [0x7f, 0x41, 0x41, 0x41, 0x7f];

/// One lit dot of a laid-out string, in pixels relative to the string origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) size: u32,
}

/// Side length of one font dot for a requested pixel size.
///
/// A glyph is seven dots tall plus one dot of descent/leading, so the text is roughly
/// `size` pixels tall.
pub(crate) fn dot_size(size_px: u32) -> u32 {
    (size_px / 8).max(1)
}

/// Horizontal advance of `text` at `size_px`.
#[cfg(test)]
pub(crate) fn text_width(text: &str, size_px: u32) -> u32 {
    let n = text.chars().count() as u32;
    n.saturating_mul(ADVANCE_COLS).saturating_mul(dot_size(size_px))
}

fn glyph(ch: char) -> [u8; 5] {
    match u8::try_from(u32::from(ch)) {
        Ok(b) if (FIRST..=LAST).contains(&b) => GLYPHS[(b - FIRST) as usize],
        _ if ch.is_whitespace() => GLYPHS[0],
        _ => REPLACEMENT,
    }
}

/// Lit dots for a single line of text.
pub(crate) fn layout_cells(text: &str, size_px: u32) -> Vec<Cell> {
    let dot = dot_size(size_px);
    let mut out = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let base_x = (i as u32) * ADVANCE_COLS * dot;
        for (col, bits) in glyph(ch).iter().enumerate().take(GLYPH_COLS as usize) {
            for row in 0..GLYPH_ROWS {
                if bits & (1 << row) != 0 {
                    out.push(Cell {
                        x: base_x + (col as u32) * dot,
                        y: row * dot,
                        size: dot,
                    });
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap_font.rs"]
mod tests;
