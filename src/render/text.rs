use crate::assets::bitmap_font;
use crate::assets::fonts::FontFace;
use crate::assets::text_layout::{TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::Rgba8;

/// Offset of the legibility shadow drawn under each line.
pub(crate) const SHADOW_OFFSET: f64 = 2.0;
/// Extra spacing between consecutive lines on top of the font size.
pub(crate) const LINE_GAP: u32 = 5;

/// Draws single lines of text with the outline font when one is loaded, otherwise with the
/// built-in raster font.
///
/// An outline face that fails to shape is dropped for the painter's lifetime, so the warning is
/// logged once per worker.
pub(crate) struct TextPainter {
    face: Option<FontFace>,
    engine: TextLayoutEngine,
}

impl TextPainter {
    pub(crate) fn new(face: Option<FontFace>) -> Self {
        Self {
            face,
            engine: TextLayoutEngine::new(),
        }
    }

    /// Whether text currently draws with the built-in raster font.
    #[cfg(test)]
    pub(crate) fn uses_builtin(&self) -> bool {
        self.face.is_none()
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub(crate) fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f64,
        y: f64,
        size_px: u32,
        color: Rgba8,
    ) {
        if text.is_empty() || size_px == 0 {
            return;
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        if let Some(face) = self.face.clone() {
            match self
                .engine
                .layout_line(text, &face, size_px as f32, TextBrushRgba8::from(color))
            {
                Ok(shaped) => {
                    for line in shaped.layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(&shaped.font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    return;
                }
                Err(e) => {
                    tracing::warn!(face = face.label(), error = %e, "outline font unusable, using built-in font");
                    self.face = None;
                }
            }
        }

        for cell in bitmap_font::layout_cells(text, size_px) {
            let (cx, cy, s) = (
                f64::from(cell.x),
                f64::from(cell.y),
                f64::from(cell.size),
            );
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(cx, cy, cx + s, cy + s));
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Draw `text` over a black copy offset by [`SHADOW_OFFSET`].
    pub(crate) fn draw_shadowed_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f64,
        y: f64,
        size_px: u32,
        color: Rgba8,
    ) {
        self.draw_line(
            ctx,
            text,
            x + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            size_px,
            Rgba8::BLACK,
        );
        self.draw_line(ctx, text, x, y, size_px, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
