use std::sync::Arc;

use crate::assets::decode::decode_resized;
use crate::assets::fetch::Fetch;
use crate::assets::fonts::FontFace;
use crate::assets::sticker::rasterize_sticker;
use crate::foundation::core::{Canvas, PixelPoint};
use crate::foundation::error::StoryResult;
use crate::render::surface::Surface;
use crate::render::text::{LINE_GAP, TextPainter};
use crate::render::widgets;
use crate::scene::slide::{Element, ElementKind, ImageContent, StickerContent, TextContent};

/// Paints one element at a time onto a [`Surface`].
///
/// Holds per-worker text shaping state, so each render thread owns its own painter.
pub struct ElementPainter {
    canvas: Canvas,
    widget_width: u32,
    fetcher: Arc<dyn Fetch>,
    text: TextPainter,
}

impl ElementPainter {
    /// Painter for `canvas`. `font` of `None` selects the built-in raster font.
    pub fn new(
        canvas: Canvas,
        widget_width: u32,
        fetcher: Arc<dyn Fetch>,
        font: Option<FontFace>,
    ) -> Self {
        Self {
            canvas,
            widget_width,
            fetcher,
            text: TextPainter::new(font),
        }
    }

    /// Paint `el`. On error the surface is left as it was before the call.
    pub fn paint(&mut self, el: &Element, surface: &mut Surface) -> StoryResult<()> {
        let origin = el.position().to_pixels(self.canvas);
        let width = self.widget_width;
        let text = &mut self.text;
        match el.kind() {
            ElementKind::Text(t) => surface.paint_layer(|ctx| {
                draw_text(ctx, text, t, origin);
                Ok(())
            }),
            ElementKind::Image(img) => paint_image(self.fetcher.as_ref(), img, origin, surface),
            ElementKind::Poll(p) => surface.paint_layer(|ctx| {
                widgets::draw_poll(ctx, text, p, origin, width);
                Ok(())
            }),
            ElementKind::Quiz(q) => surface.paint_layer(|ctx| {
                widgets::draw_quiz(ctx, text, q, origin, width);
                Ok(())
            }),
            ElementKind::Slider(s) => surface.paint_layer(|ctx| {
                widgets::draw_slider(ctx, text, s, origin, width);
                Ok(())
            }),
            ElementKind::Sticker(s) => paint_sticker(s, origin, surface),
            ElementKind::Question(q) => surface.paint_layer(|ctx| {
                widgets::draw_question(ctx, text, q, origin, width);
                Ok(())
            }),
        }
    }
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    painter: &mut TextPainter,
    t: &TextContent,
    origin: PixelPoint,
) {
    let step = f64::from(t.font_size() + LINE_GAP);
    for (i, line) in t.lines().enumerate() {
        painter.draw_shadowed_line(
            ctx,
            line,
            f64::from(origin.x),
            f64::from(origin.y) + step * i as f64,
            t.font_size(),
            t.color(),
        );
    }
}

fn paint_image(
    fetcher: &dyn Fetch,
    img: &ImageContent,
    origin: PixelPoint,
    surface: &mut Surface,
) -> StoryResult<()> {
    let bytes = fetcher.fetch(img.url())?;
    let sizing = img.sizing();
    let prepared = decode_resized(&bytes, |w, h| sizing.target_size(w, h))?;
    surface.blit(&prepared, origin);
    Ok(())
}

fn paint_sticker(s: &StickerContent, origin: PixelPoint, surface: &mut Surface) -> StoryResult<()> {
    let glyph = rasterize_sticker(s.kind(), s.size())?;
    surface.blit(&glyph, origin);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/elements.rs"]
mod tests;
