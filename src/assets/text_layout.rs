use std::collections::HashMap;

use crate::assets::fonts::FontFace;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{StoryError, StoryResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// One shaped line plus the font handle its glyph ids refer to.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl ShapedLine {
    /// Advance width of the widest line in the layout.
    #[cfg(test)]
    pub(crate) fn width(&self) -> f32 {
        self.layout.width()
    }
}

struct RegisteredFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Parley contexts plus the faces already registered with them.
///
/// Not shared between threads; each render worker owns one.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<String, RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn register(&mut self, face: &FontFace) -> StoryResult<&RegisteredFace> {
        if !self.faces.contains_key(face.label()) {
            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.data().to_vec()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                StoryError::font(format!("no font families in '{}'", face.label()))
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    StoryError::font(format!("font family in '{}' has no name", face.label()))
                })?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.data().to_vec()),
                0,
            );
            tracing::debug!(face = face.label(), family = %family, "registered font face");
            self.faces
                .insert(face.label().to_string(), RegisteredFace { family, font });
        }
        self.faces
            .get(face.label())
            .ok_or_else(|| StoryError::font("font registration lost"))
    }

    /// Shape a single line of text without wrapping.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> StoryResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StoryError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let (family, font) = {
            let reg = self.register(face)?;
            (reg.family.clone(), reg.font.clone())
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(ShapedLine { layout, font })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text_layout.rs"]
mod tests;
