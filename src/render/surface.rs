use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, PixelPoint, Rgba8};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::{premul_over_px, unpremultiply_rgba8_in_place};

/// A rendered slide as RGBA8 pixels.
///
/// Frames leave the compositor premultiplied; encoders un-premultiply on the way out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl Frame {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Mutable premultiplied raster that elements paint onto.
///
/// Vector drawing goes through [`Surface::paint_layer`]: `vello_cpu` renders into a fresh
/// buffer, so each layer is rasterized separately and then composited source-over. A layer whose
/// closure fails leaves the surface untouched.
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
}

impl Surface {
    /// Surface filled with one color.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let px = color.to_premul();
        let mut data = Vec::with_capacity(canvas.byte_len());
        for _ in 0..(canvas.width as usize) * (canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Self::from_parts(canvas, data)
    }

    /// Surface backed by an already-sized premultiplied image.
    pub(crate) fn from_image(canvas: Canvas, img: PreparedImage) -> StoryResult<Self> {
        if (img.width, img.height) != (canvas.width, canvas.height)
            || img.rgba8_premul.len() != canvas.byte_len()
        {
            return Err(StoryError::decode(format!(
                "background raster is {}x{}, canvas is {}x{}",
                img.width, img.height, canvas.width, canvas.height
            )));
        }
        Ok(Self::from_parts(canvas, img.rgba8_premul))
    }

    fn from_parts(canvas: Canvas, data: Vec<u8>) -> Self {
        Self {
            canvas,
            data,
            ctx: None,
            scratch: None,
        }
    }

    /// Raster size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }

    fn dims_u16(&self) -> StoryResult<(u16, u16)> {
        let w = u16::try_from(self.canvas.width)
            .map_err(|_| StoryError::validation("canvas width exceeds u16"))?;
        let h = u16::try_from(self.canvas.height)
            .map_err(|_| StoryError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Rasterize vector drawing in `draw` as one layer and composite it over the surface.
    pub(crate) fn paint_layer(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> StoryResult<()>,
    ) -> StoryResult<()> {
        let (w, h) = self.dims_u16()?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let drawn = draw(&mut ctx);
        if drawn.is_ok() {
            let mut layer = match self.scratch.take() {
                Some(p) if p.width() == w && p.height() == h => p,
                _ => vello_cpu::Pixmap::new(w, h),
            };
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
            for (d, s) in self
                .data
                .chunks_exact_mut(4)
                .zip(layer.data_as_u8_slice().chunks_exact(4))
            {
                if s[3] == 0 {
                    continue;
                }
                let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
            self.scratch = Some(layer);
        }
        self.ctx = Some(ctx);
        drawn
    }

    /// Place a premultiplied image with its top-left at `at`, clipped to the surface.
    ///
    /// Images with alpha blend source-over; opaque images are pasted.
    pub(crate) fn blit(&mut self, img: &PreparedImage, at: PixelPoint) {
        let (cw, ch) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        let x0 = i64::from(at.x).max(0);
        let y0 = i64::from(at.y).max(0);
        let x1 = (i64::from(at.x) + i64::from(img.width)).min(cw);
        let y1 = (i64::from(at.y) + i64::from(img.height)).min(ch);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let row_px = (x1 - x0) as usize;
        for y in y0..y1 {
            let sy = (y - i64::from(at.y)) as usize;
            let sx = (x0 - i64::from(at.x)) as usize;
            let s_start = (sy * img.width as usize + sx) * 4;
            let src = &img.rgba8_premul[s_start..s_start + row_px * 4];
            let d_start = self.offset(x0 as u32, y as u32);
            let dst = &mut self.data[d_start..d_start + row_px * 4];
            if !img.has_alpha {
                dst.copy_from_slice(src);
                continue;
            }
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
    }

    /// Finish painting.
    pub fn into_frame(self) -> Frame {
        Frame {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
