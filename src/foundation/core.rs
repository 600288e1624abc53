use crate::foundation::error::{StoryError, StoryResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The 9:16 story canvas every slide renders into.
    pub const STORY: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Create a validated canvas. Both sides must be in `1..=u16::MAX` for the raster backend.
    pub fn new(width: u32, height: u32) -> StoryResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that the canvas can back a raster surface.
    pub fn validate(self) -> StoryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StoryError::validation(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Number of RGBA8 bytes backing a surface of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STORY
    }
}

/// Integer pixel position on a canvas, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl PixelPoint {
    /// Create a pixel point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)` pixels.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);

    /// Opaque color from three channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> StoryResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(StoryError::validation(format!("invalid hex color \"{s}\"")));
        }

        fn hex_byte(pair: &str) -> StoryResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| StoryError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        match s.len() {
            3 => {
                let mut ch = [0u8; 3];
                for (i, slot) in ch.iter_mut().enumerate() {
                    let v = hex_byte(&s[i..i + 1])?;
                    *slot = v * 17;
                }
                Ok(Self::opaque(ch[0], ch[1], ch[2]))
            }
            6 => Ok(Self::opaque(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(StoryError::validation(
                "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
            )),
        }
    }

    /// Premultiplied `[r, g, b, a]` bytes as stored in raster surfaces.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
