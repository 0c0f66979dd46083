use crate::foundation::error::{ThumbError, ThumbResult};

/// Opaque 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert into an `image` pixel.
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

/// Straight (non-premultiplied) 8-bit color with alpha.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 0 is fully transparent.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Semi-transparent black, the stock flat overlay.
    pub const fn default_overlay() -> Self {
        Self::new(0, 0, 0, 100)
    }

    /// Convert into an `image` pixel.
    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Parse `#RRGGBBAA`, `RRGGBB` (opaque) or `r,g,b,a`.
    pub fn parse(s: &str) -> ThumbResult<Self> {
        let s = s.trim();
        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ThumbError::validation(format!("invalid color \"{s}\": {e}")))?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(ThumbError::validation(format!(
                    "color \"{s}\" must have 3 or 4 components"
                ))),
            };
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ThumbError::validation(format!("invalid hex color \"{s}\"")))
        };
        match hex.len() {
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(ThumbError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA",
            )),
        }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Pixel-space rectangle with exclusive `right`/`bottom`.
///
/// A constructed box is never degenerate: `left < right` and `top < bottom`.
/// "No content" is expressed as `Option::<BoundingBox>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Inclusive left edge.
    pub left: u32,
    /// Inclusive top edge.
    pub top: u32,
    /// Exclusive right edge.
    pub right: u32,
    /// Exclusive bottom edge.
    pub bottom: u32,
}

impl BoundingBox {
    /// Returns `None` when the box would be empty.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Option<Self> {
        (left < right && top < bottom).then_some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Horizontal extent.
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(self) -> u32 {
        self.bottom - self.top
    }

    /// Grow by `margin` on every side, clamped to a `width`×`height` image.
    pub fn expand_clamped(self, margin: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(margin),
            top: self.top.saturating_sub(margin),
            right: self.right.saturating_add(margin).min(width),
            bottom: self.bottom.saturating_add(margin).min(height),
        }
    }
}

/// Width-to-height ratio expressed as two integers (e.g. 16:9).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio {
    /// Width term.
    pub num: u32,
    /// Height term, must be > 0.
    pub den: u32,
}

impl AspectRatio {
    /// Widescreen 16:9.
    pub const WIDESCREEN: Self = Self { num: 16, den: 9 };

    /// `floor(width * den / num)`: the tallest height a `width`-wide image may have.
    pub fn target_height(self, width: u32) -> u32 {
        if self.num == 0 {
            return 0;
        }
        (u64::from(width) * u64::from(self.den) / u64::from(self.num)) as u32
    }
}

/// Fixed output surface every composite is produced on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSpec {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Aspect sources are trimmed to before resizing.
    pub aspect: AspectRatio,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            aspect: AspectRatio::WIDESCREEN,
        }
    }
}

impl CanvasSpec {
    /// Reject zero-sized canvases and aspect ratios with a zero term.
    pub fn validate(&self) -> ThumbResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ThumbError::validation("canvas width/height must be > 0"));
        }
        if self.aspect.num == 0 || self.aspect.den == 0 {
            return Err(ThumbError::validation("canvas aspect terms must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
