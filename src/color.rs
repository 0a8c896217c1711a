/// A display color. Channels are kept as `f32` so that repeated heatmap blending does not lose
/// precision to rounding; they are only quantized when written to a [`Raster`].
///
/// [`Raster`]: crate::surface::Raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,

    /// Opacity in `[0, 1]`
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(255.0, 255.0, 255.0);

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        Some(Self::opaque(
            channel(0)? as f32,
            channel(2)? as f32,
            channel(4)? as f32,
        ))
    }

    /// Quantize into 8 bit channels, alpha included.
    pub fn to_bytes(self) -> [u8; 4] {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;

        [q(self.r), q(self.g), q(self.b), q(self.a * 255.0)]
    }

    pub fn from_bytes([r, g, b, a]: [u8; 4]) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: a as f32 / 255.0,
        }
    }
}
