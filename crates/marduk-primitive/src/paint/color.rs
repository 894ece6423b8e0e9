/// Straight-alpha RGBA color with 8-bit channels (`0`–`255`).
///
/// This is the color a shape owns. Vertex buffers never store it directly;
/// they store its [`PackedColor`] form, one float per vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates a color from `f32` channels in `[0, 1]`.
    ///
    /// Out-of-range values are clamped, NaN maps to `0`.
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Packs the channels into the single-float vertex attribute form.
    ///
    /// Layout of the underlying bits is `0xAABBGGRR`, so the little-endian
    /// bytes in a vertex buffer read `R, G, B, A`: what a normalized
    /// `Unorm8x4` attribute expects.
    #[inline]
    pub const fn packed(self) -> PackedColor {
        PackedColor::from_bits(
            ((self.a as u32) << 24)
                | ((self.b as u32) << 16)
                | ((self.g as u32) << 8)
                | self.r as u32,
        )
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A 4 × 8-bit color reinterpreted as one `f32`.
///
/// Most packed values are ordinary floats, but some are NaN bit patterns
/// (`0xFFFFFFFF`, opaque white, is one). Equality therefore compares bits,
/// never float values.
#[derive(Debug, Copy, Clone)]
pub struct PackedColor(f32);

impl PackedColor {
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(f32::from_bits(bits))
    }

    #[inline]
    pub const fn from_f32(value: f32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0.to_bits()
    }

    /// The value written into the color slot of a vertex.
    #[inline]
    pub const fn as_f32(self) -> f32 {
        self.0
    }

    /// Unpacks back into channels.
    #[inline]
    pub const fn unpack(self) -> Color {
        let bits = self.to_bits();
        Color::rgba(bits as u8, (bits >> 8) as u8, (bits >> 16) as u8, (bits >> 24) as u8)
    }
}

impl PartialEq for PackedColor {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for PackedColor {}

impl From<Color> for PackedColor {
    #[inline]
    fn from(color: Color) -> Self {
        color.packed()
    }
}
