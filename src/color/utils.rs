use crate::{color::Rgb, math8::lerp8};

/// Linear interpolation between two colors at fractional position `t`
///
/// `t` is clamped to `0.0..=1.0`; `0.0` yields `a`, `1.0` yields `b`.
#[inline]
pub fn lerp_colors(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: lerp8(a.r, b.r, t),
        g: lerp8(a.g, b.g, t),
        b: lerp8(a.b, b.b, t),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
