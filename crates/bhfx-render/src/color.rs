#![forbid(unsafe_code)]

//! A compact RGBA color for compositing.
//!
//! Storage is **straight alpha** (RGB channels are not pre-multiplied);
//! compositing uses Porter-Duff SourceOver.

use bhfx_core::scene::Color;

/// A 4-byte RGBA color, laid out `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Channel weights are kept in the 255² domain until the final rounded
    /// division, so repeated blends don't accumulate per-step rounding.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let src_a = u32::from(self.a());
        if src_a == 255 {
            return self;
        }
        if src_a == 0 {
            return dst;
        }

        let dst_a = u32::from(dst.a());
        let inv_src_a = 255 - src_a;

        // Channel weights in the 255² domain; their sum is the output alpha
        // in the same domain.
        let src_weight = src_a * 255;
        let dst_weight = dst_a * inv_src_a;
        let total = src_weight + dst_weight;
        if total == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = ((total + 127) / 255) as u8;
        let blend = |s: u8, d: u8| -> u8 {
            let mixed = u64::from(s) * u64::from(src_weight) + u64::from(d) * u64::from(dst_weight);
            ((mixed + u64::from(total) / 2) / u64::from(total)) as u8
        };

        Self::rgba(
            blend(self.r(), dst.r()),
            blend(self.g(), dst.g()),
            blend(self.b(), dst.b()),
            out_a,
        )
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = (f32::from(self.a()) * opacity).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

impl From<Color> for PackedRgba {
    fn from(c: Color) -> Self {
        Self::rgba(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_roundtrip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn over_opaque_src_wins() {
        let src = PackedRgba::rgb(10, 20, 30);
        let dst = PackedRgba::WHITE;
        assert_eq!(src.over(dst), src);
    }

    #[test]
    fn over_transparent_src_keeps_dst() {
        let dst = PackedRgba::rgb(10, 20, 30);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_half_black_over_white_is_mid_gray() {
        let src = PackedRgba::rgba(0, 0, 0, 128);
        let out = src.over(PackedRgba::WHITE);
        assert_eq!(out, PackedRgba::rgba(127, 127, 127, 255));
    }

    #[test]
    fn over_both_transparent_is_transparent() {
        assert_eq!(
            PackedRgba::TRANSPARENT.over(PackedRgba::TRANSPARENT),
            PackedRgba::TRANSPARENT
        );
    }

    #[test]
    fn over_partial_src_over_transparent_keeps_src_channels() {
        let src = PackedRgba::rgba(200, 100, 50, 64);
        let out = src.over(PackedRgba::TRANSPARENT);
        assert_eq!((out.r(), out.g(), out.b(), out.a()), (200, 100, 50, 64));
    }

    #[test]
    fn with_opacity_scales_alpha_only() {
        let c = PackedRgba::rgba(9, 8, 7, 200);
        let half = c.with_opacity(0.5);
        assert_eq!((half.r(), half.g(), half.b()), (9, 8, 7));
        assert_eq!(half.a(), 100);
    }

    #[test]
    fn with_opacity_clamps() {
        let c = PackedRgba::BLACK;
        assert_eq!(c.with_opacity(2.0).a(), 255);
        assert_eq!(c.with_opacity(-1.0).a(), 0);
    }

    #[test]
    fn from_scene_color() {
        let c: PackedRgba = Color::rgba(239, 68, 68, 128).into();
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (239, 68, 68, 128));
    }
}
