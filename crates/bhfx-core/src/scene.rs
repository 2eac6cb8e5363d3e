#![forbid(unsafe_code)]

//! Declarative visual output of the transition.
//!
//! The transition component emits an [`OverlayScene`] per frame: plain data
//! describing the two overlaid layers (hole and fade) plus the presence
//! opacity for the whole subtree. Painting lives elsewhere — a compositor
//! consumes this struct and never reaches back into component state.

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A straight-alpha RGBA color carried by scene data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise linear interpolation toward `other` at `t` in [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

// ---------------------------------------------------------------------------
// Overlay flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Compositing hints for the overlay subtree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OverlayFlags: u8 {
        /// Render above all other content.
        const TOPMOST             = 0b0000_0001;
        /// Visuals only: do not intercept pointer/touch input.
        const POINTER_TRANSPARENT = 0b0000_0010;
    }
}

// ---------------------------------------------------------------------------
// Layer visuals
// ---------------------------------------------------------------------------

/// Cosmetic halo around the hole (box-shadow analog: blur + spread radii).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStyle {
    /// Blur radius in base pixels.
    pub blur: f32,
    /// Spread radius in base pixels.
    pub spread: f32,
    /// Halo color.
    pub color: Color,
}

/// Accent ring drawn at the hole's edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    /// Ring stroke width in base pixels.
    pub width: f32,
    /// Ring color (translucent).
    pub color: Color,
}

/// Layer A: the growing, rotating hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleVisual {
    /// Scale multiplier applied to the base diameter.
    pub scale: f32,
    /// Rotation in degrees (one full turn over the growth).
    pub rotation_deg: f32,
    /// Fill color. Stays black for the whole animation.
    pub fill: Color,
    /// Cosmetic halo styling.
    pub glow: GlowStyle,
    /// Accent ring styling.
    pub ring: RingStyle,
}

/// Layer B: the full-screen fade panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeVisual {
    /// Panel opacity in [0.0, 1.0]; black at full opacity covers everything.
    pub opacity: f32,
}

/// One frame of overlay output: both layers plus the subtree opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayScene {
    /// Layer A.
    pub hole: HoleVisual,
    /// Layer B, composited over Layer A.
    pub fade: FadeVisual,
    /// Presence (enter/exit) opacity multiplier for both layers.
    pub opacity: f32,
    /// Compositing hints.
    pub flags: OverlayFlags,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
