#![forbid(unsafe_code)]

//! Overlay rasterizer.
//!
//! [`OverlayFx`] paints an [`OverlayScene`] over a caller-owned row-major
//! buffer: `out[y * width + x]` for `0 <= x < width`, `0 <= y < height`.
//! Paint order matches the scene: the hole disc with its glow and accent
//! ring first, the full-screen fade scrim over it, the presence opacity
//! applied to both.
//!
//! Deterministic — identical inputs produce identical output — and
//! tiny-area safe: zero width/height renders nothing and never panics.
//! No allocations.

use bhfx_core::scene::OverlayScene;
use bhfx_core::transition::HOLE_BASE_DIAMETER;

use crate::color::PackedRgba;

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// Caller-provided description of the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub width: u16,
    pub height: u16,
}

impl RenderContext {
    /// Create a context for a `width` × `height` target.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of pixels in the target.
    #[inline]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the target has no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// ---------------------------------------------------------------------------
// OverlayFx
// ---------------------------------------------------------------------------

/// Rasterizer for the transition overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayFx {
    base_diameter: f32,
}

impl Default for OverlayFx {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayFx {
    /// Create a rasterizer with the component's base hole diameter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_diameter: HOLE_BASE_DIAMETER,
        }
    }

    /// Override the base diameter in pixels (builder). Values below one
    /// pixel are clamped so small targets still get a visible hole.
    #[must_use]
    pub fn base_diameter(mut self, px: f32) -> Self {
        self.base_diameter = px.max(1.0);
        self
    }

    /// Paint `scene` over `out`.
    ///
    /// Pixels the overlay does not cover keep their previous value. The
    /// buffer must hold at least `ctx.len()` pixels; a short buffer renders
    /// nothing.
    pub fn render(&self, scene: &OverlayScene, ctx: RenderContext, out: &mut [PackedRgba]) {
        if ctx.is_empty() || out.len() < ctx.len() {
            return;
        }
        if scene.opacity <= 0.0 {
            return;
        }

        // All metric styling lives in element space and is scaled with the
        // hole, exactly as a transform would scale it.
        let scale = scene.hole.scale.max(0.0);
        let radius = self.base_diameter * 0.5 * scale;
        let spread = scene.hole.glow.spread * scale;
        let blur = scene.hole.glow.blur * scale;
        let ring_half = scene.hole.ring.width * 0.5 * scale;

        let fill = PackedRgba::from(scene.hole.fill);
        let glow = PackedRgba::from(scene.hole.glow.color);
        let ring = PackedRgba::from(scene.hole.ring.color);
        let scrim = PackedRgba::BLACK.with_opacity(scene.fade.opacity);

        // A uniform disc is rotation-invariant; `scene.hole.rotation_deg`
        // is carried for styled variants and does not alter this paint.
        let cx = f32::from(ctx.width - 1) * 0.5;
        let cy = f32::from(ctx.height - 1) * 0.5;

        for y in 0..ctx.height {
            let dy = f32::from(y) - cy;
            let row = y as usize * ctx.width as usize;
            for x in 0..ctx.width {
                let dx = f32::from(x) - cx;
                let dist = (dx * dx + dy * dy).sqrt();

                let mut pixel = PackedRgba::TRANSPARENT;

                if scale > 0.0 {
                    if dist <= radius {
                        pixel = fill;
                    } else {
                        let beyond = dist - radius;
                        if beyond <= spread {
                            pixel = glow;
                        } else if blur > 0.0 && beyond <= spread + blur {
                            let t = (beyond - spread) / blur;
                            let falloff = (1.0 - t) * (1.0 - t);
                            pixel = glow.with_opacity(falloff);
                        }
                    }

                    if ring_half > 0.0 && (dist - radius).abs() <= ring_half {
                        pixel = ring.over(pixel);
                    }
                }

                pixel = scrim.over(pixel);
                pixel = pixel.with_opacity(scene.opacity);

                let idx = row + x as usize;
                out[idx] = pixel.over(out[idx]);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
