#![forbid(unsafe_code)]

//! The black-hole screen transition: a full-screen overlay that grows a
//! rotating black circle, fades the screen to black behind it, and signals
//! completion after a fixed duration.
//!
//! The component is a two-state machine — Idle (nothing rendered) and Active
//! (overlay rendering, completion deadline armed) — with a single forward
//! transition on the trigger's rising edge. Milestones are recorded into a
//! polled event queue; a completion callback can additionally be registered
//! for hosts that want the direct contract.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use bhfx_core::transition::BlackHoleTransition;
//!
//! let mut transition = BlackHoleTransition::new()
//!     .on_complete(|| { /* swap the page */ });
//!
//! transition.set_triggered(true);
//! loop {
//!     transition.update(Duration::from_millis(16));
//!     if let Some(scene) = transition.scene() {
//!         // hand the scene to a compositor
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! 1. At most one completion deadline is armed at any time.
//! 2. The completion event fires at most once per activation — exactly once
//!    if the component keeps receiving `update` for the full duration.
//! 3. A rising trigger edge invalidates any previously armed deadline before
//!    arming a fresh one; no leftover deadline from a prior activation fires.
//! 4. Dropping the component cancels the pending deadline by construction:
//!    the timer is owned state, not a detached task.
//! 5. Setting the trigger true while already active is a no-op (visibility
//!    is already latched; no second deadline is armed).

use std::time::Duration;

use crate::animation::{Animation, Delayed, Fade, Tween, delay, ease_in_out};
use crate::presence::Presence;
use crate::scene::{
    Color, FadeVisual, GlowStyle, HoleVisual, OverlayFlags, OverlayScene, RingStyle,
};

// ---------------------------------------------------------------------------
// Timing and styling constants
// ---------------------------------------------------------------------------

/// Growth/rotation duration of the hole layer.
pub const HOLE_GROW_DURATION: Duration = Duration::from_millis(2000);

/// Final scale multiple of the hole (base size × 50 covers any screen).
pub const HOLE_MAX_SCALE: f32 = 50.0;

/// One full turn of rotation over the growth.
pub const HOLE_FULL_TURN_DEG: f32 = 360.0;

/// Base diameter of the hole at scale 1.0, in pixels.
pub const HOLE_BASE_DIAMETER: f32 = 80.0;

/// Delay before the full-screen fade panel starts.
pub const FADE_DELAY: Duration = Duration::from_millis(1500);

/// Duration of the fade panel's own fade; it finishes at the same mark as
/// the hole's growth.
pub const FADE_DURATION: Duration = Duration::from_millis(500);

/// Completion deadline: fires 300 ms after the visuals settle, providing a
/// pause beat before the host tears the view down.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(2500);

/// Halo styling around the hole (blur and spread radii in base pixels).
pub const HOLE_GLOW: GlowStyle = GlowStyle {
    blur: 100.0,
    spread: 50.0,
    color: Color::BLACK,
};

/// Translucent red accent ring at the hole's edge.
pub const HOLE_RING: RingStyle = RingStyle {
    width: 4.0,
    color: Color::rgba(239, 68, 68, 128),
};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A milestone recorded by the transition, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The trigger's rising edge latched visibility and armed the deadline.
    Activated,
    /// The fade panel crossed its start delay.
    FadeStarted,
    /// The completion deadline fired.
    Completed,
    /// The host dismissed the overlay; exit animation started.
    Dismissed,
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Layer A: scale and rotation tracks sharing one timeline, plus the
/// (deliberately constant) fill color pair.
#[derive(Debug, Clone, Copy)]
struct HoleLayer {
    scale: Tween,
    rotation: Tween,
    // Black to black: interpolating the fill is a no-op today, carried so a
    // themed variant only has to change the endpoints.
    fill_from: Color,
    fill_to: Color,
}

impl HoleLayer {
    fn new() -> Self {
        Self {
            scale: Tween::new(0.0, HOLE_MAX_SCALE, HOLE_GROW_DURATION).easing(ease_in_out),
            rotation: Tween::new(0.0, HOLE_FULL_TURN_DEG, HOLE_GROW_DURATION).easing(ease_in_out),
            fill_from: Color::BLACK,
            fill_to: Color::BLACK,
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.scale.tick(dt);
        self.rotation.tick(dt);
    }

    fn reset(&mut self) {
        self.scale.reset();
        self.rotation.reset();
    }

    fn visual(&self) -> HoleVisual {
        HoleVisual {
            scale: self.scale.current(),
            rotation_deg: self.rotation.current(),
            fill: self.fill_from.lerp(self.fill_to, self.scale.value()),
            glow: HOLE_GLOW,
            ring: HOLE_RING,
        }
    }
}

/// Layer B: the delayed full-screen fade to black.
#[derive(Debug, Clone, Copy)]
struct FadeLayer {
    track: Delayed<Fade>,
}

impl FadeLayer {
    fn new() -> Self {
        Self {
            track: delay(FADE_DELAY, Fade::new(FADE_DURATION).easing(ease_in_out)),
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.track.tick(dt);
    }

    fn reset(&mut self) {
        self.track.reset();
    }

    fn has_started(&self) -> bool {
        self.track.has_started()
    }

    fn visual(&self) -> FadeVisual {
        FadeVisual {
            opacity: self.track.value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Full-screen black-hole transition overlay.
///
/// Inputs are a boolean trigger (edge-detected) and an optional completion
/// callback; output is an [`OverlayScene`] per frame while the overlay is
/// mounted, plus drained [`TransitionEvent`] milestones.
pub struct BlackHoleTransition {
    triggered: bool,
    presence: Presence,
    hole: HoleLayer,
    fade: FadeLayer,
    /// Elapsed active time while a completion deadline is armed.
    armed: Option<Duration>,
    events: Vec<TransitionEvent>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for BlackHoleTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlackHoleTransition")
            .field("triggered", &self.triggered)
            .field("phase", &self.presence.phase())
            .field("armed", &self.armed)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl Default for BlackHoleTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl BlackHoleTransition {
    /// Create an idle transition: not triggered, nothing rendered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggered: false,
            presence: Presence::new(),
            hole: HoleLayer::new(),
            fade: FadeLayer::new(),
            armed: None,
            events: Vec::new(),
            on_complete: None,
        }
    }

    /// Register a completion callback (builder pattern).
    ///
    /// Invoked exactly once per activation, from `update`, when the deadline
    /// fires. Safe to drop the component instead — the callback is then
    /// never invoked.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Current trigger latch.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Whether the overlay is currently rendering.
    pub fn is_visible(&self) -> bool {
        self.presence.is_mounted()
    }

    /// Whether a completion deadline is armed.
    pub fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Feed the trigger flag. Edges are detected against the previous value:
    ///
    /// - false→true: start a fresh activation (restart layers, arm deadline).
    /// - true→true: no-op; visibility is latched and the deadline keeps its
    ///   original mark.
    /// - true→false: clears the trigger latch only, so a later rising edge
    ///   re-activates. The armed deadline and the overlay are untouched.
    pub fn set_triggered(&mut self, triggered: bool) {
        if triggered && !self.triggered {
            self.triggered = true;
            self.activate();
        } else if !triggered && self.triggered {
            self.triggered = false;
        }
    }

    fn activate(&mut self) {
        // Invalidate any previous deadline before arming the fresh one.
        self.armed = Some(Duration::ZERO);
        self.hole.reset();
        self.fade.reset();
        self.presence.show();
        self.events.push(TransitionEvent::Activated);
        crate::debug!("black-hole transition activated");
    }

    /// Dismiss the overlay: start the exit animation and cancel the pending
    /// deadline so no stale completion fires. No-op while not rendering.
    pub fn dismiss(&mut self) {
        if !self.presence.is_mounted() {
            return;
        }
        self.armed = None;
        self.presence.hide();
        self.events.push(TransitionEvent::Dismissed);
        crate::trace!("black-hole transition dismissed");
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Advance the transition by `dt`: presence, both layers, and the armed
    /// deadline. Fires the completion milestone (event + callback) when the
    /// accumulated active time first reaches [`COMPLETION_DELAY`].
    pub fn update(&mut self, dt: Duration) {
        self.presence.tick(dt);

        if self.presence.is_mounted() {
            self.hole.tick(dt);
            let fade_was_started = self.fade.has_started();
            self.fade.tick(dt);
            if !fade_was_started && self.fade.has_started() {
                self.events.push(TransitionEvent::FadeStarted);
            }
        }

        if let Some(elapsed) = self.armed {
            let elapsed = elapsed.saturating_add(dt);
            if elapsed >= COMPLETION_DELAY {
                // Single-shot: disarm before signaling so the milestone can
                // never be reached twice for this activation.
                self.armed = None;
                self.events.push(TransitionEvent::Completed);
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
                crate::debug!("black-hole transition complete");
            } else {
                self.armed = Some(elapsed);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------------

    /// The current frame's visual output, or `None` while nothing renders
    /// (idle, or after the exit animation removed the overlay).
    pub fn scene(&self) -> Option<OverlayScene> {
        if !self.presence.is_mounted() {
            return None;
        }
        Some(OverlayScene {
            hole: self.hole.visual(),
            fade: self.fade.visual(),
            opacity: self.presence.opacity(),
            flags: OverlayFlags::TOPMOST | OverlayFlags::POINTER_TRANSPARENT,
        })
    }

    /// Drain all pending milestones. Clears the queue.
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
