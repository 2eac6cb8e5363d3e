#![forbid(unsafe_code)]

//! Presence: the mount/unmount lifecycle of a visual element, including an
//! exit animation before removal.
//!
//! A presence moves through five phases:
//!
//! ```text
//! Hidden ──show()──▶ Entering ──tick──▶ Visible
//!                        ▲                 │
//!                        └────show()───────┤ hide()
//!                                          ▼
//!                    Removed ◀──tick── Exiting
//! ```
//!
//! Removal is deferred until the exit duration has elapsed, so the host can
//! keep rendering the element at a decaying opacity until it is gone.
//! Phases advance only inside [`Presence::tick`], [`Presence::show`], and
//! [`Presence::hide`]; ticks carry explicit [`Duration`] deltas so tests can
//! drive a simulated clock.
//!
//! # Invariants
//!
//! 1. `opacity()` is always in [0.0, 1.0].
//! 2. `Removed` is terminal until the next `show()`.
//! 3. `hide()` while `Hidden` or `Removed` is a no-op.
//! 4. `show()` from any phase restarts entry from the beginning.

use std::time::Duration;

use crate::animation::ease_in_out;

/// Default enter animation length (the runtime's default presence timing).
pub const DEFAULT_ENTER_DURATION: Duration = Duration::from_millis(300);

/// Default exit animation length (the runtime's default presence timing).
pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle phase of a presence-managed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresencePhase {
    /// Never shown; nothing rendered.
    #[default]
    Hidden,
    /// Animating in (opacity rising).
    Entering,
    /// Fully visible.
    Visible,
    /// Animating out (opacity falling).
    Exiting,
    /// Exit animation finished; element removed.
    Removed,
}

/// Tick-driven enter/exit lifecycle with deferred removal.
#[derive(Debug, Clone, Copy)]
pub struct Presence {
    phase: PresencePhase,
    elapsed: Duration,
    enter_duration: Duration,
    exit_duration: Duration,
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Presence {
    /// Create a hidden presence with the default enter/exit durations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: PresencePhase::Hidden,
            elapsed: Duration::ZERO,
            enter_duration: DEFAULT_ENTER_DURATION,
            exit_duration: DEFAULT_EXIT_DURATION,
        }
    }

    /// Create a presence with explicit enter/exit durations.
    #[must_use]
    pub fn with_durations(enter: Duration, exit: Duration) -> Self {
        Self {
            phase: PresencePhase::Hidden,
            elapsed: Duration::ZERO,
            enter_duration: enter,
            exit_duration: exit,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PresencePhase {
        self.phase
    }

    /// Whether the element should be rendered at all.
    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, PresencePhase::Hidden | PresencePhase::Removed)
    }

    /// Whether the exit animation has finished.
    pub fn is_removed(&self) -> bool {
        self.phase == PresencePhase::Removed
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Begin (or restart) the entry animation.
    pub fn show(&mut self) {
        self.phase = PresencePhase::Entering;
        self.elapsed = Duration::ZERO;
    }

    /// Begin the exit animation. No-op unless currently entering or visible.
    pub fn hide(&mut self) {
        if matches!(self.phase, PresencePhase::Entering | PresencePhase::Visible) {
            self.phase = PresencePhase::Exiting;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Advance the lifecycle by `dt`. Returns `true` if the phase changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.phase {
            PresencePhase::Entering => {
                self.elapsed = self.elapsed.saturating_add(dt);
                if self.elapsed >= self.enter_duration {
                    self.phase = PresencePhase::Visible;
                    self.elapsed = Duration::ZERO;
                    return true;
                }
                false
            }
            PresencePhase::Exiting => {
                self.elapsed = self.elapsed.saturating_add(dt);
                if self.elapsed >= self.exit_duration {
                    self.phase = PresencePhase::Removed;
                    self.elapsed = Duration::ZERO;
                    return true;
                }
                false
            }
            PresencePhase::Hidden | PresencePhase::Visible | PresencePhase::Removed => false,
        }
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Opacity multiplier for the whole subtree, in [0.0, 1.0].
    pub fn opacity(&self) -> f32 {
        match self.phase {
            PresencePhase::Hidden | PresencePhase::Removed => 0.0,
            PresencePhase::Visible => 1.0,
            PresencePhase::Entering => ease_in_out(self.progress(self.enter_duration)),
            PresencePhase::Exiting => 1.0 - ease_in_out(self.progress(self.exit_duration)),
        }
    }

    fn progress(&self, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
