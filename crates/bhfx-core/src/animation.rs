#![forbid(unsafe_code)]

//! Composable animation tracks.
//!
//! Time-based tracks that interpolate a value over a fixed duration, driven
//! by explicit `tick(dt)` calls so a test can advance a simulated clock.
//! Elapsed time is accumulated as [`Duration`] (no floating-point drift),
//! and combinators forward overshoot so chained timing stays exact.
//!
//! A declarative layer description like "scale 0 to 50 over 2000 ms,
//! ease-in-out, after a 1500 ms delay" becomes
//! `delay(ms(1500), Tween::new(0.0, 50.0, ms(2000)).easing(ease_in_out))`.

use std::time::Duration;

pub mod easing;

pub use easing::{EasingFn, ease_in, ease_in_cubic, ease_in_out, ease_out, ease_out_cubic, linear};

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing normalized values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion. Combinators use this to forward
    /// remaining time (e.g., [`Delayed`] forwards overshoot past the delay
    /// into the inner track). Returns [`Duration::ZERO`] for animations that
    /// never complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and default linear easing.
    ///
    /// A zero duration is clamped to one nanosecond so the track completes
    /// on its first tick instead of dividing by zero.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: clamp_duration(duration),
            easing: linear,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// The configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f32` property between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the normalized eased progress; use
/// [`Tween::current`] for the interpolated property value.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    progress: Fade,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration`, linear by default.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            progress: Fade::new(duration),
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.progress = self.progress.easing(easing);
        self
    }

    /// Current interpolated property value.
    pub fn current(&self) -> f32 {
        let t = self.progress.value();
        self.from + (self.to - self.from) * t
    }

    /// The target value.
    pub fn to(&self) -> f32 {
        self.to
    }

    /// The configured duration.
    pub fn duration(&self) -> Duration {
        self.progress.duration()
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.progress.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    fn value(&self) -> f32 {
        self.progress.value()
    }

    fn reset(&mut self) {
        self.progress.reset();
    }

    fn overshoot(&self) -> Duration {
        self.progress.overshoot()
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Wait for a delay, then play the inner animation.
///
/// Overshoot past the delay boundary is forwarded into the inner track, so a
/// single large tick lands the inner animation exactly where incremental
/// ticks would have.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    delay: Duration,
    elapsed: Duration,
    inner: A,
    started: bool,
}

impl<A: Animation> Delayed<A> {
    /// Create a delayed animation that waits `delay` before starting `inner`.
    pub fn new(delay: Duration, inner: A) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            inner,
            started: false,
        }
    }

    /// Whether the delay has elapsed and the inner animation has started.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Access the inner animation.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if self.started {
            self.inner.tick(dt);
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.delay {
            self.started = true;
            let overshoot = self.elapsed.saturating_sub(self.delay);
            if !overshoot.is_zero() {
                self.inner.tick(overshoot);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.started && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        if self.started { self.inner.value() } else { 0.0 }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.started = false;
        self.inner.reset();
    }

    fn overshoot(&self) -> Duration {
        if self.started {
            self.inner.overshoot()
        } else {
            Duration::ZERO
        }
    }
}

// ---------------------------------------------------------------------------
// Parallel
// ---------------------------------------------------------------------------

/// Play animations `A` and `B` simultaneously.
///
/// `value()` averages both tracks. Completes when both complete.
#[derive(Debug, Clone, Copy)]
pub struct Parallel<A, B> {
    a: A,
    b: B,
}

impl<A: Animation, B: Animation> Parallel<A, B> {
    /// Create a parallel pair that plays `a` and `b` simultaneously.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Access the first animation.
    pub fn first(&self) -> &A {
        &self.a
    }

    /// Access the second animation.
    pub fn second(&self) -> &B {
        &self.b
    }
}

impl<A: Animation, B: Animation> Animation for Parallel<A, B> {
    fn tick(&mut self, dt: Duration) {
        if !self.a.is_complete() {
            self.a.tick(dt);
        }
        if !self.b.is_complete() {
            self.b.tick(dt);
        }
    }

    fn is_complete(&self) -> bool {
        self.a.is_complete() && self.b.is_complete()
    }

    fn value(&self) -> f32 {
        (self.a.value() + self.b.value()) / 2.0
    }

    fn reset(&mut self) {
        self.a.reset();
        self.b.reset();
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a [`Delayed`] animation.
pub fn delay<A: Animation>(d: Duration, a: A) -> Delayed<A> {
    Delayed::new(d, a)
}

/// Create a [`Parallel`] pair from two animations.
pub fn parallel<A: Animation, B: Animation>(a: A, b: B) -> Parallel<A, B> {
    Parallel::new(a, b)
}

fn clamp_duration(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);
    const SEC_1: Duration = Duration::from_secs(1);

    // ---- Fade ----

    #[test]
    fn fade_starts_at_zero() {
        let fade = Fade::new(SEC_1);
        assert!((fade.value() - 0.0).abs() < f32::EPSILON);
        assert!(!fade.is_complete());
    }

    #[test]
    fn fade_completes_after_duration() {
        let mut fade = Fade::new(SEC_1);
        fade.tick(SEC_1);
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_midpoint() {
        let mut fade = Fade::new(SEC_1);
        fade.tick(MS_500);
        assert!((fade.value() - 0.5).abs() < 0.01);
    }

    #[test]
    fn fade_clamps_overshoot_value() {
        let mut fade = Fade::new(MS_100);
        fade.tick(SEC_1);
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
        assert_eq!(fade.overshoot(), Duration::from_millis(900));
    }

    #[test]
    fn fade_with_easing() {
        let mut fade = Fade::new(SEC_1).easing(ease_in);
        fade.tick(MS_500);
        // ease_in at 0.5 = 0.25
        assert!((fade.value() - 0.25).abs() < 0.01);
        assert!((fade.raw_progress() - 0.5).abs() < 0.01);
    }

    #[test]
    fn fade_reset() {
        let mut fade = Fade::new(SEC_1);
        fade.tick(SEC_1);
        fade.reset();
        assert!(!fade.is_complete());
        assert!((fade.value() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_zero_duration_is_safe() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.tick(Duration::from_millis(16));
        assert!(fade.is_complete());
    }

    #[test]
    fn fade_incremental_ticks_accumulate() {
        let mut fade = Fade::new(Duration::from_millis(160));
        for _ in 0..10 {
            fade.tick(Duration::from_millis(16));
        }
        assert!(fade.is_complete());
    }

    // ---- Tween ----

    #[test]
    fn tween_starts_at_from() {
        let tween = Tween::new(0.0, 50.0, SEC_1);
        assert!((tween.current() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tween_ends_at_to() {
        let mut tween = Tween::new(0.0, 50.0, SEC_1);
        tween.tick(SEC_1);
        assert!((tween.current() - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tween_midpoint_linear() {
        let mut tween = Tween::new(0.0, 360.0, SEC_1);
        tween.tick(MS_500);
        assert!((tween.current() - 180.0).abs() < 1.0);
    }

    #[test]
    fn tween_descending_range() {
        let mut tween = Tween::new(1.0, 0.0, SEC_1);
        tween.tick(MS_500);
        assert!((tween.current() - 0.5).abs() < 0.01);
        tween.tick(MS_500);
        assert!((tween.current() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tween_value_stays_normalized() {
        let mut tween = Tween::new(0.0, 50.0, SEC_1).easing(ease_in_out);
        tween.tick(MS_500);
        assert!((0.0..=1.0).contains(&tween.value()));
        assert!(tween.current() <= 50.0);
    }

    #[test]
    fn tween_reset() {
        let mut tween = Tween::new(0.0, 50.0, SEC_1);
        tween.tick(SEC_1);
        tween.reset();
        assert!((tween.current() - 0.0).abs() < f32::EPSILON);
        assert!(!tween.is_complete());
    }

    // ---- Delayed ----

    #[test]
    fn delayed_waits_then_plays() {
        let mut d = delay(MS_500, Fade::new(MS_500));

        d.tick(Duration::from_millis(250));
        assert!(!d.has_started());
        assert!((d.value() - 0.0).abs() < f32::EPSILON);

        d.tick(Duration::from_millis(250));
        assert!(d.has_started());

        d.tick(MS_500);
        assert!(d.is_complete());
        assert!((d.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn delayed_forwards_overshoot() {
        let mut d = delay(MS_100, Fade::new(SEC_1));
        // 200ms tick past a 100ms delay → inner gets ~100ms.
        d.tick(Duration::from_millis(200));
        assert!(d.has_started());
        assert!((d.value() - 0.1).abs() < 0.02);
    }

    #[test]
    fn delayed_reset() {
        let mut d = delay(MS_100, Fade::new(MS_100));
        d.tick(Duration::from_millis(200));
        assert!(d.is_complete());

        d.reset();
        assert!(!d.has_started());
        assert!(!d.is_complete());
    }

    // ---- Parallel ----

    #[test]
    fn parallel_ticks_both() {
        let mut par = parallel(Fade::new(SEC_1), Fade::new(MS_500));
        par.tick(MS_500);
        // a at 0.5, b at 1.0 → average 0.75
        assert!((par.value() - 0.75).abs() < 0.01);
        assert!(!par.is_complete());

        par.tick(MS_500);
        assert!(par.is_complete());
    }

    #[test]
    fn parallel_of_delayed_completes() {
        let a = delay(MS_100, Fade::new(MS_100));
        let b = Fade::new(Duration::from_millis(200));
        let mut par = parallel(a, b);
        par.tick(Duration::from_millis(200));
        assert!(par.is_complete());
    }

    // ---- Edge cases ----

    #[test]
    fn zero_dt_is_noop() {
        let mut fade = Fade::new(SEC_1);
        fade.tick(Duration::ZERO);
        assert!((fade.value() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tick_after_complete_is_safe() {
        let mut tween = Tween::new(0.0, 50.0, MS_100);
        tween.tick(SEC_1);
        tween.tick(SEC_1);
        assert!((tween.current() - 50.0).abs() < f32::EPSILON);
    }
}
