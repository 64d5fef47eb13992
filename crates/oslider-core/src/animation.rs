//! Property animation model: easing, repeat, autoreverse and fill behaviour.
//!
//! A [`BasicAnimation`] is a pure description. Whoever owns it keeps the
//! elapsed time and samples it with [`BasicAnimation::value_at`].

use crate::{Color, Rect};
use std::time::Duration;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// How many times an animation cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Repeat {
    /// A (possibly fractional) number of cycles; zero means one
    Count(f32),
    /// Never finishes
    #[default]
    Forever,
}

/// What an animation shows after it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Nothing; the model value shows through
    #[default]
    Removed,
    /// The final animated value is held
    Forwards,
}

/// Values that can be tweened.
pub trait Interpolate: Copy {
    /// Value at fraction `t` between `self` and `to`.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        (to - self).mul_add(t, *self)
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self::new(
            self.x.interpolate(&to.x, t),
            self.y.interpolate(&to.y, t),
            self.width.interpolate(&to.width, t),
            self.height.interpolate(&to.height, t),
        )
    }
}

/// A from/to animation of a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicAnimation<T> {
    from: T,
    to: T,
    duration: Duration,
    repeat: Repeat,
    autoreverses: bool,
    removed_on_completion: bool,
    fill_mode: FillMode,
    easing: Easing,
}

impl<T: Interpolate> BasicAnimation<T> {
    /// One linear pass from `from` to `to`, removed when done.
    #[must_use]
    pub const fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            repeat: Repeat::Count(1.0),
            autoreverses: false,
            removed_on_completion: true,
            fill_mode: FillMode::Removed,
            easing: Easing::Linear,
        }
    }

    /// Set the repeat behaviour.
    #[must_use]
    pub const fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Play each cycle backwards after playing it forwards.
    #[must_use]
    pub const fn autoreverses(mut self, autoreverses: bool) -> Self {
        self.autoreverses = autoreverses;
        self
    }

    /// Whether the owner should drop the animation once finished.
    #[must_use]
    pub const fn removed_on_completion(mut self, removed: bool) -> Self {
        self.removed_on_completion = removed;
        self
    }

    /// Set the fill mode.
    #[must_use]
    pub const fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    #[must_use]
    pub const fn from_value(&self) -> T {
        self.from
    }

    /// End value.
    #[must_use]
    pub const fn to_value(&self) -> T {
        self.to
    }

    /// Duration of a single forward pass.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Repeat behaviour.
    #[must_use]
    pub const fn repeat_mode(&self) -> Repeat {
        self.repeat
    }

    /// Whether cycles play back in reverse.
    #[must_use]
    pub const fn is_autoreversing(&self) -> bool {
        self.autoreverses
    }

    /// Whether the owner should drop the animation once finished.
    #[must_use]
    pub const fn is_removed_on_completion(&self) -> bool {
        self.removed_on_completion
    }

    /// Fill mode.
    #[must_use]
    pub const fn fill(&self) -> FillMode {
        self.fill_mode
    }

    fn cycle_secs(&self) -> f64 {
        let pass = self.duration.as_secs_f64();
        if self.autoreverses {
            pass * 2.0
        } else {
            pass
        }
    }

    /// Total running time, `None` when repeating forever.
    #[must_use]
    pub fn active_duration(&self) -> Option<Duration> {
        match self.repeat {
            Repeat::Forever => None,
            Repeat::Count(count) => {
                let count = if count > 0.0 { f64::from(count) } else { 1.0 };
                Some(Duration::from_secs_f64(self.cycle_secs() * count))
            }
        }
    }

    /// True once the active duration has elapsed.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.active_duration().is_some_and(|total| elapsed >= total)
    }

    /// Eased progress in [0, 1] at `elapsed`, `None` when nothing is shown.
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> Option<f64> {
        let pass = self.duration.as_secs_f64();
        if pass <= 0.0 {
            return match self.fill_mode {
                FillMode::Forwards => Some(if self.autoreverses { 0.0 } else { 1.0 }),
                FillMode::Removed => None,
            };
        }

        let raw = if let Some(total) = self.active_duration().filter(|t| elapsed >= *t) {
            if self.fill_mode == FillMode::Removed {
                return None;
            }
            Self::phase(total.as_secs_f64(), pass, self.autoreverses, true)
        } else {
            Self::phase(elapsed.as_secs_f64(), pass, self.autoreverses, false)
        };

        Some(self.easing.apply(raw))
    }

    fn phase(t: f64, pass: f64, autoreverses: bool, at_end: bool) -> f64 {
        let cycle = if autoreverses { pass * 2.0 } else { pass };
        let mut pos = t % cycle;
        if at_end && pos == 0.0 && t > 0.0 {
            pos = cycle;
        }
        if autoreverses && pos > pass {
            1.0 - (pos - pass) / pass
        } else {
            (pos / pass).min(1.0)
        }
    }

    /// Sampled value at `elapsed`, `None` when nothing is shown.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> Option<T> {
        self.progress_at(elapsed)
            .map(|p| self.from.interpolate(&self.to, p as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // =========================================================================
    // Easing Tests
    // =========================================================================

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert!((easing.apply(0.0)).abs() < 1e-9);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_easing_in_out_midpoint() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    // =========================================================================
    // BasicAnimation Tests
    // =========================================================================

    #[test]
    fn test_single_pass_progress() {
        let anim = BasicAnimation::new(0.0f32, 10.0, ms(400));
        assert_eq!(anim.value_at(ms(0)), Some(0.0));
        assert!((anim.value_at(ms(200)).unwrap() - 5.0).abs() < 1e-4);
        assert_eq!(anim.value_at(ms(400)), None);
        assert!(anim.is_finished(ms(400)));
    }

    #[test]
    fn test_single_pass_fill_forwards_holds_end() {
        let anim = BasicAnimation::new(0.0f32, 10.0, ms(400)).fill_mode(FillMode::Forwards);
        assert_eq!(anim.value_at(ms(1000)), Some(10.0));
    }

    #[test]
    fn test_autoreverse_returns_to_start() {
        let anim = BasicAnimation::new(0.0f32, 10.0, ms(400))
            .autoreverses(true)
            .repeat(Repeat::Forever);
        assert!((anim.value_at(ms(400)).unwrap() - 10.0).abs() < 1e-3);
        assert!((anim.value_at(ms(600)).unwrap() - 5.0).abs() < 1e-3);
        assert!(anim.value_at(ms(800)).unwrap().abs() < 1e-3);
        assert!((anim.value_at(ms(1000)).unwrap() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_forever_never_finishes() {
        let anim = BasicAnimation::new(0.0f32, 1.0, ms(400)).repeat(Repeat::Forever);
        assert_eq!(anim.active_duration(), None);
        assert!(!anim.is_finished(Duration::from_secs(3600)));
        assert!(anim.value_at(Duration::from_secs(3600)).is_some());
    }

    #[test]
    fn test_repeat_count_active_duration() {
        let anim = BasicAnimation::new(0.0f32, 1.0, ms(100))
            .autoreverses(true)
            .repeat(Repeat::Count(3.0));
        assert_eq!(anim.active_duration(), Some(ms(600)));
    }

    #[test]
    fn test_repeat_count_zero_means_once() {
        let anim = BasicAnimation::new(0.0f32, 1.0, ms(100)).repeat(Repeat::Count(0.0));
        assert_eq!(anim.active_duration(), Some(ms(100)));
    }

    #[test]
    fn test_zero_duration() {
        let removed = BasicAnimation::new(0.0f32, 1.0, Duration::ZERO);
        assert_eq!(removed.value_at(ms(0)), None);

        let held = removed.fill_mode(FillMode::Forwards);
        assert_eq!(held.value_at(ms(0)), Some(1.0));
    }

    #[test]
    fn test_color_interpolation() {
        let anim = BasicAnimation::new(Color::BLACK, Color::WHITE, ms(400));
        let mid = anim.value_at(ms(200)).unwrap();
        assert!((mid.r - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_rect_interpolation() {
        let from = Rect::new(0.0, 0.0, 0.0, 5.0);
        let to = Rect::new(0.0, 0.0, 100.0, 5.0);
        let mid = from.interpolate(&to, 0.25);
        assert_eq!(mid.width, 25.0);
        assert_eq!(mid.height, 5.0);
    }

    #[test]
    fn test_builder_accessors() {
        let anim = BasicAnimation::new(Color::BLACK, Color::WHITE, ms(400))
            .repeat(Repeat::Forever)
            .autoreverses(true)
            .removed_on_completion(false)
            .fill_mode(FillMode::Forwards)
            .easing(Easing::EaseInOut);
        assert_eq!(anim.from_value(), Color::BLACK);
        assert_eq!(anim.to_value(), Color::WHITE);
        assert_eq!(anim.duration(), ms(400));
        assert_eq!(anim.repeat_mode(), Repeat::Forever);
        assert!(anim.is_autoreversing());
        assert!(!anim.is_removed_on_completion());
        assert_eq!(anim.fill(), FillMode::Forwards);
    }

    proptest! {
        #[test]
        fn prop_progress_stays_in_unit_interval(t in 0u64..10_000, reverse: bool) {
            let anim = BasicAnimation::new(0.0f32, 1.0, ms(400))
                .autoreverses(reverse)
                .repeat(Repeat::Forever);
            let p = anim.progress_at(ms(t)).unwrap();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
