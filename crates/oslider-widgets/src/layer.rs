//! Retained visual layer with explicit write modes and keyed animations.

use oslider_core::{BasicAnimation, Color, Interpolate, Rect};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::trace;

/// How a property write reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Snap to the new value, cancelling any in-flight transition
    #[default]
    Immediate,
    /// Tween from the currently presented value
    Animated(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Attached<T> {
    animation: BasicAnimation<T>,
    began: Duration,
}

impl<T: Interpolate> Attached<T> {
    fn sample(&self, clock: Duration) -> Option<T> {
        self.animation.value_at(clock.saturating_sub(self.began))
    }

    fn is_spent(&self, clock: Duration) -> bool {
        self.animation.is_removed_on_completion()
            && self.animation.is_finished(clock.saturating_sub(self.began))
    }
}

/// A filled rounded rectangle with a model value and a presentation value.
///
/// Attached animations drive the background color. With several attached,
/// the last key in lexical order that is still showing wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    frame: Rect,
    background: Color,
    corner_radius: f32,
    hidden: bool,
    animations: BTreeMap<String, Attached<Color>>,
    frame_transition: Option<Attached<Rect>>,
    clock: Duration,
}

impl Layer {
    /// Create a visible layer with the given fill and a zero frame.
    #[must_use]
    pub fn new(background: Color) -> Self {
        Self {
            frame: Rect::ZERO,
            background,
            corner_radius: 0.0,
            hidden: false,
            animations: BTreeMap::new(),
            frame_transition: None,
            clock: Duration::ZERO,
        }
    }

    /// Model frame.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Write the frame.
    pub fn set_frame(&mut self, frame: Rect, mode: WriteMode) {
        match mode {
            WriteMode::Immediate => self.frame_transition = None,
            WriteMode::Animated(duration) => {
                let from = self.presentation_frame();
                self.frame_transition = Some(Attached {
                    animation: BasicAnimation::new(from, frame, duration),
                    began: self.clock,
                });
            }
        }
        self.frame = frame;
    }

    /// True while an animated frame write is still in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.frame_transition.is_some()
    }

    /// Model background color.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Write the background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Corner radius.
    #[must_use]
    pub const fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Set the corner radius.
    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
    }

    /// Whether the layer is hidden.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Show or hide the layer.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Attach a background animation under `key`, replacing any previous
    /// one with the same key. It starts at the layer's current clock.
    pub fn add_animation(&mut self, key: &str, animation: BasicAnimation<Color>) {
        trace!(key, "animation attached");
        self.animations.insert(
            key.to_owned(),
            Attached {
                animation,
                began: self.clock,
            },
        );
    }

    /// Detach the animation under `key`, returning whether one existed.
    pub fn remove_animation(&mut self, key: &str) -> bool {
        let removed = self.animations.remove(key).is_some();
        if removed {
            trace!(key, "animation removed");
        }
        removed
    }

    /// The animation attached under `key`.
    #[must_use]
    pub fn animation(&self, key: &str) -> Option<&BasicAnimation<Color>> {
        self.animations.get(key).map(|a| &a.animation)
    }

    /// Keys of attached animations.
    pub fn animation_keys(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    /// Number of attached animations.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Layer-local time.
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Background as currently presented.
    #[must_use]
    pub fn presentation_background(&self) -> Color {
        self.animations
            .values()
            .rev()
            .find_map(|a| a.sample(self.clock))
            .unwrap_or(self.background)
    }

    /// Frame as currently presented.
    #[must_use]
    pub fn presentation_frame(&self) -> Rect {
        self.frame_transition
            .as_ref()
            .and_then(|t| t.sample(self.clock))
            .unwrap_or(self.frame)
    }

    /// Move the clock forward, dropping finished transitions and spent
    /// animations.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        let clock = self.clock;
        if self
            .frame_transition
            .as_ref()
            .is_some_and(|t| t.animation.is_finished(clock.saturating_sub(t.began)))
        {
            self.frame_transition = None;
        }
        self.animations.retain(|_, a| !a.is_spent(clock));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oslider_core::{FillMode, Repeat};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // =========================================================================
    // Frame writes
    // =========================================================================

    #[test]
    fn test_immediate_write_snaps() {
        let mut layer = Layer::new(Color::GRAY);
        layer.set_frame(Rect::new(0.0, 0.0, 100.0, 5.0), WriteMode::Immediate);
        assert_eq!(layer.presentation_frame(), Rect::new(0.0, 0.0, 100.0, 5.0));
        assert!(!layer.is_transitioning());
    }

    #[test]
    fn test_animated_write_tweens_from_presentation() {
        let mut layer = Layer::new(Color::GRAY);
        layer.set_frame(Rect::new(0.0, 0.0, 0.0, 5.0), WriteMode::Immediate);
        layer.set_frame(Rect::new(0.0, 0.0, 100.0, 5.0), WriteMode::Animated(ms(200)));

        assert_eq!(layer.frame().width, 100.0);
        assert_eq!(layer.presentation_frame().width, 0.0);

        layer.advance(ms(100));
        assert!((layer.presentation_frame().width - 50.0).abs() < 0.01);

        layer.advance(ms(100));
        assert!(!layer.is_transitioning());
        assert_eq!(layer.presentation_frame().width, 100.0);
    }

    #[test]
    fn test_immediate_write_cancels_transition() {
        let mut layer = Layer::new(Color::GRAY);
        layer.set_frame(Rect::new(0.0, 0.0, 100.0, 5.0), WriteMode::Animated(ms(200)));
        layer.set_frame(Rect::new(0.0, 0.0, 30.0, 5.0), WriteMode::Immediate);
        assert!(!layer.is_transitioning());
        assert_eq!(layer.presentation_frame().width, 30.0);
    }

    // =========================================================================
    // Animations
    // =========================================================================

    #[test]
    fn test_keyed_animation_replaces_in_place() {
        let mut layer = Layer::new(Color::BLACK);
        let anim = BasicAnimation::new(Color::BLACK, Color::WHITE, ms(400));
        layer.add_animation("backgroundColor", anim);
        layer.add_animation("backgroundColor", anim);
        assert_eq!(layer.animation_count(), 1);
        assert_eq!(layer.animation_keys().collect::<Vec<_>>(), vec!["backgroundColor"]);
    }

    #[test]
    fn test_presentation_background_samples_animation() {
        let mut layer = Layer::new(Color::GRAY);
        let anim = BasicAnimation::new(Color::BLACK, Color::WHITE, ms(400))
            .repeat(Repeat::Forever)
            .autoreverses(true);
        layer.add_animation("backgroundColor", anim);
        assert_eq!(layer.presentation_background(), Color::BLACK);

        layer.advance(ms(200));
        assert!((layer.presentation_background().r - 0.5).abs() < 0.01);
        assert_eq!(layer.background(), Color::GRAY);
    }

    #[test]
    fn test_spent_animation_is_pruned() {
        let mut layer = Layer::new(Color::GRAY);
        layer.add_animation(
            "fade",
            BasicAnimation::new(Color::BLACK, Color::WHITE, ms(100)),
        );
        layer.advance(ms(150));
        assert_eq!(layer.animation_count(), 0);
        assert_eq!(layer.presentation_background(), Color::GRAY);
    }

    #[test]
    fn test_persistent_animation_survives_completion() {
        let mut layer = Layer::new(Color::GRAY);
        layer.add_animation(
            "hold",
            BasicAnimation::new(Color::BLACK, Color::WHITE, ms(100))
                .removed_on_completion(false)
                .fill_mode(FillMode::Forwards),
        );
        layer.advance(ms(500));
        assert_eq!(layer.animation_count(), 1);
        assert_eq!(layer.presentation_background(), Color::WHITE);
    }

    #[test]
    fn test_remove_animation() {
        let mut layer = Layer::new(Color::GRAY);
        assert!(!layer.remove_animation("backgroundColor"));
        layer.add_animation(
            "backgroundColor",
            BasicAnimation::new(Color::BLACK, Color::WHITE, ms(100)),
        );
        assert!(layer.remove_animation("backgroundColor"));
        assert!(layer.animation("backgroundColor").is_none());
    }

    #[test]
    fn test_hidden_and_radius() {
        let mut layer = Layer::new(Color::GRAY);
        layer.set_hidden(true);
        layer.set_corner_radius(-3.0);
        assert!(layer.is_hidden());
        assert_eq!(layer.corner_radius(), 0.0);
    }
}
