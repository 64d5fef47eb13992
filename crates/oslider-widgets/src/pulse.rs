//! Loading pulse: a looping base-track color animation.

use crate::style::SliderStyle;
use crate::surface::{LayerId, RenderSurface};
use oslider_core::{BasicAnimation, Color, FillMode, Repeat};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Key the pulse animation is attached under on the base layer.
pub const PULSE_KEY: &str = "backgroundColor";

/// One forward pass of the pulse.
pub const PULSE_DURATION: Duration = Duration::from_millis(400);

/// Whether the pulse is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AnimationState {
    /// No pulse attached
    #[default]
    Idle,
    /// Pulse attached to the base layer
    Pulsing,
}

/// Drives the pulse on a [`RenderSurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseAnimator {
    state: AnimationState,
}

impl PulseAnimator {
    /// Create an idle animator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AnimationState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// True while pulsing.
    #[must_use]
    pub fn is_pulsing(&self) -> bool {
        self.state == AnimationState::Pulsing
    }

    /// The looping, auto-reversing pulse between two colors.
    #[must_use]
    pub const fn pulse_animation(from: Color, to: Color) -> BasicAnimation<Color> {
        BasicAnimation::new(from, to, PULSE_DURATION)
            .repeat(Repeat::Forever)
            .autoreverses(true)
            .removed_on_completion(false)
            .fill_mode(FillMode::Forwards)
    }

    /// Attach the pulse, hide the fills and fade out the thumb.
    ///
    /// Calling it again while pulsing replaces the animation in place.
    pub fn start(&mut self, surface: &mut RenderSurface, style: &SliderStyle) {
        surface.layer_mut(LayerId::Base).add_animation(
            PULSE_KEY,
            Self::pulse_animation(style.pulse_from_color, style.pulse_to_color),
        );
        surface.layer_mut(LayerId::Progress).set_hidden(true);
        surface.layer_mut(LayerId::Buffer).set_hidden(true);
        surface.thumb_mut().set_opacity(0.0);
        surface.render_thumb(style.thumb_size(), style.thumb_color, style.hide_thumb);

        if self.state == AnimationState::Idle {
            debug!("pulse started");
        }
        self.state = AnimationState::Pulsing;
    }

    /// Remove the pulse and restore the fills and the thumb.
    ///
    /// Does nothing when idle.
    pub fn stop(&mut self, surface: &mut RenderSurface, style: &SliderStyle) {
        if self.state == AnimationState::Idle {
            return;
        }

        surface.layer_mut(LayerId::Base).remove_animation(PULSE_KEY);
        surface.layer_mut(LayerId::Progress).set_hidden(false);
        surface.layer_mut(LayerId::Buffer).set_hidden(false);
        surface.thumb_mut().set_opacity(1.0);
        surface.render_thumb(style.thumb_size(), style.thumb_color, style.hide_thumb);

        debug!("pulse stopped");
        self.state = AnimationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PulseAnimator, RenderSurface, SliderStyle) {
        let style = SliderStyle::default();
        (PulseAnimator::new(), RenderSurface::new(&style), style)
    }

    #[test]
    fn test_pulse_animation_parameters() {
        let anim = PulseAnimator::pulse_animation(Color::BLACK, Color::WHITE);
        assert_eq!(anim.duration(), Duration::from_millis(400));
        assert_eq!(anim.repeat_mode(), Repeat::Forever);
        assert!(anim.is_autoreversing());
        assert!(!anim.is_removed_on_completion());
        assert_eq!(anim.fill(), FillMode::Forwards);
    }

    #[test]
    fn test_start_hides_fills_and_thumb() {
        let (mut pulse, mut surface, style) = setup();
        pulse.start(&mut surface, &style);

        assert_eq!(pulse.state(), AnimationState::Pulsing);
        assert!(surface.layer(LayerId::Progress).is_hidden());
        assert!(surface.layer(LayerId::Buffer).is_hidden());
        assert!(!surface.layer(LayerId::Base).is_hidden());
        assert_eq!(surface.thumb().effective_opacity(), 0.0);
        assert!(surface.layer(LayerId::Base).animation(PULSE_KEY).is_some());
    }

    #[test]
    fn test_start_twice_keeps_one_animation() {
        let (mut pulse, mut surface, style) = setup();
        pulse.start(&mut surface, &style);
        pulse.start(&mut surface, &style);
        assert!(pulse.is_pulsing());
        assert_eq!(surface.layer(LayerId::Base).animation_count(), 1);
    }

    #[test]
    fn test_stop_restores() {
        let (mut pulse, mut surface, style) = setup();
        pulse.start(&mut surface, &style);
        pulse.stop(&mut surface, &style);

        assert_eq!(pulse.state(), AnimationState::Idle);
        assert_eq!(surface.layer(LayerId::Base).animation_count(), 0);
        assert!(!surface.layer(LayerId::Progress).is_hidden());
        assert!(!surface.layer(LayerId::Buffer).is_hidden());
        assert_eq!(surface.thumb().effective_opacity(), 1.0);
        assert_eq!(surface.thumb().bitmap().width(), 10);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut pulse, mut surface, style) = setup();
        surface.layer_mut(LayerId::Progress).set_hidden(true);
        surface.thumb_mut().set_opacity(0.25);
        let before = surface.clone();

        pulse.stop(&mut surface, &style);
        assert_eq!(surface, before);
        assert_eq!(pulse.state(), AnimationState::Idle);
    }

    #[test]
    fn test_pulse_colors_presented_on_base() {
        let (mut pulse, mut surface, style) = setup();
        pulse.start(&mut surface, &style);
        let base = surface.layer(LayerId::Base);
        assert_eq!(base.presentation_background(), style.pulse_from_color);

        surface.advance(PULSE_DURATION);
        let peak = surface.layer(LayerId::Base).presentation_background();
        assert!((peak.r - style.pulse_to_color.r).abs() < 0.01);
        assert_eq!(surface.layer(LayerId::Base).background(), style.base_color);
    }
}
