//! `OSlider`: media-style slider with buffer fill and loading pulse.

use crate::geometry::{SliderFrames, TrackGeometry};
use crate::pulse::{AnimationState, PulseAnimator};
use crate::range::{clamp_logged, RangeControl};
use crate::style::{validate_line_height, SliderOverrides, SliderStyle};
use crate::surface::RenderSurface;
use oslider_core::{
    widget::LayoutResult, Canvas, Color, Constraints, Error, Event, GestureState, PanRecognizer,
    Point, Rect, Size, TypeId, ValueRange, Widget,
};
use std::any::Any;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Message emitted when the slider value changes through interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChanged {
    /// The current value
    pub value: f32,
    /// Whether a pointer gesture is still active
    pub tracking: bool,
}

type ChangeListener = Box<dyn FnMut(&SliderChanged) + Send>;

/// Slider with a base track, buffer and progress fills, a thumb and a
/// loading pulse.
///
/// Built only through its constructors; it has no `Deserialize` impl.
pub struct OSlider {
    control: RangeControl,
    buffer_value: f32,
    style: SliderStyle,
    geometry: TrackGeometry,
    frames: SliderFrames,
    surface: RenderSurface,
    pulse: PulseAnimator,
    pan: PanRecognizer,
    pressed: bool,
    bounds: Rect,
    listeners: Vec<ChangeListener>,
    test_id_value: Option<String>,
}

impl Default for OSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OSlider")
            .field("value", &self.control.value())
            .field("buffer_value", &self.buffer_value)
            .field("range", &self.control.range())
            .field("tracking", &self.control.is_tracking())
            .field("animation", &self.pulse.state())
            .field("bounds", &self.bounds)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl OSlider {
    /// Create a slider over `[0, 1]` with the default style.
    #[must_use]
    pub fn new() -> Self {
        let style = SliderStyle::default();
        Self {
            control: RangeControl::default(),
            buffer_value: 0.0,
            surface: RenderSurface::new(&style),
            style,
            geometry: TrackGeometry::new(),
            frames: SliderFrames::default(),
            pulse: PulseAnimator::new(),
            pan: PanRecognizer::new(),
            pressed: false,
            bounds: Rect::ZERO,
            listeners: Vec::new(),
            test_id_value: None,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the current value.
    #[must_use]
    pub fn value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    /// Set the buffer value.
    #[must_use]
    pub fn buffer_value(mut self, value: f32) -> Self {
        self.set_buffer_value(value);
        self
    }

    /// Set the range.
    #[must_use]
    pub fn range(mut self, range: ValueRange) -> Self {
        self.set_value_range(range);
        self
    }

    /// Set the line height; a non-positive height is ignored.
    #[must_use]
    pub fn line_height(mut self, height: f32) -> Self {
        self.set_line_height(height);
        self
    }

    /// Replace the whole style; an invalid style is ignored.
    #[must_use]
    pub fn style(mut self, style: SliderStyle) -> Self {
        if let Err(err) = self.set_style(style) {
            warn!(%err, "style ignored");
        }
        self
    }

    /// Hide or show the thumb.
    #[must_use]
    pub fn hide_thumb(mut self, hidden: bool) -> Self {
        self.set_hide_thumb(hidden);
        self
    }

    /// Apply color overrides.
    #[must_use]
    pub fn overrides(mut self, overrides: &SliderOverrides) -> Self {
        self.apply_overrides(overrides);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get current value.
    #[must_use]
    pub const fn get_value(&self) -> f32 {
        self.control.value()
    }

    /// Get buffer value.
    #[must_use]
    pub const fn get_buffer_value(&self) -> f32 {
        self.buffer_value
    }

    /// Get range.
    #[must_use]
    pub const fn get_range(&self) -> ValueRange {
        self.control.range()
    }

    /// Get line height.
    #[must_use]
    pub const fn get_line_height(&self) -> f32 {
        self.style.line_height
    }

    /// Thumb diameter, twice the line height.
    #[must_use]
    pub fn thumb_size(&self) -> f32 {
        self.style.thumb_size()
    }

    /// Get the style.
    #[must_use]
    pub const fn get_style(&self) -> &SliderStyle {
        &self.style
    }

    /// True while a pointer gesture is active.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.control.is_tracking()
    }

    /// True while the loading pulse runs.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pulse.is_pulsing()
    }

    /// Pulse state.
    #[must_use]
    pub const fn animation_state(&self) -> AnimationState {
        self.pulse.state()
    }

    /// Whether the thumb is hidden by configuration.
    #[must_use]
    pub const fn is_thumb_hidden(&self) -> bool {
        self.style.hide_thumb
    }

    /// Rendering state.
    #[must_use]
    pub const fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    /// Frames computed at the last recompute, in local space.
    #[must_use]
    pub const fn frames(&self) -> &SliderFrames {
        &self.frames
    }

    /// Anchor captured from the first non-zero track.
    #[must_use]
    pub const fn original_rect(&self) -> Option<Rect> {
        self.geometry.original_rect()
    }

    /// Number of change listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Set the value, clamped into range. Never notifies.
    pub fn set_value(&mut self, value: f32) {
        self.control.set_value(value);
        self.recompute();
    }

    /// Set the buffer value, clamped into range. Never notifies.
    pub fn set_buffer_value(&mut self, value: f32) {
        self.buffer_value = clamp_logged(&self.control.range(), value, "buffer_value");
        self.recompute();
    }

    /// Replace the range from raw bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] unless `lower < upper`; the slider is
    /// left unchanged.
    pub fn set_range(&mut self, lower: f32, upper: f32) -> Result<(), Error> {
        match ValueRange::new(lower, upper) {
            Ok(range) => {
                self.set_value_range(range);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "range rejected");
                Err(err)
            }
        }
    }

    /// Replace the range, re-clamping value and buffer.
    pub fn set_value_range(&mut self, range: ValueRange) {
        self.control.set_range(range);
        self.buffer_value = clamp_logged(&range, self.buffer_value, "buffer_value");
        self.recompute();
    }

    /// Set the line height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineHeight`] for a non-positive height; the
    /// slider is left unchanged.
    pub fn try_set_line_height(&mut self, height: f32) -> Result<(), Error> {
        validate_line_height(height)?;
        if height == self.style.line_height {
            return Ok(());
        }
        debug!(height, "line height changed");
        self.style.line_height = height;
        self.refresh_appearance();
        self.recompute();
        Ok(())
    }

    /// Set the line height, ignoring (and logging) an invalid one.
    pub fn set_line_height(&mut self, height: f32) {
        if let Err(err) = self.try_set_line_height(height) {
            warn!(%err, "line height ignored");
        }
    }

    /// Hide or show the thumb, regenerating the bitmap on a change.
    pub fn set_hide_thumb(&mut self, hidden: bool) {
        if hidden == self.style.hide_thumb {
            return;
        }
        self.style.hide_thumb = hidden;
        self.render_thumb();
    }

    /// Start or stop the loading pulse.
    pub fn set_animating(&mut self, animating: bool) {
        match (animating, self.pulse.state()) {
            (true, AnimationState::Idle) => self.pulse.start(&mut self.surface, &self.style),
            (false, AnimationState::Pulsing) => self.pulse.stop(&mut self.surface, &self.style),
            _ => {}
        }
    }

    /// Replace the whole style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineHeight`] if the style does not validate;
    /// the slider is left unchanged.
    pub fn set_style(&mut self, style: SliderStyle) -> Result<(), Error> {
        style.validate()?;
        if style == self.style {
            return Ok(());
        }
        self.style = style;
        self.refresh_appearance();
        self.recompute();
        Ok(())
    }

    /// Apply every `Some` color in `overrides`.
    pub fn apply_overrides(&mut self, overrides: &SliderOverrides) {
        let style = self.style.with_overrides(overrides);
        if style == self.style {
            return;
        }
        self.style = style;
        self.refresh_appearance();
    }

    /// Set the base track color.
    pub fn set_base_color(&mut self, color: Color) {
        self.style.base_color = color;
        self.surface.apply_colors(&self.style);
    }

    /// Set the progress fill color.
    pub fn set_progress_color(&mut self, color: Color) {
        self.style.progress_color = color;
        self.surface.apply_colors(&self.style);
    }

    /// Set the buffer fill color.
    pub fn set_buffer_color(&mut self, color: Color) {
        self.style.buffer_color = color;
        self.surface.apply_colors(&self.style);
    }

    /// Set the pulse start color. A running pulse restarts with it.
    pub fn set_pulse_from_color(&mut self, color: Color) {
        self.style.pulse_from_color = color;
        self.restart_pulse();
    }

    /// Set the pulse end color. A running pulse restarts with it.
    pub fn set_pulse_to_color(&mut self, color: Color) {
        self.style.pulse_to_color = color;
        self.restart_pulse();
    }

    /// Set the thumb fill color.
    pub fn set_thumb_color(&mut self, color: Color) {
        self.style.thumb_color = color;
        self.render_thumb();
    }

    // =========================================================================
    // Notifications and time
    // =========================================================================

    /// Register a listener for interaction-driven changes.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&SliderChanged) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Advance animation clocks.
    pub fn advance(&mut self, dt: Duration) {
        self.surface.advance(dt);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn recompute(&mut self) {
        let range = self.control.range();
        self.frames = self.geometry.compute(
            self.bounds.size(),
            self.style.line_height,
            self.control.normalized(),
            range.normalize(self.buffer_value),
        );
        self.surface.apply_frames(&self.frames);
    }

    fn render_thumb(&mut self) {
        self.surface.render_thumb(
            self.style.thumb_size(),
            self.style.thumb_color,
            self.style.hide_thumb,
        );
    }

    fn refresh_appearance(&mut self) {
        self.surface.apply_colors(&self.style);
        self.render_thumb();
        self.restart_pulse();
    }

    fn restart_pulse(&mut self) {
        if self.pulse.is_pulsing() {
            self.pulse.start(&mut self.surface, &self.style);
        }
    }

    fn hit_region(&self) -> Rect {
        let inset = self.style.thumb_size();
        self.bounds.inset_by(-inset, -inset)
    }

    fn track_to(&mut self, position: Point) {
        let x = position.x - self.bounds.x;
        if let Some(value) = self.control.value_for_x(x, self.bounds.width) {
            self.control.set_value(value);
            self.recompute();
        }
    }

    fn notify(&mut self) -> Option<Box<dyn Any + Send>> {
        let message = SliderChanged {
            value: self.control.value(),
            tracking: self.control.is_tracking(),
        };
        trace!(value = message.value, tracking = message.tracking, "slider changed");
        for listener in &mut self.listeners {
            listener(&message);
        }
        Some(Box::new(message))
    }

    fn handle_pan(&mut self, state: GestureState, position: Point) -> Option<Box<dyn Any + Send>> {
        match state {
            GestureState::Started | GestureState::Changed => {
                self.control.set_tracking(true);
                self.track_to(position);
            }
            GestureState::Ended => {
                self.track_to(position);
                self.control.set_tracking(false);
            }
            GestureState::Cancelled => {
                self.control.set_tracking(false);
            }
        }
        self.notify()
    }
}

impl Widget for OSlider {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(200.0, self.style.thumb_size());
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.recompute();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.surface.paint(canvas, self.bounds.origin());
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match *event {
            Event::PointerDown { position } => {
                if !self.hit_test(position) {
                    return None;
                }
                self.pressed = true;
                self.pan.process(event);
                self.control.set_tracking(true);
                self.track_to(position);
                self.notify()
            }
            Event::PointerMove { position } => {
                if !self.pressed {
                    return None;
                }
                let state = self.pan.process(event)?;
                self.handle_pan(state, position)
            }
            Event::PointerUp { position } => {
                if !self.pressed {
                    return None;
                }
                self.pressed = false;
                if let Some(state) = self.pan.process(event) {
                    self.handle_pan(state, position)
                } else {
                    self.control.set_tracking(false);
                    self.notify()
                }
            }
            Event::PointerCancel => {
                if !self.pressed {
                    return None;
                }
                self.pressed = false;
                self.pan.process(event);
                self.control.set_tracking(false);
                self.notify()
            }
            Event::GesturePan { position, state } => self.handle_pan(state, position),
        }
    }

    fn hit_test(&self, point: Point) -> bool {
        self.hit_region().contains_point(&point)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
