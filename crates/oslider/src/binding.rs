//! Two-way binding between host state and an [`OSlider`].
//!
//! The push direction copies bound state into the widget on every refresh.
//! The pull direction is a change listener registered by value when the
//! widget is made; it writes the value back and reports the tracking flag.
//! A pull that writes the value the next push will send causes no further
//! notification, so the loop settles after one cycle.

use oslider_core::{Binding, ValueRange};
use oslider_widgets::{OSlider, SliderOverrides, DEFAULT_LINE_HEIGHT};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type EditingChanged = Arc<dyn Fn(bool) + Send + Sync>;

/// Declarative description of a slider bound to host state.
#[derive(Clone)]
pub struct SliderView {
    value: Binding<f32>,
    buffer_value: Binding<f32>,
    animating: Binding<bool>,
    hide_thumb: Binding<bool>,
    line_height: f32,
    range: Option<ValueRange>,
    overrides: SliderOverrides,
    on_editing_changed: Option<EditingChanged>,
}

impl fmt::Debug for SliderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderView")
            .field("value", &self.value.get())
            .field("buffer_value", &self.buffer_value.get())
            .field("animating", &self.animating.get())
            .field("hide_thumb", &self.hide_thumb.get())
            .field("line_height", &self.line_height)
            .field("range", &self.range)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl SliderView {
    /// Bind a slider to host state.
    #[must_use]
    pub fn new(
        value: Binding<f32>,
        buffer_value: Binding<f32>,
        animating: Binding<bool>,
        hide_thumb: Binding<bool>,
    ) -> Self {
        Self {
            value,
            buffer_value,
            animating,
            hide_thumb,
            line_height: DEFAULT_LINE_HEIGHT,
            range: None,
            overrides: SliderOverrides::default(),
            on_editing_changed: None,
        }
    }

    /// Set the line height pushed on every refresh.
    #[must_use]
    pub const fn line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Push a range on every refresh; without one the widget keeps its own.
    #[must_use]
    pub const fn range(mut self, range: ValueRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Color overrides; unset colors keep the widget defaults.
    #[must_use]
    pub const fn overrides(mut self, overrides: SliderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Called with the tracking flag on every widget notification.
    #[must_use]
    pub fn on_editing_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_editing_changed = Some(Arc::new(callback));
        self
    }

    /// Configured line height.
    #[must_use]
    pub const fn get_line_height(&self) -> f32 {
        self.line_height
    }

    /// Configured range, if any.
    #[must_use]
    pub const fn get_range(&self) -> Option<ValueRange> {
        self.range
    }

    /// Configured overrides.
    #[must_use]
    pub const fn get_overrides(&self) -> &SliderOverrides {
        &self.overrides
    }

    /// Build a widget in the bound state with the pull listener attached.
    #[must_use]
    pub fn make_widget(&self) -> OSlider {
        let mut widget = OSlider::new();
        self.update_widget(&mut widget);

        let value = self.value.clone();
        let editing = self.on_editing_changed.clone();
        widget.on_change(move |changed| {
            value.set(changed.value);
            if let Some(callback) = &editing {
                callback(changed.tracking);
            }
        });
        widget
    }

    /// Push bound state into `widget`. The pushed value wins over whatever
    /// the widget holds, even mid-drag.
    pub fn update_widget(&self, widget: &mut OSlider) {
        if let Some(range) = self.range {
            widget.set_value_range(range);
        }
        widget.set_line_height(self.line_height);
        widget.set_hide_thumb(self.hide_thumb.get());
        widget.apply_overrides(&self.overrides);
        widget.set_value(self.value.get());
        widget.set_buffer_value(self.buffer_value.get());
        widget.set_animating(self.animating.get());
        trace!(
            value = widget.get_value(),
            buffer = widget.get_buffer_value(),
            "slider view pushed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oslider_core::{Color, Event, Point, ReactiveCell, Rect, Widget};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct State {
        value: ReactiveCell<f32>,
        buffer: ReactiveCell<f32>,
        animating: ReactiveCell<bool>,
        hide_thumb: ReactiveCell<bool>,
    }

    impl State {
        fn new() -> Self {
            Self {
                value: ReactiveCell::new(0.0),
                buffer: ReactiveCell::new(0.2),
                animating: ReactiveCell::new(false),
                hide_thumb: ReactiveCell::new(false),
            }
        }

        fn view(&self) -> SliderView {
            SliderView::new(
                self.value.binding(),
                self.buffer.binding(),
                self.animating.binding(),
                self.hide_thumb.binding(),
            )
        }
    }

    fn tap(widget: &mut OSlider, x: f32) {
        widget.event(&Event::PointerDown {
            position: Point::new(x, 2.0),
        });
        widget.event(&Event::PointerUp {
            position: Point::new(x, 2.0),
        });
    }

    // =========================================================================
    // Push
    // =========================================================================

    #[test]
    fn test_make_widget_pushes_initial_state() {
        let state = State::new();
        state.value.set(0.3);
        state.hide_thumb.set(true);
        let widget = state.view().line_height(20.0).make_widget();

        assert_eq!(widget.get_value(), 0.3);
        assert_eq!(widget.get_buffer_value(), 0.2);
        assert_eq!(widget.get_line_height(), 20.0);
        assert!(widget.is_thumb_hidden());
        assert_eq!(widget.listener_count(), 1);
    }

    #[test]
    fn test_update_widget_last_write_wins() {
        let state = State::new();
        let view = state.view();
        let mut widget = view.make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 10.0));

        widget.event(&Event::PointerDown {
            position: Point::new(240.0, 2.0),
        });
        assert!(widget.is_tracking());

        state.value.set(0.1);
        view.update_widget(&mut widget);
        assert_eq!(widget.get_value(), 0.1);
        assert!(widget.is_tracking());
    }

    #[test]
    fn test_update_widget_toggles_animation() {
        let state = State::new();
        let view = state.view();
        let mut widget = view.make_widget();

        state.animating.set(true);
        view.update_widget(&mut widget);
        assert!(widget.is_animating());
        view.update_widget(&mut widget);
        assert!(widget.is_animating());

        state.animating.set(false);
        view.update_widget(&mut widget);
        assert!(!widget.is_animating());
    }

    #[test]
    fn test_repeated_push_keeps_pulse_running_smoothly() {
        let state = State::new();
        state.animating.set(true);
        state.hide_thumb.set(true);
        let view = state
            .view()
            .line_height(10.0)
            .overrides(SliderOverrides::default().buffer_color(Color::GRAY.with_alpha(0.3)));
        let mut widget = view.make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 20.0));

        widget.advance(std::time::Duration::from_millis(200));
        let before = widget
            .surface()
            .layer(oslider_widgets::LayerId::Base)
            .presentation_background();
        let bitmap = widget.surface().thumb().bitmap().clone();

        view.update_widget(&mut widget);
        view.update_widget(&mut widget);

        let after = widget
            .surface()
            .layer(oslider_widgets::LayerId::Base)
            .presentation_background();
        assert_eq!(after, before);
        assert_ne!(after, widget.get_style().pulse_from_color);
        assert_eq!(widget.surface().thumb().bitmap(), &bitmap);
    }

    #[test]
    fn test_update_widget_range_and_overrides() {
        let state = State::new();
        state.value.set(5.0);
        let view = state
            .view()
            .range(ValueRange::new(0.0, 10.0).unwrap())
            .overrides(SliderOverrides::default().buffer_color(Color::GRAY.with_alpha(0.3)));
        let widget = view.make_widget();

        assert_eq!(widget.get_value(), 5.0);
        assert_eq!(widget.get_style().buffer_color, Color::GRAY.with_alpha(0.3));
        assert_eq!(
            widget.get_style().base_color,
            oslider_widgets::palette::BASE
        );
    }

    #[test]
    fn test_no_range_keeps_widget_range() {
        let state = State::new();
        state.value.set(4.0);
        let widget = state.view().make_widget();
        assert_eq!(widget.get_value(), 1.0);
    }

    // =========================================================================
    // Pull
    // =========================================================================

    #[test]
    fn test_pull_writes_value_back() {
        let state = State::new();
        let mut widget = state.view().make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 10.0));

        tap(&mut widget, 150.0);
        assert!((state.value.get() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_editing_changed_reports_tracking() {
        let state = State::new();
        let flags = Arc::new(Mutex::new(Vec::new()));
        let sink = flags.clone();
        let mut widget = state
            .view()
            .on_editing_changed(move |tracking| sink.lock().unwrap().push(tracking))
            .make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 10.0));

        tap(&mut widget, 75.0);
        assert_eq!(*flags.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_feedback_loop_settles() {
        let state = State::new();
        let view = state.view();
        let mut widget = view.make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 10.0));

        let writes = Arc::new(AtomicUsize::new(0));
        let counter = writes.clone();
        state.value.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tap(&mut widget, 150.0);
        let after_gesture = writes.load(Ordering::SeqCst);
        assert_eq!(after_gesture, 2);

        // The refresh the host runs in response pushes the same value back
        // and must not trigger another write.
        view.update_widget(&mut widget);
        view.update_widget(&mut widget);
        assert_eq!(writes.load(Ordering::SeqCst), after_gesture);
    }

    #[test]
    fn test_constant_bindings_ignore_pull() {
        let view = SliderView::new(
            Binding::constant(0.25),
            Binding::constant(0.5),
            Binding::constant(false),
            Binding::constant(false),
        );
        let mut widget = view.make_widget();
        widget.layout(Rect::new(0.0, 0.0, 300.0, 10.0));
        tap(&mut widget, 300.0);
        assert_eq!(widget.get_value(), 1.0);

        view.update_widget(&mut widget);
        assert_eq!(widget.get_value(), 0.25);
    }
}
