//! Headless demo host: a playback simulator driving four bound sliders.

use crate::binding::SliderView;
use oslider_core::{Canvas, Color, ReactiveCell, Rect, Widget};
use oslider_widgets::{AnimationState, OSlider, SliderFrames, SliderOverrides};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Line heights of the demo sliders, top to bottom.
pub const DEMO_LINE_HEIGHTS: [f32; 4] = [20.0, 15.0, 10.0, 5.0];

/// Horizontal padding around the sliders.
pub const DEMO_PADDING: f32 = 16.0;

/// Vertical gap between sliders.
pub const DEMO_SPACING: f32 = 24.0;

const STEP: f32 = 0.01;
const BUFFER_LEAD: f32 = 0.05;

/// Simulated media playback: the value plays forward while the buffer
/// loads ahead of it.
#[derive(Debug, Clone)]
pub struct PlaybackSimulator {
    value: ReactiveCell<f32>,
    buffer: ReactiveCell<f32>,
    hide_thumb: ReactiveCell<bool>,
    animating: ReactiveCell<bool>,
}

impl Default for PlaybackSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSimulator {
    /// Value 0, buffer 0.2, thumb hidden, not animating.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: ReactiveCell::new(0.0),
            buffer: ReactiveCell::new(0.2),
            hide_thumb: ReactiveCell::new(true),
            animating: ReactiveCell::new(false),
        }
    }

    /// Playback position cell.
    #[must_use]
    pub const fn value(&self) -> &ReactiveCell<f32> {
        &self.value
    }

    /// Buffered position cell.
    #[must_use]
    pub const fn buffer(&self) -> &ReactiveCell<f32> {
        &self.buffer
    }

    /// Thumb visibility cell.
    #[must_use]
    pub const fn hide_thumb(&self) -> &ReactiveCell<bool> {
        &self.hide_thumb
    }

    /// Loading pulse cell.
    #[must_use]
    pub const fn animating(&self) -> &ReactiveCell<bool> {
        &self.animating
    }

    /// One timer tick.
    ///
    /// The value advances while below 1. The buffer advances while below 1
    /// and more than 0.05 ahead of the value.
    pub fn tick(&self) {
        let value = self.value.get();
        if value < 1.0 {
            self.value.set((value + STEP).min(1.0));
        }

        let value = self.value.get();
        let buffer = self.buffer.get();
        if buffer < 1.0 && value + BUFFER_LEAD < buffer {
            self.buffer.set((buffer + STEP).min(1.0));
        }
    }
}

fn mark_dirty_on_change<T>(cell: &ReactiveCell<T>, dirty: &Arc<AtomicBool>)
where
    T: Clone + Send + Sync + 'static,
{
    let dirty = Arc::clone(dirty);
    cell.subscribe(move |_| dirty.store(true, Ordering::SeqCst));
}

/// Serializable state of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSnapshot {
    /// Track height
    pub line_height: f32,
    /// Current value
    pub value: f32,
    /// Current buffer value
    pub buffer_value: f32,
    /// Whether a gesture is active
    pub tracking: bool,
    /// Pulse state
    pub animation: AnimationState,
    /// Thumb opacity as drawn
    pub thumb_opacity: f32,
    /// Widget bounds in screen space
    pub bounds: Rect,
    /// Frames in widget-local space
    pub frames: SliderFrames,
}

impl SliderSnapshot {
    fn of(widget: &OSlider) -> Self {
        Self {
            line_height: widget.get_line_height(),
            value: widget.get_value(),
            buffer_value: widget.get_buffer_value(),
            tracking: widget.is_tracking(),
            animation: widget.animation_state(),
            thumb_opacity: widget.surface().thumb().effective_opacity(),
            bounds: widget.bounds(),
            frames: *widget.frames(),
        }
    }
}

/// Four sliders of decreasing height bound to one [`PlaybackSimulator`].
#[derive(Debug)]
pub struct DemoScreen {
    simulator: PlaybackSimulator,
    views: Vec<SliderView>,
    widgets: Vec<OSlider>,
    dirty: Arc<AtomicBool>,
    width: f32,
}

impl DemoScreen {
    /// Build and lay out the screen for a window `width` wide, with the
    /// buffer drawn in translucent gray.
    #[must_use]
    pub fn new(simulator: PlaybackSimulator, width: f32) -> Self {
        Self::with_overrides(
            simulator,
            width,
            SliderOverrides::default().buffer_color(Color::GRAY.with_alpha(0.3)),
        )
    }

    /// Build and lay out the screen with explicit color overrides.
    #[must_use]
    pub fn with_overrides(
        simulator: PlaybackSimulator,
        width: f32,
        overrides: SliderOverrides,
    ) -> Self {
        let dirty = Arc::new(AtomicBool::new(false));
        mark_dirty_on_change(&simulator.value, &dirty);
        mark_dirty_on_change(&simulator.buffer, &dirty);
        mark_dirty_on_change(&simulator.hide_thumb, &dirty);
        mark_dirty_on_change(&simulator.animating, &dirty);

        let views: Vec<SliderView> = DEMO_LINE_HEIGHTS
            .iter()
            .map(|&line_height| {
                SliderView::new(
                    simulator.value.binding(),
                    simulator.buffer.binding(),
                    simulator.animating.binding(),
                    simulator.hide_thumb.binding(),
                )
                .line_height(line_height)
                .overrides(overrides)
            })
            .collect();
        let widgets = views.iter().map(SliderView::make_widget).collect();

        let mut screen = Self {
            simulator,
            views,
            widgets,
            dirty,
            width,
        };
        screen.layout(width);
        screen
    }

    /// Stack the sliders vertically inside the padded width.
    pub fn layout(&mut self, width: f32) {
        self.width = width;
        let inner = (width - 2.0 * DEMO_PADDING).max(0.0);
        let mut y = DEMO_PADDING;
        for widget in &mut self.widgets {
            let height = widget.thumb_size();
            widget.layout(Rect::new(DEMO_PADDING, y, inner, height));
            y += height + DEMO_SPACING;
        }
    }

    /// Window width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// The bound state.
    #[must_use]
    pub const fn simulator(&self) -> &PlaybackSimulator {
        &self.simulator
    }

    /// The declarative views.
    #[must_use]
    pub fn views(&self) -> &[SliderView] {
        &self.views
    }

    /// The mounted widgets.
    #[must_use]
    pub fn widgets(&self) -> &[OSlider] {
        &self.widgets
    }

    /// The mounted widgets, mutably (for routing input).
    pub fn widgets_mut(&mut self) -> &mut [OSlider] {
        &mut self.widgets
    }

    /// True when bound state changed since the last refresh.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Advance the simulator by one tick.
    pub fn tick(&self) {
        self.simulator.tick();
    }

    /// Push bound state into every widget if anything changed.
    ///
    /// Returns whether a push happened.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return false;
        }
        for (view, widget) in self.views.iter().zip(self.widgets.iter_mut()) {
            view.update_widget(widget);
        }
        debug!(
            value = self.simulator.value.get(),
            buffer = self.simulator.buffer.get(),
            "demo refreshed"
        );
        true
    }

    /// One display frame: refresh, then advance animation clocks.
    pub fn frame(&mut self, dt: Duration) {
        self.refresh();
        for widget in &mut self.widgets {
            widget.advance(dt);
        }
    }

    /// Draw every slider.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        for widget in &self.widgets {
            widget.paint(canvas);
        }
    }

    /// State of every slider, top to bottom.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SliderSnapshot> {
        self.widgets.iter().map(SliderSnapshot::of).collect()
    }
}
