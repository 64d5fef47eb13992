//! OSlider: a media-style slider control.
//!
//! A horizontal track with a progress fill that ends at the thumb centre, a
//! secondary buffer fill, an optional thumb and a looping "loading" pulse.
//! Rendering is retained and backend-agnostic: paint into any
//! [`Canvas`](oslider_core::Canvas).
//!
//! # Quick Start
//!
//! ```
//! use oslider::prelude::*;
//!
//! let position = ReactiveCell::new(0.0f32);
//! let buffered = ReactiveCell::new(0.2f32);
//! let view = SliderView::new(
//!     position.binding(),
//!     buffered.binding(),
//!     Binding::constant(false),
//!     Binding::constant(false),
//! )
//! .line_height(10.0);
//!
//! let mut slider = view.make_widget();
//! slider.layout(Rect::new(0.0, 0.0, 300.0, 20.0));
//! slider.event(&Event::PointerDown { position: Point::new(150.0, 5.0) });
//! assert!((position.get() - 0.5).abs() < 1e-6);
//! ```

pub mod binding;
pub mod demo;

pub use binding::SliderView;
pub use oslider_core as core;
pub use oslider_widgets as widgets;

pub use oslider_core::{
    Binding, Canvas, Color, Constraints, Error, Event, GestureState, Point, ReactiveCell, Rect,
    RecordingCanvas, Size, ValueRange, Widget,
};
pub use oslider_widgets::{
    AnimationState, OSlider, SliderChanged, SliderOverrides, SliderStyle, StyleError,
};

/// Common imports.
pub mod prelude {
    pub use crate::binding::SliderView;
    pub use oslider_core::{
        Binding, Canvas, Color, Event, Point, ReactiveCell, Rect, RecordingCanvas, Size,
        ValueRange, Widget,
    };
    pub use oslider_widgets::{OSlider, SliderChanged, SliderOverrides, SliderStyle};
}
