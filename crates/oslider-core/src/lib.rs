//! Core types and traits for the OSlider control.
//!
//! This crate provides the foundational types the slider widgets build on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Pointer input: [`Event`], [`PanRecognizer`]
//! - Rendering: [`Canvas`], [`RecordingCanvas`], [`DrawCommand`], [`Bitmap`]
//! - Property animation: [`BasicAnimation`]
//! - Reactive state: [`ReactiveCell`], [`Binding`]

pub mod animation;
pub mod binding;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod error;
mod event;
pub mod gesture;
mod geometry;
mod range;
pub mod widget;

pub use animation::{BasicAnimation, Easing, FillMode, Interpolate, Repeat};
pub use binding::{Binding, ReactiveCell};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{Bitmap, BoxStyle, DrawCommand, Transform2D};
pub use error::{Error, Result};
pub use event::{Event, GestureState};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use gesture::{GestureConfig, PanRecognizer};
pub use range::ValueRange;
pub use widget::{Canvas, LayoutResult, TypeId, Widget};
