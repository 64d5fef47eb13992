//! Widget implementations for the OSlider control.
//!
//! [`OSlider`] composes a [`RangeControl`] (value, range, tracking), a
//! [`TrackGeometry`] (value to rectangles), a [`RenderSurface`] (layers and
//! thumb) and a [`PulseAnimator`] (loading pulse).

pub mod geometry;
pub mod layer;
pub mod pulse;
pub mod range;
pub mod slider;
pub mod style;
pub mod surface;

pub use geometry::{SliderFrames, TrackGeometry, THUMB_HIT_INSET};
pub use layer::{Layer, WriteMode};
pub use pulse::{AnimationState, PulseAnimator, PULSE_DURATION, PULSE_KEY};
pub use range::RangeControl;
pub use slider::{OSlider, SliderChanged};
pub use style::{palette, SliderOverrides, SliderStyle, StyleError, DEFAULT_LINE_HEIGHT};
pub use surface::{LayerId, RenderSurface, ThumbVisual};
