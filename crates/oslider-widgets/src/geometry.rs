//! Track geometry: value to rectangle mapping.
//!
//! Everything here is computed in the widget's local space (bounds origin
//! at 0, 0). The only state is the anchor captured from the first non-zero
//! track rectangle, so a transient zero-size layout does not move the fills.

use crate::range::RangeControl;
use oslider_core::{Point, Rect, Size};
use serde::Serialize;

/// Amount the visible thumb square is grown on every side for hit-testing.
pub const THUMB_HIT_INSET: f32 = 20.0;

/// Every rectangle the surface needs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SliderFrames {
    /// Full-width base track
    pub track: Rect,
    /// Expanded thumb rectangle
    pub thumb: Rect,
    /// Progress fill, ends at the thumb centre
    pub progress: Rect,
    /// Buffer fill, ends at the buffer thumb centre
    pub buffer: Rect,
}

/// Value to geometry mapping with a cached anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackGeometry {
    original_rect: Option<Rect>,
}

impl TrackGeometry {
    /// Fresh geometry with no anchor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            original_rect: None,
        }
    }

    /// The first non-zero track rectangle seen, if any.
    #[must_use]
    pub const fn original_rect(&self) -> Option<Rect> {
        self.original_rect
    }

    /// Origin fills are anchored at.
    #[must_use]
    pub fn anchor(&self, track: Rect) -> Point {
        self.original_rect.map_or(track.origin(), |r| r.origin())
    }

    /// Full-width track of height `line_height` at the top of `bounds`.
    #[must_use]
    pub fn track_rect(bounds: Size, line_height: f32) -> Rect {
        Rect::new(0.0, 0.0, bounds.width.max(0.0), line_height.max(0.0))
    }

    /// Expanded thumb rectangle for `normalized` along `track`.
    #[must_use]
    pub fn thumb_rect(track: Rect, thumb_size: f32, normalized: f32) -> Rect {
        RangeControl::standard_thumb_rect(track, thumb_size, normalized)
            .inset_by(-THUMB_HIT_INSET, -THUMB_HIT_INSET)
    }

    /// Fill from the anchor to the thumb centre for `normalized`.
    ///
    /// Zero width while the track has no width.
    #[must_use]
    pub fn fill_rect(&self, track: Rect, thumb_size: f32, normalized: f32) -> Rect {
        let anchor = self.anchor(track);
        let width = if track.width > 0.0 {
            Self::thumb_rect(track, thumb_size, normalized).mid_x()
        } else {
            0.0
        };
        Rect::new(anchor.x, anchor.y, width, track.height)
    }

    /// Compute every frame for normalized value and buffer positions,
    /// capturing the anchor on the first non-zero track.
    pub fn compute(
        &mut self,
        bounds: Size,
        line_height: f32,
        value: f32,
        buffer: f32,
    ) -> SliderFrames {
        let track = Self::track_rect(bounds, line_height);
        if self.original_rect.is_none() && track.width > 0.0 && !track.is_zero() {
            self.original_rect = Some(track);
        }

        let thumb_size = line_height.max(0.0) * 2.0;
        SliderFrames {
            track,
            thumb: Self::thumb_rect(track, thumb_size, value),
            progress: self.fill_rect(track, thumb_size, value),
            buffer: self.fill_rect(track, thumb_size, buffer),
        }
    }
}
