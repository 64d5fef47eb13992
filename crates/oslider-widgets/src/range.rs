//! Range control: value, range, tracking flag and the pointer-to-value map.

use oslider_core::{Rect, ValueRange};
use tracing::debug;

/// The interactive range capability the slider is composed from.
///
/// Owns the current value (always inside the range) and the tracking flag.
/// Knows nothing about layers or colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeControl {
    range: ValueRange,
    value: f32,
    tracking: bool,
}

impl Default for RangeControl {
    fn default() -> Self {
        Self::new(ValueRange::UNIT)
    }
}

impl RangeControl {
    /// Create a control at the lower bound of `range`.
    #[must_use]
    pub const fn new(range: ValueRange) -> Self {
        Self {
            range,
            value: range.lower(),
            tracking: false,
        }
    }

    /// Current range.
    #[must_use]
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// True while a pointer gesture is active.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Set the tracking flag, returning whether it flipped.
    pub fn set_tracking(&mut self, tracking: bool) -> bool {
        let flipped = self.tracking != tracking;
        if flipped {
            debug!(tracking, "tracking changed");
        }
        self.tracking = tracking;
        flipped
    }

    /// Store `value` clamped into the range and return what was stored.
    pub fn set_value(&mut self, value: f32) -> f32 {
        self.value = clamp_logged(&self.range, value, "value");
        self.value
    }

    /// Replace the range, re-clamping the value.
    pub fn set_range(&mut self, range: ValueRange) {
        debug!(lower = range.lower(), upper = range.upper(), "range changed");
        self.range = range;
        self.value = clamp_logged(&self.range, self.value, "value");
    }

    /// Value position in [0, 1].
    #[must_use]
    pub fn normalized(&self) -> f32 {
        self.range.normalize(self.value)
    }

    /// Value under a pointer at `x` along a track `width` wide.
    ///
    /// `None` while the track has no width.
    #[must_use]
    pub fn value_for_x(&self, x: f32, width: f32) -> Option<f32> {
        (width > 0.0).then(|| self.range.denormalize(x / width))
    }

    /// Square thumb of side `thumb_size` at fraction `normalized` of `track`,
    /// vertically centred on it.
    #[must_use]
    pub fn standard_thumb_rect(track: Rect, thumb_size: f32, normalized: f32) -> Rect {
        let travel = (track.width - thumb_size).max(0.0);
        let n = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        Rect::new(
            travel.mul_add(n, track.x),
            track.mid_y() - thumb_size / 2.0,
            thumb_size,
            thumb_size,
        )
    }
}

/// Clamp into `range`, logging when the input was outside it.
pub(crate) fn clamp_logged(range: &ValueRange, value: f32, what: &'static str) -> f32 {
    let clamped = range.clamp(value);
    if clamped != value {
        debug!(field = what, requested = value, clamped, "clamped into range");
    }
    clamped
}
