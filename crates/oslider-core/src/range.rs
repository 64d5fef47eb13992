//! Closed value interval used by range controls.

use crate::Error;
use serde::{Deserialize, Serialize};

/// A closed interval `[lower, upper]` with `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    lower: f32,
    upper: f32,
}

impl ValueRange {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Self = Self {
        lower: 0.0,
        upper: 1.0,
    };

    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] unless `lower < upper` and both are
    /// finite.
    pub fn new(lower: f32, upper: f32) -> Result<Self, Error> {
        if lower.is_finite() && upper.is_finite() && lower < upper {
            Ok(Self { lower, upper })
        } else {
            Err(Error::InvalidRange { lower, upper })
        }
    }

    /// Lower bound.
    #[must_use]
    pub const fn lower(&self) -> f32 {
        self.lower
    }

    /// Upper bound.
    #[must_use]
    pub const fn upper(&self) -> f32 {
        self.upper
    }

    /// `upper - lower`, always positive.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.upper - self.lower
    }

    /// Clamp a value into the range. NaN maps to `lower`.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.lower
        } else {
            value.clamp(self.lower, self.upper)
        }
    }

    /// Position of `value` within the range in [0, 1].
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        (self.clamp(value) - self.lower) / self.span()
    }

    /// Value at fraction `t` of the range, `t` clamped to [0, 1].
    #[must_use]
    pub fn denormalize(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.span().mul_add(t, self.lower)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Deserialize)]
struct RangeRepr {
    lower: f32,
    upper: f32,
}

impl<'de> Deserialize<'de> for ValueRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = RangeRepr::deserialize(deserializer)?;
        Self::new(repr.lower, repr.upper).map_err(serde::de::Error::custom)
    }
}
