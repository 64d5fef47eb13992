//! Input events delivered to widgets.
//!
//! Only a single pointer is modelled. Positions are in the coordinate space
//! the widget was laid out in (the same space as [`Widget::bounds`]).
//!
//! [`Widget::bounds`]: crate::Widget::bounds

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer pressed (touch began, mouse button down)
    PointerDown {
        /// Press position
        position: Point,
    },
    /// Pointer moved while pressed
    PointerMove {
        /// New position
        position: Point,
    },
    /// Pointer released
    PointerUp {
        /// Release position
        position: Point,
    },
    /// Pointer sequence cancelled by the host
    PointerCancel,
    /// Pan gesture recognized by the host
    GesturePan {
        /// Current pointer position
        position: Point,
        /// Gesture state
        state: GestureState,
    },
}

impl Event {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position }
            | Self::PointerMove { position }
            | Self::PointerUp { position }
            | Self::GesturePan { position, .. } => Some(*position),
            Self::PointerCancel => None,
        }
    }
}

/// Continuous gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    /// Gesture recognized
    Started,
    /// Gesture moved
    Changed,
    /// Gesture finished normally
    Ended,
    /// Gesture aborted
    Cancelled,
}

impl GestureState {
    /// True for `Ended` and `Cancelled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}
