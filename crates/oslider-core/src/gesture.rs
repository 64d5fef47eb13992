//! Pan recognition from a single-pointer event stream.
//!
//! A press followed by movement past `pan_threshold` becomes a pan. A press
//! released before that is left to the caller as a tap.

use crate::event::{Event, GestureState};
use crate::geometry::Point;
use tracing::trace;

/// Configuration for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Minimum distance to start a pan gesture (in pixels).
    pub pan_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_threshold: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { start: Point },
    Panning,
}

/// Recognizes a pan from pointer down/move/up events.
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    config: GestureConfig,
    phase: Phase,
}

impl PanRecognizer {
    /// Create a recognizer with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create with custom config.
    #[must_use]
    pub const fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Get the gesture configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// True once movement crossed the threshold and until release.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.phase == Phase::Panning
    }

    /// Feed a pointer event, returning the pan state it produced.
    pub fn process(&mut self, event: &Event) -> Option<GestureState> {
        match (*event, self.phase) {
            (Event::PointerDown { position }, _) => {
                self.phase = Phase::Pressed { start: position };
                None
            }
            (Event::PointerMove { position }, Phase::Pressed { start }) => {
                if position.distance(&start) >= self.config.pan_threshold {
                    trace!(x = position.x, y = position.y, "pan recognized");
                    self.phase = Phase::Panning;
                    Some(GestureState::Started)
                } else {
                    None
                }
            }
            (Event::PointerMove { .. }, Phase::Panning) => Some(GestureState::Changed),
            (Event::PointerUp { .. }, Phase::Panning) => {
                self.phase = Phase::Idle;
                Some(GestureState::Ended)
            }
            (Event::PointerCancel, Phase::Panning) => {
                self.phase = Phase::Idle;
                Some(GestureState::Cancelled)
            }
            (Event::PointerUp { .. } | Event::PointerCancel, _) => {
                self.phase = Phase::Idle;
                None
            }
            _ => None,
        }
    }

    /// Reset the recognizer.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
