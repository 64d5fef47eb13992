//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle driven by the host:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: accept the bounds the host assigned
//! 3. **Paint**: emit draw commands into a [`Canvas`]
//!
//! Input arrives through [`Widget::event`], which may return a message for
//! the host to downcast.

use crate::constraints::Constraints;
use crate::draw::{Bitmap, Transform2D};
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
pub trait Widget: Send {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Whether a pointer at `point` should be routed to this widget.
    fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains_point(&point)
    }

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::ZERO
    }
}

/// Minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: crate::Color);

    /// Draw a filled rectangle with uniform corner radius.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: crate::Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: crate::Color);

    /// Draw a bitmap scaled into `bounds`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, bounds: Rect, opacity: f32);

    /// Push a clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);

    /// Push a transform.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        bounds: Rect,
    }

    impl Widget for Probe {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn measure(&self, constraints: Constraints) -> Size {
            constraints.constrain(Size::new(10.0, 10.0))
        }

        fn layout(&mut self, bounds: Rect) -> LayoutResult {
            self.bounds = bounds;
            LayoutResult {
                size: bounds.size(),
            }
        }

        fn paint(&self, _canvas: &mut dyn Canvas) {}

        fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
            None
        }

        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    #[test]
    fn test_type_id_distinguishes_types() {
        assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
        assert_eq!(TypeId::of::<Probe>(), TypeId::of::<Probe>());
    }

    #[test]
    fn test_widget_default_hit_test_uses_bounds() {
        let mut probe = Probe { bounds: Rect::ZERO };
        probe.layout(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert!(probe.hit_test(Point::new(15.0, 15.0)));
        assert!(!probe.hit_test(Point::new(5.0, 15.0)));
        assert!(!probe.is_interactive());
        assert_eq!(probe.test_id(), None);
    }
}
