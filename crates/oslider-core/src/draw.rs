//! Draw commands and raster primitives.
//!
//! All slider rendering reduces to rounded rectangles and one bitmap.

use crate::{Color, CornerRadius, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self { fill: Some(color) }
    }
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0].mul_add(b[0], a[2] * b[1]),
                a[1].mul_add(b[0], a[3] * b[1]),
                a[0].mul_add(b[2], a[2] * b[3]),
                a[1].mul_add(b[2], a[3] * b[3]),
                a[0].mul_add(b[4], a[2].mul_add(b[5], a[4])),
                a[1].mul_add(b[4], a[3].mul_add(b[5], a[5])),
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0].mul_add(point.x, m[2].mul_add(point.y, m[4])),
            m[1].mul_add(point.x, m[3].mul_add(point.y, m[5])),
        )
    }
}

/// RGBA8 raster image, row-major, no premultiplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// The empty (invalid) bitmap.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Largest side, in pixels, [`Bitmap::circle`] will rasterize.
    pub const MAX_SIDE: u32 = 4096;

    /// Rasterize a filled disc of the given diameter.
    ///
    /// Equivalent to a square of side `diameter` with corner radius
    /// `diameter / 2`. A non-positive or non-finite diameter, or one wider
    /// than [`Bitmap::MAX_SIDE`], yields [`Bitmap::empty`].
    #[must_use]
    pub fn circle(diameter: f32, color: Color) -> Self {
        if !diameter.is_finite() || diameter <= 0.0 || diameter > Self::MAX_SIDE as f32 {
            return Self::empty();
        }

        let side = diameter.ceil() as u32;
        let Some(len) = (side as usize)
            .checked_mul(side as usize)
            .and_then(|n| n.checked_mul(4))
        else {
            return Self::empty();
        };
        let radius = diameter / 2.0;
        let rgba = color.to_rgba8();
        let mut pixels = Vec::with_capacity(len);

        for y in 0..side {
            for x in 0..side {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx.hypot(dy) <= radius {
                    pixels.extend_from_slice(&rgba);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }

        Self {
            width: side,
            height: side,
            pixels,
        }
    }

    /// Pixel width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Size in layout units.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// True for a zero-area bitmap.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA of one pixel, `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(i..i + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Blit a bitmap into bounds
    Bitmap {
        /// Destination bounds
        bounds: Rect,
        /// Source width in pixels
        width: u32,
        /// Source height in pixels
        height: u32,
        /// Alpha multiplier (0.0 - 1.0)
        opacity: f32,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a rounded rectangle.
    #[must_use]
    pub const fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub const fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Bounds of the primitive.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { bounds, .. } | Self::Bitmap { bounds, .. } => *bounds,
            Self::Circle { center, radius, .. } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }
}
