//! Render surface: the three track layers and the thumb visual.

use crate::geometry::SliderFrames;
use crate::layer::{Layer, WriteMode};
use crate::style::SliderStyle;
use oslider_core::{Bitmap, Canvas, Color, Point, Rect, Transform2D};
use serde::Serialize;
use std::time::Duration;
use tracing::trace;

/// Identifies one of the track layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayerId {
    /// Full-width base track
    Base,
    /// Buffer fill
    Buffer,
    /// Progress fill
    Progress,
}

impl LayerId {
    /// Layers from bottom to top. The buffer sits under the progress fill.
    pub const Z_ORDER: [Self; 3] = [Self::Base, Self::Buffer, Self::Progress];
}

/// The thumb: a rasterized disc drawn centred in its (expanded) frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbVisual {
    bitmap: Bitmap,
    frame: Rect,
    hidden: bool,
    opacity: f32,
}

impl Default for ThumbVisual {
    fn default() -> Self {
        Self {
            bitmap: Bitmap::empty(),
            frame: Rect::ZERO,
            hidden: false,
            opacity: 1.0,
        }
    }
}

impl ThumbVisual {
    /// Current raster.
    #[must_use]
    pub const fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Expanded thumb frame.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Whether the thumb is hidden by configuration.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Opacity before the hidden flag is applied.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity actually drawn: zero while hidden.
    #[must_use]
    pub fn effective_opacity(&self) -> f32 {
        if self.hidden {
            0.0
        } else {
            self.opacity
        }
    }

    /// Set opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Where the bitmap lands: its own size, centred in the frame.
    #[must_use]
    pub fn bitmap_rect(&self) -> Rect {
        let size = self.bitmap.size();
        Rect::new(
            self.frame.mid_x() - size.width / 2.0,
            self.frame.mid_y() - size.height / 2.0,
            size.width,
            size.height,
        )
    }
}

/// Base, buffer and progress layers plus the thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    base: Layer,
    buffer: Layer,
    progress: Layer,
    thumb: ThumbVisual,
}

impl RenderSurface {
    /// Build layers colored and shaped from `style`, with a rendered thumb.
    #[must_use]
    pub fn new(style: &SliderStyle) -> Self {
        let mut surface = Self {
            base: Layer::new(style.base_color),
            buffer: Layer::new(style.buffer_color),
            progress: Layer::new(style.progress_color),
            thumb: ThumbVisual::default(),
        };
        surface.apply_colors(style);
        surface.render_thumb(style.thumb_size(), style.thumb_color, style.hide_thumb);
        surface
    }

    /// One track layer.
    #[must_use]
    pub const fn layer(&self, id: LayerId) -> &Layer {
        match id {
            LayerId::Base => &self.base,
            LayerId::Buffer => &self.buffer,
            LayerId::Progress => &self.progress,
        }
    }

    /// One track layer, mutably.
    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        match id {
            LayerId::Base => &mut self.base,
            LayerId::Buffer => &mut self.buffer,
            LayerId::Progress => &mut self.progress,
        }
    }

    /// The thumb visual.
    #[must_use]
    pub const fn thumb(&self) -> &ThumbVisual {
        &self.thumb
    }

    /// The thumb visual, mutably.
    pub fn thumb_mut(&mut self) -> &mut ThumbVisual {
        &mut self.thumb
    }

    /// Snap every frame to `frames`; no tweening.
    pub fn apply_frames(&mut self, frames: &SliderFrames) {
        self.base.set_frame(frames.track, WriteMode::Immediate);
        self.progress.set_frame(frames.progress, WriteMode::Immediate);
        self.buffer.set_frame(frames.buffer, WriteMode::Immediate);
        self.thumb.frame = frames.thumb;
    }

    /// Fill colors and corner radii from `style`.
    pub fn apply_colors(&mut self, style: &SliderStyle) {
        let radius = style.corner_radius();
        for (id, color) in [
            (LayerId::Base, style.base_color),
            (LayerId::Buffer, style.buffer_color),
            (LayerId::Progress, style.progress_color),
        ] {
            let layer = self.layer_mut(id);
            layer.set_background(color);
            layer.set_corner_radius(radius);
        }
    }

    /// Rasterize a fresh thumb disc of diameter `size`.
    ///
    /// The bitmap is produced even when `hidden`; only the drawn opacity
    /// drops to zero. A non-positive size leaves an empty bitmap.
    pub fn render_thumb(&mut self, size: f32, color: Color, hidden: bool) {
        trace!(size, hidden, "thumb rendered");
        self.thumb.bitmap = Bitmap::circle(size, color);
        self.thumb.hidden = hidden;
    }

    /// Move every layer clock forward.
    pub fn advance(&mut self, dt: Duration) {
        for id in LayerId::Z_ORDER {
            self.layer_mut(id).advance(dt);
        }
    }

    /// Draw the surface with its local origin at `origin`.
    pub fn paint(&self, canvas: &mut dyn Canvas, origin: Point) {
        canvas.push_transform(Transform2D::translate(origin.x, origin.y));

        for id in LayerId::Z_ORDER {
            let layer = self.layer(id);
            let frame = layer.presentation_frame();
            if layer.is_hidden() || frame.width <= 0.0 || frame.height <= 0.0 {
                continue;
            }
            canvas.fill_rounded_rect(
                frame,
                layer.corner_radius(),
                layer.presentation_background(),
            );
        }

        let opacity = self.thumb.effective_opacity();
        if opacity > 0.0 && !self.thumb.bitmap.is_empty() {
            canvas.draw_bitmap(&self.thumb.bitmap, self.thumb.bitmap_rect(), opacity);
        }

        canvas.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TrackGeometry;
    use oslider_core::{DrawCommand, RecordingCanvas, Size};

    fn frames(value: f32, buffer: f32) -> SliderFrames {
        TrackGeometry::new().compute(Size::new(300.0, 10.0), 5.0, value, buffer)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_surface_new_applies_style() {
        let style = SliderStyle::default();
        let surface = RenderSurface::new(&style);
        assert_eq!(surface.layer(LayerId::Base).background(), style.base_color);
        assert_eq!(surface.layer(LayerId::Buffer).background(), style.buffer_color);
        assert_eq!(
            surface.layer(LayerId::Progress).background(),
            style.progress_color
        );
        assert!((surface.layer(LayerId::Base).corner_radius() - 5.0 / 3.0).abs() < 1e-6);
        assert_eq!(surface.thumb().bitmap().width(), 10);
        assert_eq!(surface.thumb().effective_opacity(), 1.0);
    }

    #[test]
    fn test_surface_hidden_thumb_still_rasterized() {
        let style = SliderStyle {
            hide_thumb: true,
            ..SliderStyle::default()
        };
        let surface = RenderSurface::new(&style);
        assert!(!surface.thumb().bitmap().is_empty());
        assert_eq!(surface.thumb().effective_opacity(), 0.0);
        assert_eq!(surface.thumb().opacity(), 1.0);
    }

    #[test]
    fn test_render_thumb_zero_size_is_empty() {
        let mut surface = RenderSurface::new(&SliderStyle::default());
        surface.render_thumb(0.0, Color::WHITE, false);
        assert!(surface.thumb().bitmap().is_empty());
    }

    // =========================================================================
    // Frames
    // =========================================================================

    #[test]
    fn test_apply_frames_snaps_layers() {
        let mut surface = RenderSurface::new(&SliderStyle::default());
        let f = frames(0.5, 0.2);
        surface.apply_frames(&f);
        assert_eq!(surface.layer(LayerId::Base).presentation_frame(), f.track);
        assert_eq!(surface.layer(LayerId::Progress).presentation_frame(), f.progress);
        assert_eq!(surface.layer(LayerId::Buffer).presentation_frame(), f.buffer);
        assert_eq!(surface.thumb().frame(), f.thumb);
        assert!(!surface.layer(LayerId::Progress).is_transitioning());
    }

    #[test]
    fn test_thumb_bitmap_centred_in_frame() {
        let mut surface = RenderSurface::new(&SliderStyle::default());
        surface.apply_frames(&frames(0.5, 0.0));
        let rect = surface.thumb().bitmap_rect();
        assert_eq!(rect.width, 10.0);
        assert_eq!(rect.mid_x(), 150.0);
        assert_eq!(rect.mid_y(), 2.5);
    }

    // =========================================================================
    // Paint
    // =========================================================================

    #[test]
    fn test_paint_z_order() {
        let style = SliderStyle::default();
        let mut surface = RenderSurface::new(&style);
        surface.apply_frames(&frames(0.5, 0.8));

        let mut canvas = RecordingCanvas::new();
        surface.paint(&mut canvas, Point::new(20.0, 40.0));

        let colors: Vec<Color> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { style, .. } => style.fill,
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            vec![style.base_color, style.buffer_color, style.progress_color]
        );
        assert!(matches!(
            canvas.commands().last(),
            Some(DrawCommand::Bitmap { opacity, .. }) if *opacity == 1.0
        ));
        assert_eq!(canvas.transform_depth(), 0);
    }

    #[test]
    fn test_paint_skips_hidden_layers_and_thumb() {
        let mut surface = RenderSurface::new(&SliderStyle::default());
        surface.apply_frames(&frames(0.5, 0.8));
        surface.layer_mut(LayerId::Progress).set_hidden(true);
        surface.layer_mut(LayerId::Buffer).set_hidden(true);
        surface.thumb_mut().set_opacity(0.0);

        let mut canvas = RecordingCanvas::new();
        surface.paint(&mut canvas, Point::ORIGIN);
        assert_eq!(canvas.command_count(), 1);
    }

    #[test]
    fn test_paint_skips_degenerate_frames() {
        let surface = RenderSurface::new(&SliderStyle::default());
        let mut canvas = RecordingCanvas::new();
        surface.paint(&mut canvas, Point::ORIGIN);
        // Only the thumb: every layer frame is still zero.
        assert_eq!(canvas.command_count(), 1);
    }
}
