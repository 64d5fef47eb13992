//! Visual configuration: palette, line height and thumb visibility.

use oslider_core::{Color, Error};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::debug;

/// Default line height in layout units.
pub const DEFAULT_LINE_HEIGHT: f32 = 5.0;

/// Errors raised while loading a style file.
#[derive(Debug, ThisError)]
pub enum StyleError {
    /// YAML decode error
    #[error("YAML style error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML decode error
    #[error("TOML style error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Decoded but unusable values
    #[error("invalid style: {0}")]
    Invalid(#[from] Error),
}

/// Built-in palette.
pub mod palette {
    use oslider_core::Color;

    /// Base track
    pub const BASE: Color = Color {
        r: 0.21,
        g: 0.21,
        b: 0.21,
        a: 1.0,
    };
    /// Progress fill
    pub const PROGRESS: Color = Color {
        r: 0.47,
        g: 0.47,
        b: 0.47,
        a: 1.0,
    };
    /// Buffer fill
    pub const BUFFER: Color = Color {
        r: 0.27,
        g: 0.27,
        b: 0.27,
        a: 1.0,
    };
    /// Pulse start color
    pub const PULSE_FROM: Color = Color {
        r: 0.34,
        g: 0.38,
        b: 0.44,
        a: 1.0,
    };
    /// Pulse end color
    pub const PULSE_TO: Color = Color {
        r: 0.81,
        g: 0.84,
        b: 0.88,
        a: 1.0,
    };
    /// Thumb fill, (183, 122, 231) / 255
    pub const THUMB: Color = Color {
        r: 183.0 / 255.0,
        g: 122.0 / 255.0,
        b: 231.0 / 255.0,
        a: 1.0,
    };
}

/// Slider look, loadable from YAML or TOML.
///
/// ```yaml
/// line_height: 10
/// buffer_color: "#80808050"
/// hide_thumb: true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderStyle {
    /// Track height; the thumb diameter is twice this
    pub line_height: f32,
    /// Base track color
    pub base_color: Color,
    /// Progress fill color
    pub progress_color: Color,
    /// Buffer fill color
    pub buffer_color: Color,
    /// Pulse start color
    pub pulse_from_color: Color,
    /// Pulse end color
    pub pulse_to_color: Color,
    /// Thumb fill color
    pub thumb_color: Color,
    /// Whether the thumb is invisible
    pub hide_thumb: bool,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            base_color: palette::BASE,
            progress_color: palette::PROGRESS,
            buffer_color: palette::BUFFER,
            pulse_from_color: palette::PULSE_FROM,
            pulse_to_color: palette::PULSE_TO,
            thumb_color: palette::THUMB,
            hide_thumb: false,
        }
    }
}

impl SliderStyle {
    /// Thumb diameter.
    #[must_use]
    pub fn thumb_size(&self) -> f32 {
        self.line_height * 2.0
    }

    /// Track corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f32 {
        self.line_height / 3.0
    }

    /// Check the values a widget can render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineHeight`] for a non-positive or non-finite
    /// line height.
    pub fn validate(&self) -> Result<(), Error> {
        validate_line_height(self.line_height)
    }

    /// Copy with every `Some` override applied.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &SliderOverrides) -> Self {
        overrides.apply_to(&mut self);
        self
    }

    /// Parse and validate a YAML style document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StyleError> {
        let style: Self = serde_yaml_ng::from_str(yaml)?;
        style.validate()?;
        debug!(line_height = style.line_height, "loaded YAML style");
        Ok(style)
    }

    /// Parse and validate a TOML style document.
    pub fn from_toml_str(source: &str) -> Result<Self, StyleError> {
        let style: Self = toml::from_str(source)?;
        style.validate()?;
        debug!(line_height = style.line_height, "loaded TOML style");
        Ok(style)
    }
}

pub(crate) fn validate_line_height(height: f32) -> Result<(), Error> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidLineHeight { height })
    }
}

/// Optional colour overrides; `None` keeps the current color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderOverrides {
    /// Base track color
    pub base_color: Option<Color>,
    /// Progress fill color
    pub progress_color: Option<Color>,
    /// Buffer fill color
    pub buffer_color: Option<Color>,
    /// Pulse start color
    pub pulse_from_color: Option<Color>,
    /// Pulse end color
    pub pulse_to_color: Option<Color>,
    /// Thumb fill color
    pub thumb_color: Option<Color>,
}

impl SliderOverrides {
    /// Override the base track color.
    #[must_use]
    pub const fn base_color(mut self, color: Color) -> Self {
        self.base_color = Some(color);
        self
    }

    /// Override the progress color.
    #[must_use]
    pub const fn progress_color(mut self, color: Color) -> Self {
        self.progress_color = Some(color);
        self
    }

    /// Override the buffer color.
    #[must_use]
    pub const fn buffer_color(mut self, color: Color) -> Self {
        self.buffer_color = Some(color);
        self
    }

    /// Override the pulse start color.
    #[must_use]
    pub const fn pulse_from_color(mut self, color: Color) -> Self {
        self.pulse_from_color = Some(color);
        self
    }

    /// Override the pulse end color.
    #[must_use]
    pub const fn pulse_to_color(mut self, color: Color) -> Self {
        self.pulse_to_color = Some(color);
        self
    }

    /// Override the thumb color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = Some(color);
        self
    }

    /// True when nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every `Some` field into `style`.
    pub fn apply_to(&self, style: &mut SliderStyle) {
        if let Some(c) = self.base_color {
            style.base_color = c;
        }
        if let Some(c) = self.progress_color {
            style.progress_color = c;
        }
        if let Some(c) = self.buffer_color {
            style.buffer_color = c;
        }
        if let Some(c) = self.pulse_from_color {
            style.pulse_from_color = c;
        }
        if let Some(c) = self.pulse_to_color {
            style.pulse_to_color = c;
        }
        if let Some(c) = self.thumb_color {
            style.thumb_color = c;
        }
    }
}

impl From<&SliderStyle> for SliderOverrides {
    /// Every color of `style` as an override.
    fn from(style: &SliderStyle) -> Self {
        Self {
            base_color: Some(style.base_color),
            progress_color: Some(style.progress_color),
            buffer_color: Some(style.buffer_color),
            pulse_from_color: Some(style.pulse_from_color),
            pulse_to_color: Some(style.pulse_to_color),
            thumb_color: Some(style.thumb_color),
        }
    }
}
