//! Typed grid configuration.
//!
//! Everything the caller chooses (grid type, unit, scale, device tier and
//! stroke style) lives here, with defaults for every field so partial JSON
//! documents load.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::budget::{DeviceTier, TruncationPolicy};
use crate::error::{ConfigError, ConfigResult};
use crate::grid::GridType;
use crate::intersections::IntersectionMode;
use crate::snap::DEFAULT_PIXEL_TOLERANCE;
use crate::units::{Unit, UnitConfig, clamp_scale};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How guide geometry is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternStyle {
    /// Base stroke color.
    pub color: SerializableColor,
    /// Multiplies the color's alpha, 0..=1.
    pub opacity: f64,
    /// Stroke width in screen pixels.
    pub stroke_width: f64,
}

impl Default for PatternStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::new(120, 120, 160, 255),
            opacity: 0.5,
            stroke_width: 1.0,
        }
    }
}

impl PatternStyle {
    /// Stroke color with opacity applied.
    pub fn stroke_color(&self) -> Color {
        let c = self.color;
        let alpha = (f64::from(c.a) * self.opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(c.r, c.g, c.b, alpha)
    }

    /// Stroke width in logical units, so strokes stay constant on screen.
    pub fn logical_stroke_width(&self, units: UnitConfig) -> f64 {
        self.stroke_width / units.scale
    }
}

/// Grid configuration held by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub grid_type: GridType,
    pub unit: Unit,
    /// Zoom factor; must be positive.
    pub scale: f64,
    pub tier: DeviceTier,
    /// Snap radius in screen pixels.
    pub pixel_tolerance: f64,
    pub truncation: TruncationPolicy,
    pub intersection_mode: IntersectionMode,
    pub style: PatternStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_type: GridType::default(),
            unit: Unit::default(),
            scale: 1.0,
            tier: DeviceTier::default(),
            pixel_tolerance: DEFAULT_PIXEL_TOLERANCE,
            truncation: TruncationPolicy::default(),
            intersection_mode: IntersectionMode::default(),
            style: PatternStyle::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded grid config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !self.pixel_tolerance.is_finite() || self.pixel_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.pixel_tolerance));
        }
        if !(0.0..=1.0).contains(&self.style.opacity) {
            return Err(ConfigError::InvalidOpacity(self.style.opacity));
        }
        if !self.style.stroke_width.is_finite() || self.style.stroke_width <= 0.0 {
            return Err(ConfigError::InvalidStrokeWidth(self.style.stroke_width));
        }
        Ok(())
    }

    /// Set the scale from a zoom control, clamped to the valid range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    pub fn units(&self) -> UnitConfig {
        UnitConfig::new(self.unit, self.scale)
    }

    /// Logical snap radius at the current scale.
    pub fn logical_tolerance(&self) -> f64 {
        self.units().logical_tolerance(self.pixel_tolerance)
    }
}
