//! Measurement units and the base radius shared by every grid generator.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ConfigError, ConfigResult};

/// Pixels per centimeter at 96 DPI.
pub const PX_PER_CM: f64 = 37.795;

/// Pixels per inch.
pub const PX_PER_INCH: f64 = 96.0;

/// Smallest scale callers should pass in. Zoom controls clamp to this.
pub const MIN_SCALE: f64 = 0.05;

/// Logical measurement unit of the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    #[serde(alias = "cm")]
    Centimeter,
    #[serde(alias = "in")]
    Inch,
}

impl Unit {
    /// Cycle to the next unit.
    pub fn next(self) -> Self {
        match self {
            Unit::Centimeter => Unit::Inch,
            Unit::Inch => Unit::Centimeter,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
        }
    }
}

/// Unit plus zoom factor. `scale` must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub unit: Unit,
    pub scale: f64,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Centimeter,
            scale: 1.0,
        }
    }
}

impl UnitConfig {
    /// Create a config. A non-positive scale is a caller bug.
    pub fn new(unit: Unit, scale: f64) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive, got {scale}");
        Self { unit, scale }
    }

    /// Checked constructor for scales coming from untrusted input.
    pub fn try_new(unit: Unit, scale: f64) -> ConfigResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(Self { unit, scale })
    }

    /// Base radius in logical units for this config.
    pub fn radius(&self) -> f64 {
        compute_radius(self.unit, self.scale)
    }

    /// Convert a tolerance in screen pixels to logical units.
    pub fn logical_tolerance(&self, pixel_tolerance: f64) -> f64 {
        debug_assert!(self.scale > 0.0);
        pixel_tolerance / self.scale
    }
}

/// Compute the base radius for a unit at the given scale.
///
/// Inches carry an extra factor of π while centimeters do not. Existing
/// drawings were laid out against these radii, so both formulas stay as is.
/// `scale` must be positive; this function does not clamp it.
pub fn compute_radius(unit: Unit, scale: f64) -> f64 {
    debug_assert!(scale > 0.0, "scale must be positive, got {scale}");
    match unit {
        Unit::Centimeter => PX_PER_CM / scale,
        Unit::Inch => PX_PER_INCH * PI / scale,
    }
}

/// Clamp a user-controlled zoom factor into the valid scale range.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.max(MIN_SCALE)
}
