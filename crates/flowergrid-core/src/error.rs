//! Configuration errors.
//!
//! Geometry queries never fail; only building a configuration from user
//! input can.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
    #[error("Pixel tolerance must be non-negative, got {0}")]
    InvalidTolerance(f64),
    #[error("Opacity must be within 0..=1, got {0}")]
    InvalidOpacity(f64),
    #[error("Stroke width must be positive, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
