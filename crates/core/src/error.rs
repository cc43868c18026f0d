//! Error types for stroll configuration.
//!
//! The motion core itself never fails: degenerate geometry collapses to a
//! centered, motionless image. Errors only arise when building a controller
//! from external configuration.

use thiserror::Error;

/// Errors produced while validating or loading stroll configuration.
#[derive(Debug, Error)]
pub enum StrollError {
    /// A viewport or image size had a negative or non-finite side.
    #[error("invalid dimensions: {width}x{height} (sides must be finite and non-negative)")]
    InvalidDimensions { width: f64, height: f64 },

    /// A numeric setting was NaN or infinite.
    #[error("non-finite value for '{field}': {value}")]
    NonFinite { field: String, value: f64 },

    /// A requested strategy name is not registered.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Writing a trace or reading a config file failed.
    #[error("I/O error: {0}")]
    Io(String),
}
