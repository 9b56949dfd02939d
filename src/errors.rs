// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the depth dataset tools

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Caller broke an input contract (shapes, ranges)
    Precondition(PreconditionError),
    /// A frame record could not be parsed
    Record(RecordError),
    /// Raster decoding or encoding failed
    Image(String),
    /// Point cloud export failed
    Export(String),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
}

/// Input contract violations, never recovered silently
#[derive(Debug, Clone, PartialEq)]
pub enum PreconditionError {
    /// Two grids that must share a shape do not
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Grid sample buffer does not hold width * height entries
    BufferLength { expected: usize, actual: usize },
    /// Normalizing encodings need a strictly positive bound
    NonPositiveMaxDistance(f64),
    /// Normalizing encodings cannot place NaN on the scale
    NonFiniteDistance(f64),
}

/// Malformed frame records
#[derive(Debug, Clone)]
pub enum RecordError {
    /// Document is not valid JSON or does not match the record layout
    Json(String),
    /// Field present but unusable
    InvalidValue { field: &'static str, reason: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Precondition(e) => write!(f, "Precondition violated: {}", e),
            AppError::Record(e) => write!(f, "Malformed record: {}", e),
            AppError::Image(msg) => write!(f, "Image error: {}", msg),
            AppError::Export(msg) => write!(f, "Export error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{} is {}x{}, expected {}x{}",
                what, actual.0, actual.1, expected.0, expected.1
            ),
            PreconditionError::BufferLength { expected, actual } => write!(
                f,
                "sample buffer holds {} values, expected {}",
                actual, expected
            ),
            PreconditionError::NonPositiveMaxDistance(max) => {
                write!(f, "max distance must be positive, got {}", max)
            }
            PreconditionError::NonFiniteDistance(d) => {
                write!(f, "distance {} cannot be normalized", d)
            }
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Json(msg) => write!(f, "{}", msg),
            RecordError::InvalidValue { field, reason } => {
                write!(f, "invalid value for `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PreconditionError {}
impl std::error::Error for RecordError {}

impl From<PreconditionError> for AppError {
    fn from(err: PreconditionError) -> Self {
        AppError::Precondition(err)
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        AppError::Record(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Json(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Record(err.into())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Image(err.to_string())
    }
}

impl From<las::Error> for AppError {
    fn from(err: las::Error) -> Self {
        AppError::Export(err.to_string())
    }
}
