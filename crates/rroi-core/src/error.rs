//! Error types for ROI operations.
//!
//! This module provides structured error types for ROI construction,
//! mask rasterization and extraction workflows.

use thiserror::Error;

/// Main error type for ROI operations.
#[derive(Error, Debug)]
pub enum RoiError {
    /// A proxy handle or persisted entry names a shape kind with no mapping.
    ///
    /// Fatal to that single shape's construction only; callers recover by
    /// skipping the shape, never by discarding the whole collection.
    #[error("Unsupported shape kind: {0}")]
    UnsupportedShapeKind(String),

    /// Degenerate geometry passed to mask rasterization or extraction.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Operation requires a data array but the object has none.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Array shape mismatch.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Result type for ROI operations.
pub type Result<T> = std::result::Result<T, RoiError>;

impl RoiError {
    /// Create an unsupported-shape-kind error.
    pub fn unsupported_kind(msg: impl Into<String>) -> Self {
        Self::UnsupportedShapeKind(msg.into())
    }

    /// Create an invalid-geometry error.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Create a missing-data error.
    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }
}
