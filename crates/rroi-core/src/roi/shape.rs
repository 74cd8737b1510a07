//! Single named ROI shape.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::{ImageFrame, SignalFrame};
use crate::geometry::{GeometryShape, ShapeKind};

/// Format the display title of the ROI at `index` in a collection.
///
/// Titles are derived from the shape's current position and are not
/// stable identifiers: they shift when shapes are reordered or removed.
pub fn roi_title(index: usize) -> String {
    format!("ROI{index:02}")
}

/// A single ROI: one geometry primitive plus its coordinate-system marker.
///
/// Immutable once constructed; edits produce a new `RoiShape`. `indices`
/// records whether the geometry is parameterized in integer index units
/// or in physical data units. `ready` distinguishes user-provided
/// coordinates from the default template coordinates of an interactive
/// add-ROI tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiShape {
    geometry: GeometryShape,
    indices: bool,
    ready: bool,
}

impl RoiShape {
    /// Create a ROI shape from user-provided coordinates.
    pub fn new(geometry: GeometryShape, indices: bool) -> Self {
        Self {
            geometry,
            indices,
            ready: true,
        }
    }

    /// Create a ROI shape with default template coordinates (not yet
    /// edited by the user).
    pub fn template(geometry: GeometryShape, indices: bool) -> Self {
        Self {
            geometry,
            indices,
            ready: false,
        }
    }

    /// Get the wrapped geometry.
    pub fn geometry(&self) -> &GeometryShape {
        &self.geometry
    }

    /// True if the geometry is parameterized in index units.
    pub fn indices(&self) -> bool {
        self.indices
    }

    /// True if the coordinates were provided by the user rather than a
    /// tool template.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Get the shape kind discriminant.
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Check the geometry's value invariants.
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()
    }

    /// Return this shape parameterized in index units for a signal frame.
    pub fn to_signal_indices(&self, frame: &SignalFrame) -> Result<Self> {
        if self.indices {
            return Ok(self.clone());
        }
        Ok(Self {
            geometry: self.geometry.to_signal_indices(frame)?,
            indices: true,
            ready: self.ready,
        })
    }

    /// Return this shape parameterized in physical units for a signal frame.
    pub fn to_signal_physical(&self, frame: &SignalFrame) -> Result<Self> {
        if !self.indices {
            return Ok(self.clone());
        }
        Ok(Self {
            geometry: self.geometry.to_signal_physical(frame)?,
            indices: false,
            ready: self.ready,
        })
    }

    /// Return this shape parameterized in index units for an image frame.
    pub fn to_image_indices(&self, frame: &ImageFrame) -> Result<Self> {
        if self.indices {
            return Ok(self.clone());
        }
        Ok(Self {
            geometry: self.geometry.to_image_indices(frame)?,
            indices: true,
            ready: self.ready,
        })
    }

    /// Return this shape parameterized in physical units for an image frame.
    pub fn to_image_physical(&self, frame: &ImageFrame) -> Result<Self> {
        if !self.indices {
            return Ok(self.clone());
        }
        Ok(Self {
            geometry: self.geometry.to_image_physical(frame)?,
            indices: false,
            ready: self.ready,
        })
    }
}
