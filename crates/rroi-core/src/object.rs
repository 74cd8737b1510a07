//! Data objects: named signals and images carrying data plus ROI state.
//!
//! An object owns at most one ROI collection; absence means "no ROI
//! defined, the whole array is the region". The object also carries the
//! coordinate frame used to convert shape parameters between physical
//! and index units.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{Result, RoiError};
use crate::frame::{ImageFrame, SignalFrame};
use crate::roi::{ImageRoi, SignalRoi};

/// A named 1-D signal.
///
/// # Type Parameters
/// * `B` - The backend (CPU or GPU) for tensor operations
#[derive(Debug, Clone)]
pub struct SignalObj<B: Backend> {
    title: String,
    data: Option<Tensor<B, 1>>,
    frame: SignalFrame,
    integer_valued: bool,
    roi: Option<SignalRoi>,
}

impl<B: Backend> SignalObj<B> {
    /// Create a new signal object.
    pub fn new(title: impl Into<String>, data: Option<Tensor<B, 1>>, frame: SignalFrame) -> Self {
        Self {
            title: title.into(),
            data,
            frame,
            integer_valued: false,
            roi: None,
        }
    }

    /// Get the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the data tensor, if any.
    pub fn data(&self) -> Option<&Tensor<B, 1>> {
        self.data.as_ref()
    }

    /// Get the coordinate frame.
    pub fn frame(&self) -> &SignalFrame {
        &self.frame
    }

    /// Number of samples, failing when the object has no data.
    pub fn len(&self) -> Result<usize> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| RoiError::missing_data(format!("signal '{}' has no data", self.title)))?;
        Ok(data.dims()[0])
    }

    /// True when the object has no data array.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Mark the data as integer-valued. Extraction then fills excluded
    /// samples with 0 instead of NaN.
    pub fn set_integer_valued(&mut self, integer_valued: bool) {
        self.integer_valued = integer_valued;
    }

    /// True if the data is integer-valued.
    pub fn integer_valued(&self) -> bool {
        self.integer_valued
    }

    /// Fill value for samples excluded from an extracted region.
    pub fn fill_value(&self) -> f32 {
        if self.integer_valued {
            0.0
        } else {
            f32::NAN
        }
    }

    /// Get the ROI collection, if any.
    pub fn roi(&self) -> Option<&SignalRoi> {
        self.roi.as_ref()
    }

    /// Replace the ROI collection. `None` removes any restriction.
    pub fn set_roi(&mut self, roi: Option<SignalRoi>) {
        self.roi = roi;
    }
}

/// A named 2-D image, stored row-major as `[rows, cols]`.
///
/// # Type Parameters
/// * `B` - The backend (CPU or GPU) for tensor operations
#[derive(Debug, Clone)]
pub struct ImageObj<B: Backend> {
    title: String,
    data: Option<Tensor<B, 2>>,
    frame: ImageFrame,
    integer_valued: bool,
    roi: Option<ImageRoi>,
}

impl<B: Backend> ImageObj<B> {
    /// Create a new image object.
    pub fn new(title: impl Into<String>, data: Option<Tensor<B, 2>>, frame: ImageFrame) -> Self {
        Self {
            title: title.into(),
            data,
            frame,
            integer_valued: false,
            roi: None,
        }
    }

    /// Get the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the data tensor, if any.
    pub fn data(&self) -> Option<&Tensor<B, 2>> {
        self.data.as_ref()
    }

    /// Get the coordinate frame.
    pub fn frame(&self) -> &ImageFrame {
        &self.frame
    }

    /// Array shape as `[rows, cols]`, failing when the object has no data.
    pub fn shape(&self) -> Result<[usize; 2]> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| RoiError::missing_data(format!("image '{}' has no data", self.title)))?;
        Ok(data.dims())
    }

    /// True when the object has no data array.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Mark the data as integer-valued. Extraction then fills excluded
    /// pixels with 0 instead of NaN.
    pub fn set_integer_valued(&mut self, integer_valued: bool) {
        self.integer_valued = integer_valued;
    }

    /// True if the data is integer-valued.
    pub fn integer_valued(&self) -> bool {
        self.integer_valued
    }

    /// Fill value for pixels excluded from an extracted region.
    pub fn fill_value(&self) -> f32 {
        if self.integer_valued {
            0.0
        } else {
            f32::NAN
        }
    }

    /// Get the ROI collection, if any.
    pub fn roi(&self) -> Option<&ImageRoi> {
        self.roi.as_ref()
    }

    /// Replace the ROI collection. `None` removes any restriction.
    pub fn set_roi(&mut self, roi: Option<ImageRoi>) {
        self.roi = roi;
    }
}
