//! Mask rasterization and sub-array extraction for ROI collections.
//!
//! This crate is the numeric engine behind the ROI data model: it
//! converts a collection plus a data array into combined boolean masks
//! and extracted sub-arrays.

pub mod extract;
pub mod mask;

pub use extract::{extract_image, extract_signal};
pub use mask::{
    image_index_bounds, image_mask, image_mask_cells, segment_index_bounds, shape_mask_1d,
    shape_mask_2d, signal_mask, signal_mask_cells,
};
