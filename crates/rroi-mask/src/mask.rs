//! Mask rasterization.
//!
//! A point belongs to a shape when its array-index center falls within
//! the continuous geometric region, boundary inclusive. Masks are built
//! CPU-side as `Vec<bool>` and wrapped into boolean tensors matching the
//! object's array shape.

use burn::tensor::backend::Backend;
use burn::tensor::{Bool, Shape, Tensor, TensorData};

use rroi_core::{
    GeometryShape, ImageFrame, ImageObj, ImageRoi, Result, RoiError, RoiShape, SignalFrame,
    SignalObj, SignalRoi,
};

/// Index bounds `(first, last)` of a segment shape over an array of `n`
/// samples, clipped to `[0, n-1]`. `None` when the shape lies entirely
/// outside the array.
pub fn segment_index_bounds(
    shape: &RoiShape,
    frame: &SignalFrame,
    n: usize,
) -> Option<(usize, usize)> {
    let (lo, hi) = shape.geometry().bounds_1d()?;
    let (a, b) = if shape.indices() {
        (lo, hi)
    } else {
        let a = frame.phys_to_index(lo);
        let b = frame.phys_to_index(hi);
        (a.min(b), a.max(b))
    };
    let first = (a.ceil() as i64).max(0);
    let last = (b.floor() as i64).min(n as i64 - 1);
    if first > last {
        return None;
    }
    Some((first as usize, last as usize))
}

/// Index bounds `((row0, col0), (row1, col1))` of a 2-D shape over a
/// `[rows, cols]` array, clipped per axis. `None` when the shape lies
/// entirely outside the array.
pub fn image_index_bounds(
    shape: &RoiShape,
    frame: &ImageFrame,
    dims: [usize; 2],
) -> Option<((usize, usize), (usize, usize))> {
    let [rows, cols] = dims;
    let (xmin, ymin, xmax, ymax) = shape.geometry().bounds_2d()?;
    let (c0, r0, c1, r1) = if shape.indices() {
        (xmin, ymin, xmax, ymax)
    } else {
        let (ca, ra) = frame.phys_to_index(xmin, ymin);
        let (cb, rb) = frame.phys_to_index(xmax, ymax);
        (ca.min(cb), ra.min(rb), ca.max(cb), ra.max(rb))
    };
    let col0 = (c0.ceil() as i64).max(0);
    let row0 = (r0.ceil() as i64).max(0);
    let col1 = (c1.floor() as i64).min(cols as i64 - 1);
    let row1 = (r1.floor() as i64).min(rows as i64 - 1);
    if col0 > col1 || row0 > row1 {
        return None;
    }
    Some(((row0 as usize, col0 as usize), (row1 as usize, col1 as usize)))
}

/// Rasterize a single segment shape into a length-`n` boolean vector.
pub fn shape_mask_1d(shape: &RoiShape, frame: &SignalFrame, n: usize) -> Result<Vec<bool>> {
    let mut cells = vec![false; n];
    or_shape_1d(&mut cells, shape, frame)?;
    Ok(cells)
}

/// Rasterize a single 2-D shape into a row-major `[rows, cols]` boolean
/// vector.
pub fn shape_mask_2d(shape: &RoiShape, frame: &ImageFrame, dims: [usize; 2]) -> Result<Vec<bool>> {
    let mut cells = vec![false; dims[0] * dims[1]];
    or_shape_2d(&mut cells, shape, frame, dims)?;
    Ok(cells)
}

pub(crate) fn or_shape_1d(cells: &mut [bool], shape: &RoiShape, frame: &SignalFrame) -> Result<()> {
    shape.geometry().validate_nondegenerate()?;
    if !shape.kind().is_signal_kind() {
        return Err(RoiError::unsupported_kind(format!(
            "{} cannot be rasterized over a signal",
            shape.kind().tag()
        )));
    }
    if let Some((first, last)) = segment_index_bounds(shape, frame, cells.len()) {
        for cell in &mut cells[first..=last] {
            *cell = true;
        }
    }
    Ok(())
}

pub(crate) fn or_shape_2d(
    cells: &mut [bool],
    shape: &RoiShape,
    frame: &ImageFrame,
    dims: [usize; 2],
) -> Result<()> {
    shape.geometry().validate_nondegenerate()?;
    if !shape.kind().is_image_kind() {
        return Err(RoiError::unsupported_kind(format!(
            "{} cannot be rasterized over an image",
            shape.kind().tag()
        )));
    }
    let cols = dims[1];
    let Some(((row0, col0), (row1, col1))) = image_index_bounds(shape, frame, dims) else {
        return Ok(());
    };
    // An axis-aligned rectangle covers its whole clipped bounding box.
    if matches!(shape.geometry(), GeometryShape::Rectangle { .. }) {
        for row in row0..=row1 {
            for cell in &mut cells[row * cols + col0..=row * cols + col1] {
                *cell = true;
            }
        }
        return Ok(());
    }
    for row in row0..=row1 {
        for col in col0..=col1 {
            let (qx, qy) = if shape.indices() {
                (col as f64, row as f64)
            } else {
                frame.index_to_phys(col as f64, row as f64)
            };
            if shape.geometry().contains(qx, qy) {
                cells[row * cols + col] = true;
            }
        }
    }
    Ok(())
}

/// Combined boolean mask of a signal collection as a `Vec<bool>`.
///
/// Logical OR over all shapes; an empty collection yields an all-true
/// mask ("ROI absent means whole array").
pub fn signal_mask_cells(roi: &SignalRoi, frame: &SignalFrame, n: usize) -> Result<Vec<bool>> {
    if roi.is_empty() {
        return Ok(vec![true; n]);
    }
    let mut cells = vec![false; n];
    for shape in roi.shapes() {
        or_shape_1d(&mut cells, shape, frame)?;
    }
    Ok(cells)
}

/// Combined boolean mask of an image collection as a row-major `Vec<bool>`.
///
/// Logical OR over all shapes; an empty collection yields an all-true
/// mask ("ROI absent means whole array").
pub fn image_mask_cells(roi: &ImageRoi, frame: &ImageFrame, dims: [usize; 2]) -> Result<Vec<bool>> {
    if roi.is_empty() {
        return Ok(vec![true; dims[0] * dims[1]]);
    }
    let mut cells = vec![false; dims[0] * dims[1]];
    for shape in roi.shapes() {
        or_shape_2d(&mut cells, shape, frame, dims)?;
    }
    Ok(cells)
}

/// Combined boolean mask of a signal object's ROI collection, sized to
/// its data array.
pub fn signal_mask<B: Backend>(roi: &SignalRoi, obj: &SignalObj<B>) -> Result<Tensor<B, 1, Bool>> {
    let data = obj
        .data()
        .ok_or_else(|| RoiError::missing_data(format!("signal '{}' has no data", obj.title())))?;
    let n = data.dims()[0];
    let cells = signal_mask_cells(roi, obj.frame(), n)?;
    Ok(Tensor::from_data(
        TensorData::new(cells, Shape::new([n])),
        &data.device(),
    ))
}

/// Combined boolean mask of an image object's ROI collection, sized to
/// its data array.
pub fn image_mask<B: Backend>(roi: &ImageRoi, obj: &ImageObj<B>) -> Result<Tensor<B, 2, Bool>> {
    let data = obj
        .data()
        .ok_or_else(|| RoiError::missing_data(format!("image '{}' has no data", obj.title())))?;
    let dims = data.dims();
    let cells = image_mask_cells(roi, obj.frame(), dims)?;
    Ok(Tensor::from_data(
        TensorData::new(cells, Shape::new(dims)),
        &data.device(),
    ))
}
