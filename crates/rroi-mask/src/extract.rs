//! Sub-array extraction.
//!
//! Extraction produces new data objects restricted to a collection's
//! shapes. With the single-object flag (or exactly one shape) the output
//! is one object cropped to the union of the shapes' index bounding
//! boxes, with points outside every shape set to the object's fill
//! value (NaN for float-valued data, 0 for integer-valued data).
//! Otherwise there is one output per shape, each cropped to its own
//! bounding box with its own mask applied.

use burn::tensor::backend::Backend;
use burn::tensor::{Shape, Tensor, TensorData};

use rroi_core::{ImageObj, Result, RoiError, SignalFrame, SignalObj};

use crate::mask::{
    image_index_bounds, image_mask_cells, or_shape_1d, or_shape_2d, segment_index_bounds,
    signal_mask_cells,
};

fn signal_data_vec<B: Backend>(obj: &SignalObj<B>) -> Result<Vec<f32>> {
    let data = obj
        .data()
        .ok_or_else(|| RoiError::missing_data(format!("signal '{}' has no data", obj.title())))?;
    Ok(data
        .to_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .expect("converted tensor data is f32"))
}

fn image_data_vec<B: Backend>(obj: &ImageObj<B>) -> Result<Vec<f32>> {
    let data = obj
        .data()
        .ok_or_else(|| RoiError::missing_data(format!("image '{}' has no data", obj.title())))?;
    Ok(data
        .to_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .expect("converted tensor data is f32"))
}

fn build_signal<B: Backend>(
    src: &SignalObj<B>,
    title: String,
    values: Vec<f32>,
    first: usize,
) -> SignalObj<B> {
    let device = src.data().expect("extraction source has data").device();
    let n = values.len();
    let frame = SignalFrame::new(src.frame().index_to_phys(first as f64), src.frame().dx());
    let data = Tensor::from_data(TensorData::new(values, Shape::new([n])), &device);
    let mut out = SignalObj::new(title, Some(data), frame);
    out.set_integer_valued(src.integer_valued());
    out
}

/// Extract the region(s) selected by a signal object's ROI collection.
///
/// An absent or empty collection means no restriction: the result is a
/// single copy of the whole signal.
pub fn extract_signal<B: Backend>(obj: &SignalObj<B>) -> Result<Vec<SignalObj<B>>> {
    let values = signal_data_vec(obj)?;
    let n = values.len();
    let frame = *obj.frame();
    let fill = obj.fill_value();

    let Some(roi) = obj.roi().filter(|roi| !roi.is_empty()) else {
        log::debug!("extracting '{}' without ROI restriction", obj.title());
        let mut out = obj.clone();
        out.set_roi(None);
        return Ok(vec![out]);
    };
    for shape in roi.shapes() {
        shape.geometry().validate_nondegenerate()?;
    }

    if roi.single_object() || roi.len() == 1 {
        let mut first = usize::MAX;
        let mut last = 0usize;
        for shape in roi.shapes() {
            if let Some((lo, hi)) = segment_index_bounds(shape, &frame, n) {
                first = first.min(lo);
                last = last.max(hi);
            }
        }
        if first > last {
            return Err(RoiError::invalid_geometry(
                "ROI does not intersect the signal",
            ));
        }
        let cells = signal_mask_cells(roi, &frame, n)?;
        let out: Vec<f32> = (first..=last)
            .map(|i| if cells[i] { values[i] } else { fill })
            .collect();
        return Ok(vec![build_signal(
            obj,
            format!("{}_roi", obj.title()),
            out,
            first,
        )]);
    }

    let mut results = Vec::with_capacity(roi.len());
    for (index, shape) in roi.shapes().iter().enumerate() {
        let Some((first, last)) = segment_index_bounds(shape, &frame, n) else {
            return Err(RoiError::invalid_geometry(format!(
                "ROI {index} does not intersect the signal"
            )));
        };
        let mut cells = vec![false; n];
        or_shape_1d(&mut cells, shape, &frame)?;
        let out: Vec<f32> = (first..=last)
            .map(|i| if cells[i] { values[i] } else { fill })
            .collect();
        results.push(build_signal(
            obj,
            format!("{}_roi{index:02}", obj.title()),
            out,
            first,
        ));
    }
    Ok(results)
}

fn build_image<B: Backend>(
    src: &ImageObj<B>,
    title: String,
    values: Vec<f32>,
    dims: [usize; 2],
    origin: (usize, usize),
) -> ImageObj<B> {
    let device = src.data().expect("extraction source has data").device();
    let (row0, col0) = origin;
    let frame = src.frame();
    let (x0, y0) = frame.index_to_phys(col0 as f64, row0 as f64);
    let out_frame = rroi_core::ImageFrame::new(x0, y0, frame.dx(), frame.dy());
    let data = Tensor::from_data(TensorData::new(values, Shape::new(dims)), &device);
    let mut out = ImageObj::new(title, Some(data), out_frame);
    out.set_integer_valued(src.integer_valued());
    out
}

fn crop_filled(
    values: &[f32],
    cells: &[bool],
    cols: usize,
    bounds: ((usize, usize), (usize, usize)),
    fill: f32,
) -> (Vec<f32>, [usize; 2]) {
    let ((row0, col0), (row1, col1)) = bounds;
    let out_rows = row1 - row0 + 1;
    let out_cols = col1 - col0 + 1;
    let mut out = Vec::with_capacity(out_rows * out_cols);
    for row in row0..=row1 {
        for col in col0..=col1 {
            let i = row * cols + col;
            out.push(if cells[i] { values[i] } else { fill });
        }
    }
    (out, [out_rows, out_cols])
}

/// Extract the region(s) selected by an image object's ROI collection.
///
/// An absent or empty collection means no restriction: the result is a
/// single copy of the whole image.
pub fn extract_image<B: Backend>(obj: &ImageObj<B>) -> Result<Vec<ImageObj<B>>> {
    let values = image_data_vec(obj)?;
    let dims = obj.shape()?;
    let cols = dims[1];
    let frame = *obj.frame();
    let fill = obj.fill_value();

    let Some(roi) = obj.roi().filter(|roi| !roi.is_empty()) else {
        log::debug!("extracting '{}' without ROI restriction", obj.title());
        let mut out = obj.clone();
        out.set_roi(None);
        return Ok(vec![out]);
    };
    for shape in roi.shapes() {
        shape.geometry().validate_nondegenerate()?;
    }

    if roi.single_object() || roi.len() == 1 {
        let mut union: Option<((usize, usize), (usize, usize))> = None;
        for shape in roi.shapes() {
            if let Some(((r0, c0), (r1, c1))) = image_index_bounds(shape, &frame, dims) {
                union = Some(match union {
                    None => ((r0, c0), (r1, c1)),
                    Some(((ur0, uc0), (ur1, uc1))) => (
                        (ur0.min(r0), uc0.min(c0)),
                        (ur1.max(r1), uc1.max(c1)),
                    ),
                });
            }
        }
        let Some(bounds) = union else {
            return Err(RoiError::invalid_geometry(
                "ROI does not intersect the image",
            ));
        };
        let cells = image_mask_cells(roi, &frame, dims)?;
        let (out, out_dims) = crop_filled(&values, &cells, cols, bounds, fill);
        return Ok(vec![build_image(
            obj,
            format!("{}_roi", obj.title()),
            out,
            out_dims,
            bounds.0,
        )]);
    }

    let mut results = Vec::with_capacity(roi.len());
    for (index, shape) in roi.shapes().iter().enumerate() {
        let Some(bounds) = image_index_bounds(shape, &frame, dims) else {
            return Err(RoiError::invalid_geometry(format!(
                "ROI {index} does not intersect the image"
            )));
        };
        let mut cells = vec![false; dims[0] * dims[1]];
        or_shape_2d(&mut cells, shape, &frame, dims)?;
        let (out, out_dims) = crop_filled(&values, &cells, cols, bounds, fill);
        results.push(build_image(
            obj,
            format!("{}_roi{index:02}", obj.title()),
            out,
            out_dims,
            bounds.0,
        ));
    }
    Ok(results)
}
