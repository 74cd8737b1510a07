use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use nalgebra::Point2;

use rroi_core::{
    GeometryShape, ImageFrame, ImageObj, ImageRoi, RoiError, RoiShape, SignalFrame, SignalObj,
    SignalRoi,
};
use rroi_mask::{extract_image, extract_signal, image_mask, signal_mask};

type Backend = NdArray<f32>;

fn ramp_image(rows: usize, cols: usize) -> ImageObj<Backend> {
    let device = Default::default();
    let values: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
    let data = Tensor::<Backend, 1>::from_floats(values.as_slice(), &device).reshape([rows, cols]);
    ImageObj::new("img", Some(data), ImageFrame::default())
}

fn ramp_signal(n: usize) -> SignalObj<Backend> {
    let device = Default::default();
    let values: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let data = Tensor::<Backend, 1>::from_floats(values.as_slice(), &device);
    SignalObj::new("sig", Some(data), SignalFrame::default())
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> RoiShape {
    RoiShape::new(GeometryShape::Rectangle { x0, y0, x1, y1 }, true)
}

#[test]
fn test_empty_collection_mask_is_all_true() {
    let obj = ramp_image(3, 4);
    let mask = image_mask(&ImageRoi::new(), &obj).unwrap();
    let cells = mask.into_data().to_vec::<bool>().unwrap();
    assert_eq!(cells, vec![true; 12]);

    let sig = ramp_signal(5);
    let mask = signal_mask(&SignalRoi::new(), &sig).unwrap();
    assert_eq!(mask.into_data().to_vec::<bool>().unwrap(), vec![true; 5]);
}

#[test]
fn test_mask_requires_data() {
    let obj = ImageObj::<Backend>::new("empty", None, ImageFrame::default());
    assert!(matches!(
        image_mask(&ImageRoi::new(), &obj),
        Err(RoiError::MissingData(_))
    ));
    assert!(matches!(
        extract_image(&obj),
        Err(RoiError::MissingData(_))
    ));
}

#[test]
fn test_single_object_extraction_unions_disjoint_rectangles() {
    let mut obj = ramp_image(6, 8);
    let mut roi = ImageRoi::new();
    roi.add_roi(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    roi.add_roi(rect(5.0, 4.0, 7.0, 5.0)).unwrap();
    roi.set_single_object(true);
    obj.set_roi(Some(roi));

    let results = extract_image(&obj).unwrap();
    assert_eq!(results.len(), 1);
    let out = &results[0];
    assert_eq!(out.title(), "img_roi");
    // Union bounding box: rows 0..=5, cols 0..=7 -> the whole array here.
    assert_eq!(out.shape().unwrap(), [6, 8]);

    let values = out.data().unwrap().to_data().to_vec::<f32>().unwrap();
    // Inside the first rectangle: original values.
    assert_eq!(values[0], 0.0);
    assert_eq!(values[1 * 8 + 1], 9.0);
    // Inside the second rectangle.
    assert_eq!(values[4 * 8 + 5], 37.0);
    assert_eq!(values[5 * 8 + 7], 47.0);
    // Between the rectangles: fill (NaN for float data).
    assert!(values[3 * 8 + 3].is_nan());
    assert!(values[2].is_nan());
    // Non-fill region is exactly the union of the two rectangles.
    let non_fill = values.iter().filter(|v| !v.is_nan()).count();
    assert_eq!(non_fill, 2 * 2 + 3 * 2);
}

#[test]
fn test_multi_object_extraction_returns_one_array_per_shape() {
    let mut obj = ramp_image(6, 8);
    let mut roi = ImageRoi::new();
    roi.add_roi(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    roi.add_roi(rect(5.0, 4.0, 7.0, 5.0)).unwrap();
    roi.set_single_object(false);
    obj.set_roi(Some(roi));

    let results = extract_image(&obj).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title(), "img_roi00");
    assert_eq!(results[1].title(), "img_roi01");
    assert_eq!(results[0].shape().unwrap(), [2, 2]);
    assert_eq!(results[1].shape().unwrap(), [2, 3]);

    let first = results[0].data().unwrap().to_data().to_vec::<f32>().unwrap();
    assert_eq!(first, vec![0.0, 1.0, 8.0, 9.0]);
    let second = results[1].data().unwrap().to_data().to_vec::<f32>().unwrap();
    assert_eq!(second, vec![37.0, 38.0, 39.0, 45.0, 46.0, 47.0]);
}

#[test]
fn test_circle_extraction_fills_corners() {
    let mut obj = ramp_image(7, 7);
    let mut roi = ImageRoi::new();
    roi.add_roi(RoiShape::new(
        GeometryShape::Circle {
            xc: 3.0,
            yc: 3.0,
            r: 2.0,
        },
        true,
    ))
    .unwrap();
    obj.set_roi(Some(roi));

    let results = extract_image(&obj).unwrap();
    assert_eq!(results.len(), 1);
    let out = &results[0];
    assert_eq!(out.shape().unwrap(), [5, 5]);
    let values = out.data().unwrap().to_data().to_vec::<f32>().unwrap();
    // Bounding-box corners are outside the disk.
    assert!(values[0].is_nan());
    assert!(values[4].is_nan());
    assert!(values[24].is_nan());
    // Center keeps the original value (row 3, col 3 of the source).
    assert_eq!(values[2 * 5 + 2], (3 * 7 + 3) as f32);
}

#[test]
fn test_integer_valued_fill_is_zero() {
    let mut obj = ramp_image(5, 5);
    obj.set_integer_valued(true);
    let mut roi = ImageRoi::new();
    roi.add_roi(RoiShape::new(
        GeometryShape::Circle {
            xc: 2.0,
            yc: 2.0,
            r: 2.0,
        },
        true,
    ))
    .unwrap();
    obj.set_roi(Some(roi));

    let results = extract_image(&obj).unwrap();
    let values = results[0].data().unwrap().to_data().to_vec::<f32>().unwrap();
    assert_eq!(values[0], 0.0);
    assert!(values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_degenerate_polygon_fails_extraction() {
    let mut obj = ramp_image(5, 5);
    let mut roi = ImageRoi::new();
    roi.add_roi(RoiShape::new(
        GeometryShape::Polygon {
            points: vec![Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)],
        },
        true,
    ))
    .unwrap();
    obj.set_roi(Some(roi.clone()));
    assert!(matches!(
        extract_image(&obj),
        Err(RoiError::InvalidGeometry(_))
    ));
    assert!(matches!(
        image_mask(&roi, &obj),
        Err(RoiError::InvalidGeometry(_))
    ));
}

#[test]
fn test_signal_extraction_shifts_frame() {
    let device = Default::default();
    let values: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let data = Tensor::<Backend, 1>::from_floats(values.as_slice(), &device);
    let mut obj = SignalObj::new("sig", Some(data), SignalFrame::new(100.0, 2.0));

    let mut roi = SignalRoi::new();
    // Physical interval [106, 112] covers samples 3..=6.
    roi.add_roi(RoiShape::new(
        GeometryShape::Segment {
            x0: 106.0,
            x1: 112.0,
        },
        false,
    ))
    .unwrap();
    obj.set_roi(Some(roi));

    let results = extract_signal(&obj).unwrap();
    assert_eq!(results.len(), 1);
    let out = &results[0];
    assert_eq!(out.title(), "sig_roi");
    assert_eq!(out.len().unwrap(), 4);
    assert_eq!(out.frame().x0(), 106.0);
    assert_eq!(out.frame().dx(), 2.0);
    let out_values = out.data().unwrap().to_data().to_vec::<f32>().unwrap();
    assert_eq!(out_values, vec![3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_extraction_without_roi_copies_whole_array() {
    let obj = ramp_signal(4);
    let results = extract_signal(&obj).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].len().unwrap(), 4);
    let out_values = results[0]
        .data()
        .unwrap()
        .to_data()
        .to_vec::<f32>()
        .unwrap();
    assert_eq!(out_values, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_two_segments_per_shape_extraction() {
    let mut obj = ramp_signal(8);
    let mut roi = SignalRoi::new();
    roi.add_roi(RoiShape::new(GeometryShape::Segment { x0: 1.0, x1: 2.0 }, true))
        .unwrap();
    roi.add_roi(RoiShape::new(GeometryShape::Segment { x0: 5.0, x1: 7.0 }, true))
        .unwrap();
    obj.set_roi(Some(roi));

    let results = extract_signal(&obj).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title(), "sig_roi00");
    assert_eq!(
        results[0].data().unwrap().to_data().to_vec::<f32>().unwrap(),
        vec![1.0, 2.0]
    );
    assert_eq!(
        results[1].data().unwrap().to_data().to_vec::<f32>().unwrap(),
        vec![5.0, 6.0, 7.0]
    );
    assert_eq!(results[1].frame().x0(), 5.0);
}
