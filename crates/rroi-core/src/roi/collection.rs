//! Ordered ROI collections attached to one data object.
//!
//! A signal collection holds only segments; an image collection holds
//! rectangles, circles and polygons. Shape order is significant: it
//! drives display titles (`ROI00`, `ROI01`, ...) and extraction output
//! order.

use serde::Serialize;

use crate::error::{Result, RoiError};
use crate::frame::{ImageFrame, SignalFrame};
use crate::geometry::{GeometryShape, ShapeKind};
use crate::roi::plain::{shapes_from_entries, PlainEntry, PlainRoi};
use crate::roi::shape::{roi_title, RoiShape};

/// Construction parameters for one shape's visual proxy.
///
/// This is everything an external visual layer needs to build and label
/// an interactive item for a shape; the core never renders.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiItemSpec {
    /// Geometry in physical coordinates.
    pub geometry: GeometryShape,
    /// Display title, derived from the shape's current position.
    pub title: String,
    /// Whether the visual item should accept user edits.
    pub editable: bool,
    /// Whether the visual item should display its label.
    pub show_label: bool,
}

/// ROI collection of a 1-D signal (segments only).
///
/// Collections serialize but do not derive `Deserialize`: loading goes
/// through [`SignalRoi::from_plain`], which enforces the kind invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalRoi {
    shapes: Vec<RoiShape>,
    single_object: bool,
}

/// ROI collection of a 2-D image (rectangles, circles, polygons).
///
/// Collections serialize but do not derive `Deserialize`: loading goes
/// through [`ImageRoi::from_plain`], which enforces the kind invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageRoi {
    shapes: Vec<RoiShape>,
    single_object: bool,
}

impl SignalRoi {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Only segment shapes are legal.
    pub fn add_roi(&mut self, shape: RoiShape) -> Result<()> {
        if !shape.kind().is_signal_kind() {
            return Err(RoiError::unsupported_kind(format!(
                "{} is not legal in a signal ROI collection",
                shape.kind().tag()
            )));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove every shape. Idempotent.
    pub fn remove_all(&mut self) {
        self.shapes.clear();
    }

    /// True iff the collection has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Shapes in stored order.
    pub fn shapes(&self) -> &[RoiShape] {
        &self.shapes
    }

    /// Whether extraction merges all shapes into a single output.
    pub fn single_object(&self) -> bool {
        self.single_object
    }

    /// Set the single-object extraction flag.
    pub fn set_single_object(&mut self, single_object: bool) {
        self.single_object = single_object;
    }

    /// Iterate proxy-construction parameters for every shape, in stored
    /// order, with geometry converted to physical coordinates.
    ///
    /// The iterator re-derives from current state each time it is created;
    /// titles reflect positions at iteration time.
    pub fn iter_item_specs<'a>(
        &'a self,
        frame: &'a SignalFrame,
        editable: bool,
        show_label: bool,
    ) -> impl Iterator<Item = RoiItemSpec> + 'a {
        self.shapes.iter().enumerate().map(move |(index, shape)| {
            let physical = shape
                .to_signal_physical(frame)
                .expect("signal collections hold only segments");
            RoiItemSpec {
                geometry: physical.geometry().clone(),
                title: roi_title(index),
                editable,
                show_label,
            }
        })
    }

    /// Serialize to the persisted plain form.
    pub fn to_plain(&self) -> PlainRoi {
        PlainRoi {
            entries: self.shapes.iter().map(PlainEntry::from_shape).collect(),
            single_object: self.single_object,
        }
    }

    /// Deserialize from the persisted plain form. Invalid entries are
    /// skipped individually.
    pub fn from_plain(plain: &PlainRoi) -> Self {
        Self {
            shapes: shapes_from_entries(&plain.entries, ShapeKind::is_signal_kind),
            single_object: plain.single_object,
        }
    }
}

impl ImageRoi {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Rectangle, circle and polygon shapes are legal.
    pub fn add_roi(&mut self, shape: RoiShape) -> Result<()> {
        if !shape.kind().is_image_kind() {
            return Err(RoiError::unsupported_kind(format!(
                "{} is not legal in an image ROI collection",
                shape.kind().tag()
            )));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove every shape. Idempotent.
    pub fn remove_all(&mut self) {
        self.shapes.clear();
    }

    /// True iff the collection has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Shapes in stored order.
    pub fn shapes(&self) -> &[RoiShape] {
        &self.shapes
    }

    /// Whether extraction merges all shapes into a single output.
    pub fn single_object(&self) -> bool {
        self.single_object
    }

    /// Set the single-object extraction flag.
    pub fn set_single_object(&mut self, single_object: bool) {
        self.single_object = single_object;
    }

    /// Iterate proxy-construction parameters for every shape, in stored
    /// order, with geometry converted to physical coordinates.
    ///
    /// The iterator re-derives from current state each time it is created;
    /// titles reflect positions at iteration time.
    pub fn iter_item_specs<'a>(
        &'a self,
        frame: &'a ImageFrame,
        editable: bool,
        show_label: bool,
    ) -> impl Iterator<Item = RoiItemSpec> + 'a {
        self.shapes.iter().enumerate().map(move |(index, shape)| {
            let physical = shape
                .to_image_physical(frame)
                .expect("image collections hold only 2-D shapes");
            RoiItemSpec {
                geometry: physical.geometry().clone(),
                title: roi_title(index),
                editable,
                show_label,
            }
        })
    }

    /// Serialize to the persisted plain form.
    pub fn to_plain(&self) -> PlainRoi {
        PlainRoi {
            entries: self.shapes.iter().map(PlainEntry::from_shape).collect(),
            single_object: self.single_object,
        }
    }

    /// Deserialize from the persisted plain form. Invalid entries are
    /// skipped individually.
    pub fn from_plain(plain: &PlainRoi) -> Self {
        Self {
            shapes: shapes_from_entries(&plain.entries, ShapeKind::is_image_kind),
            single_object: plain.single_object,
        }
    }
}
