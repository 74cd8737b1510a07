//! Persisted plain-value form of ROI collections.
//!
//! The plain form is the contract with the platform's serialization
//! layer: one entry per shape, tagged by the shape-kind discriminant and
//! carrying the flattened numeric parameters, plus the collection-level
//! single-object flag. Round trips preserve numeric values exactly.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryShape, ShapeKind};
use crate::roi::shape::RoiShape;

/// One persisted shape entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainEntry {
    /// Shape-kind discriminant tag (see [`ShapeKind::tag`]).
    pub kind: String,
    /// Flattened numeric parameters in dimensional order
    /// (see [`GeometryShape::coords`]).
    pub coords: Vec<f64>,
    /// True if `coords` are index units rather than physical units.
    pub indices: bool,
}

/// Persisted form of a whole ROI collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainRoi {
    pub entries: Vec<PlainEntry>,
    pub single_object: bool,
}

impl PlainEntry {
    pub(crate) fn from_shape(shape: &RoiShape) -> Self {
        Self {
            kind: shape.kind().tag().to_owned(),
            coords: shape.geometry().coords(),
            indices: shape.indices(),
        }
    }
}

/// Rebuild shapes from persisted entries, keeping only kinds accepted by
/// `accept`.
///
/// Construction errors are isolated per entry: an unrecognized tag or a
/// parameter list that does not match its kind skips that entry with a
/// warning and never fails the rest of the collection.
pub(crate) fn shapes_from_entries(
    entries: &[PlainEntry],
    accept: fn(ShapeKind) -> bool,
) -> Vec<RoiShape> {
    let mut shapes = Vec::with_capacity(entries.len());
    for entry in entries {
        let kind = match ShapeKind::from_tag(&entry.kind) {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("skipping persisted ROI entry: {err}");
                continue;
            }
        };
        if !accept(kind) {
            log::warn!(
                "skipping persisted ROI entry: {} not legal for this collection",
                kind.tag()
            );
            continue;
        }
        match GeometryShape::from_coords(kind, &entry.coords) {
            Ok(geometry) => shapes.push(RoiShape::new(geometry, entry.indices)),
            Err(err) => log::warn!("skipping persisted ROI entry: {err}"),
        }
    }
    shapes
}
