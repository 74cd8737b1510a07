//! Geometry primitives for ROI shapes.
//!
//! One closed tagged variant covers every supported shape kind; all
//! per-kind behavior (validation, containment, bounds, coordinate
//! conversion) dispatches by pattern matching on it.

pub mod polygon;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};
use crate::frame::{ImageFrame, SignalFrame};

/// Discriminant for the supported shape kinds.
///
/// The string tags are the stable discriminants of the persisted plain
/// form and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Segment,
    Rectangle,
    Circle,
    Polygon,
}

impl ShapeKind {
    /// Get the persisted discriminant tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
        }
    }

    /// Parse a persisted discriminant tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "segment" => Ok(Self::Segment),
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "polygon" => Ok(Self::Polygon),
            other => Err(RoiError::unsupported_kind(other)),
        }
    }

    /// True for kinds legal in a 1-D (signal) collection.
    pub fn is_signal_kind(self) -> bool {
        matches!(self, Self::Segment)
    }

    /// True for kinds legal in a 2-D (image) collection.
    pub fn is_image_kind(self) -> bool {
        !self.is_signal_kind()
    }
}

/// A geometric region, parameterized in either physical or index
/// coordinates (the owning [`RoiShape`](crate::roi::RoiShape) records
/// which).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryShape {
    /// 1-D interval `[x0, x1]`.
    Segment { x0: f64, x1: f64 },
    /// Axis-aligned box with corners `(x0, y0)` and `(x1, y1)`.
    Rectangle { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Circle of radius `r` centered at `(xc, yc)`.
    Circle { xc: f64, yc: f64, r: f64 },
    /// Closed polygon (last vertex connects to the first implicitly).
    /// At least 3 points once committed.
    Polygon { points: Vec<Point2<f64>> },
}

impl GeometryShape {
    /// Get the shape kind discriminant.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Segment { .. } => ShapeKind::Segment,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Default segment for the interactive "add ROI" tool.
    pub fn segment_template() -> Self {
        Self::Segment { x0: 0.0, x1: 1.0 }
    }

    /// Default rectangle for the interactive "add ROI" tool.
    pub fn rectangle_template() -> Self {
        Self::Rectangle {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
        }
    }

    /// Default circle for the interactive "add ROI" tool.
    pub fn circle_template() -> Self {
        Self::Circle {
            xc: 0.0,
            yc: 0.0,
            r: 1.0,
        }
    }

    /// Default unit-square polygon for the interactive "add ROI" tool.
    pub fn polygon_template() -> Self {
        Self::Polygon {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        }
    }

    /// Flatten the numeric parameters in dimensional order.
    ///
    /// Segment: `[x0, x1]`; rectangle: `[x0, y0, x1, y1]`; circle:
    /// `[xc, yc, r]`; polygon: `[x0, y0, x1, y1, ...]`. This is the
    /// coordinate layout of the persisted plain form.
    pub fn coords(&self) -> Vec<f64> {
        match self {
            Self::Segment { x0, x1 } => vec![*x0, *x1],
            Self::Rectangle { x0, y0, x1, y1 } => vec![*x0, *y0, *x1, *y1],
            Self::Circle { xc, yc, r } => vec![*xc, *yc, *r],
            Self::Polygon { points } => {
                points.iter().flat_map(|p| [p.x, p.y]).collect()
            }
        }
    }

    /// Rebuild a shape from its kind and flattened parameters.
    pub fn from_coords(kind: ShapeKind, coords: &[f64]) -> Result<Self> {
        let shape = match (kind, coords) {
            (ShapeKind::Segment, &[x0, x1]) => Self::Segment { x0, x1 },
            (ShapeKind::Rectangle, &[x0, y0, x1, y1]) => Self::Rectangle { x0, y0, x1, y1 },
            (ShapeKind::Circle, &[xc, yc, r]) => Self::Circle { xc, yc, r },
            (ShapeKind::Polygon, pts) if pts.len() >= 6 && pts.len() % 2 == 0 => {
                Self::Polygon {
                    points: pts.chunks_exact(2).map(|c| Point2::new(c[0], c[1])).collect(),
                }
            }
            _ => {
                return Err(RoiError::invalid_geometry(format!(
                    "{} parameters do not match a {} shape",
                    coords.len(),
                    kind.tag()
                )))
            }
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check the value invariants: finite fields, non-negative radius,
    /// at least 3 polygon points.
    pub fn validate(&self) -> Result<()> {
        if self.coords().iter().any(|v| !v.is_finite()) {
            return Err(RoiError::invalid_geometry(format!(
                "{} has non-finite coordinates",
                self.kind().tag()
            )));
        }
        match self {
            Self::Circle { r, .. } if *r < 0.0 => {
                Err(RoiError::invalid_geometry("circle has negative radius"))
            }
            Self::Polygon { points } if points.len() < 3 => Err(RoiError::invalid_geometry(
                format!("polygon has {} points, needs at least 3", points.len()),
            )),
            _ => Ok(()),
        }
    }

    /// Check that the shape can be rasterized to a non-empty region:
    /// [`validate`](Self::validate) plus a positive area/radius.
    pub fn validate_nondegenerate(&self) -> Result<()> {
        self.validate()?;
        match self {
            Self::Rectangle { x0, y0, x1, y1 } if x0 == x1 || y0 == y1 => {
                Err(RoiError::invalid_geometry("rectangle has zero area"))
            }
            Self::Circle { r, .. } if *r == 0.0 => {
                Err(RoiError::invalid_geometry("circle has zero radius"))
            }
            _ => Ok(()),
        }
    }

    /// Test whether the 1-D coordinate `x` lies in the shape (boundary
    /// inclusive). Always false for 2-D kinds.
    pub fn contains_1d(&self, x: f64) -> bool {
        match self {
            Self::Segment { x0, x1 } => {
                let (lo, hi) = (x0.min(*x1), x0.max(*x1));
                lo <= x && x <= hi
            }
            _ => false,
        }
    }

    /// Test whether the 2-D point `(x, y)` lies in the shape (boundary
    /// inclusive; polygons use the nonzero winding-number rule). Always
    /// false for the 1-D segment kind.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Segment { .. } => false,
            Self::Rectangle { x0, y0, x1, y1 } => {
                let (xlo, xhi) = (x0.min(*x1), x0.max(*x1));
                let (ylo, yhi) = (y0.min(*y1), y0.max(*y1));
                xlo <= x && x <= xhi && ylo <= y && y <= yhi
            }
            Self::Circle { xc, yc, r } => {
                let dx = x - xc;
                let dy = y - yc;
                dx * dx + dy * dy <= r * r
            }
            Self::Polygon { points } => polygon::contains(points, x, y),
        }
    }

    /// Continuous 1-D bounds `(min, max)`. `None` for 2-D kinds.
    pub fn bounds_1d(&self) -> Option<(f64, f64)> {
        match self {
            Self::Segment { x0, x1 } => Some((x0.min(*x1), x0.max(*x1))),
            _ => None,
        }
    }

    /// Continuous 2-D bounds `(xmin, ymin, xmax, ymax)`. `None` for the
    /// segment kind and for empty polygons.
    pub fn bounds_2d(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Self::Segment { .. } => None,
            Self::Rectangle { x0, y0, x1, y1 } => {
                Some((x0.min(*x1), y0.min(*y1), x0.max(*x1), y0.max(*y1)))
            }
            Self::Circle { xc, yc, r } => Some((xc - r, yc - r, xc + r, yc + r)),
            Self::Polygon { points } => polygon::bounds(points),
        }
    }

    /// Convert a segment from physical to integer index coordinates
    /// (nearest index, ties-to-even).
    pub fn to_signal_indices(&self, frame: &SignalFrame) -> Result<Self> {
        match self {
            Self::Segment { x0, x1 } => Ok(Self::Segment {
                x0: frame.phys_to_index(*x0).round_ties_even(),
                x1: frame.phys_to_index(*x1).round_ties_even(),
            }),
            other => Err(RoiError::unsupported_kind(format!(
                "{} is not a signal shape",
                other.kind().tag()
            ))),
        }
    }

    /// Convert a segment from index to physical coordinates.
    pub fn to_signal_physical(&self, frame: &SignalFrame) -> Result<Self> {
        match self {
            Self::Segment { x0, x1 } => Ok(Self::Segment {
                x0: frame.index_to_phys(*x0),
                x1: frame.index_to_phys(*x1),
            }),
            other => Err(RoiError::unsupported_kind(format!(
                "{} is not a signal shape",
                other.kind().tag()
            ))),
        }
    }

    /// Convert a 2-D shape from physical to integer index coordinates
    /// (nearest index, ties-to-even). The circle radius converts through
    /// the x step.
    pub fn to_image_indices(&self, frame: &ImageFrame) -> Result<Self> {
        let round = |x: f64, y: f64| {
            let (c, r) = frame.phys_to_index(x, y);
            (c.round_ties_even(), r.round_ties_even())
        };
        match self {
            Self::Segment { .. } => Err(RoiError::unsupported_kind(
                "segment is not an image shape",
            )),
            Self::Rectangle { x0, y0, x1, y1 } => {
                let (c0, r0) = round(*x0, *y0);
                let (c1, r1) = round(*x1, *y1);
                Ok(Self::Rectangle {
                    x0: c0,
                    y0: r0,
                    x1: c1,
                    y1: r1,
                })
            }
            Self::Circle { xc, yc, r } => {
                let (cc, rc) = round(*xc, *yc);
                Ok(Self::Circle {
                    xc: cc,
                    yc: rc,
                    r: (r / frame.dx().abs()).round_ties_even(),
                })
            }
            Self::Polygon { points } => Ok(Self::Polygon {
                points: points
                    .iter()
                    .map(|p| {
                        let (c, r) = round(p.x, p.y);
                        Point2::new(c, r)
                    })
                    .collect(),
            }),
        }
    }

    /// Convert a 2-D shape from index to physical coordinates.
    pub fn to_image_physical(&self, frame: &ImageFrame) -> Result<Self> {
        match self {
            Self::Segment { .. } => Err(RoiError::unsupported_kind(
                "segment is not an image shape",
            )),
            Self::Rectangle { x0, y0, x1, y1 } => {
                let (px0, py0) = frame.index_to_phys(*x0, *y0);
                let (px1, py1) = frame.index_to_phys(*x1, *y1);
                Ok(Self::Rectangle {
                    x0: px0,
                    y0: py0,
                    x1: px1,
                    y1: py1,
                })
            }
            Self::Circle { xc, yc, r } => {
                let (px, py) = frame.index_to_phys(*xc, *yc);
                Ok(Self::Circle {
                    xc: px,
                    yc: py,
                    r: r * frame.dx().abs(),
                })
            }
            Self::Polygon { points } => Ok(Self::Polygon {
                points: points
                    .iter()
                    .map(|p| {
                        let (px, py) = frame.index_to_phys(p.x, p.y);
                        Point2::new(px, py)
                    })
                    .collect(),
            }),
        }
    }
}
