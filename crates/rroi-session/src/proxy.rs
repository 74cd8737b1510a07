//! Visual-proxy contract.
//!
//! The session layer never talks to a plotting toolkit directly. A GUI
//! wraps each interactive plot item in a [`RoiProxyItem`] handle; the
//! session reads coordinates back through the per-kind getters and
//! pushes display metadata (titles, editability) through the setters.

use nalgebra::Point2;

use rroi_core::{GeometryShape, Result, RoiError, RoiShape};

/// Kind tag reported by a visual proxy handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Horizontal range selection on a signal plot.
    XRange,
    /// Axis-aligned rectangle on an image plot.
    Rectangle,
    /// Circle on an image plot.
    Circle,
    /// Closed polygon on an image plot.
    Polygon,
    /// Anything else present on the plot; ignored by the sessions.
    Other,
}

/// Capability trait implemented by GUI item wrappers.
///
/// The coordinate getters default to `UnsupportedShapeKind` so an
/// implementation only provides the one matching its kind.
pub trait RoiProxyItem {
    /// Kind of shape the handle wraps.
    fn kind(&self) -> ProxyKind;

    /// Physical x-range of an `XRange` item.
    fn range(&self) -> Result<(f64, f64)> {
        Err(RoiError::unsupported_kind("item has no x-range"))
    }

    /// Index-based corner coordinates of a `Rectangle` item.
    fn rect(&self) -> Result<(f64, f64, f64, f64)> {
        Err(RoiError::unsupported_kind("item has no rectangle geometry"))
    }

    /// Index-based center and radius of a `Circle` item.
    fn circle(&self) -> Result<(f64, f64, f64)> {
        Err(RoiError::unsupported_kind("item has no circle geometry"))
    }

    /// Index-based vertices of a `Polygon` item.
    fn points(&self) -> Result<Vec<(f64, f64)>> {
        Err(RoiError::unsupported_kind("item has no polygon geometry"))
    }

    /// Set the label displayed next to the item.
    fn set_title(&mut self, title: &str);

    /// Allow or forbid user edits on the item.
    fn set_editable(&mut self, editable: bool);

    /// Show or hide the item's label.
    fn set_show_label(&mut self, show_label: bool);
}

/// Build a ROI shape from a proxy handle.
///
/// Range selections are captured in physical units; image shapes are
/// captured in index units.
pub fn roi_shape_from_item(item: &dyn RoiProxyItem) -> Result<RoiShape> {
    match item.kind() {
        ProxyKind::XRange => {
            let (x0, x1) = item.range()?;
            Ok(RoiShape::new(GeometryShape::Segment { x0, x1 }, false))
        }
        ProxyKind::Rectangle => {
            let (x0, y0, x1, y1) = item.rect()?;
            Ok(RoiShape::new(
                GeometryShape::Rectangle { x0, y0, x1, y1 },
                true,
            ))
        }
        ProxyKind::Circle => {
            let (xc, yc, r) = item.circle()?;
            Ok(RoiShape::new(GeometryShape::Circle { xc, yc, r }, true))
        }
        ProxyKind::Polygon => {
            let points = item
                .points()?
                .into_iter()
                .map(|(x, y)| Point2::new(x, y))
                .collect();
            Ok(RoiShape::new(GeometryShape::Polygon { points }, true))
        }
        ProxyKind::Other => Err(RoiError::unsupported_kind(
            "item kind does not map to a ROI shape",
        )),
    }
}
