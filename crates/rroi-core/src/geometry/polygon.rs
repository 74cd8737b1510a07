//! Point-in-polygon tests and polygon bounds.
//!
//! Membership uses the nonzero winding-number rule with an inclusive
//! boundary: a point lying on an edge or vertex belongs to the polygon.
//! Self-intersecting input follows winding semantics (a region wound
//! twice is inside).

use nalgebra::Point2;

const BOUNDARY_EPS: f64 = 1e-12;

/// Signed area test: > 0 if `p` is left of the directed edge `a -> b`,
/// < 0 if right, 0 if collinear.
fn is_left(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Squared distance from `p` to the segment `a -> b`.
fn segment_distance_sq(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return ap.norm_squared();
    }
    let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).norm_squared()
}

/// Compute the winding number of `(x, y)` with respect to the closed
/// polygon `points` (closed implicitly, last vertex connects to first).
pub fn winding_number(points: &[Point2<f64>], x: f64, y: f64) -> i32 {
    let p = Point2::new(x, y);
    let mut wn = 0;
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, &p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b, &p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Test whether `(x, y)` lies inside the closed polygon (nonzero winding
/// rule, boundary inclusive).
pub fn contains(points: &[Point2<f64>], x: f64, y: f64) -> bool {
    let p = Point2::new(x, y);
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        if segment_distance_sq(a, b, &p) <= BOUNDARY_EPS {
            return true;
        }
    }
    winding_number(points, x, y) != 0
}

/// Axis-aligned bounds `(xmin, ymin, xmax, ymax)` of the polygon vertices.
///
/// Returns `None` for an empty vertex list.
pub fn bounds(points: &[Point2<f64>]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut xmin = first.x;
    let mut xmax = first.x;
    let mut ymin = first.y;
    let mut ymax = first.y;
    for p in &points[1..] {
        xmin = xmin.min(p.x);
        xmax = xmax.max(p.x);
        ymin = ymin.min(p.y);
        ymax = ymax.max(p.y);
    }
    Some((xmin, ymin, xmax, ymax))
}
