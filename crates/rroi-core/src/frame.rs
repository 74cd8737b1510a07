//! Coordinate frames mapping array indices to physical coordinates.
//!
//! A frame carries the per-axis origin and step size of a data object and
//! converts between physical (data) units and continuous index units.
//! Index rounding uses nearest-integer with ties-to-even, so the conversion
//! round-trips exactly for integer-aligned inputs.

use serde::{Deserialize, Serialize};

/// Coordinate frame of a 1-D signal.
///
/// The physical coordinate of sample `i` is `x0 + i * dx`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalFrame {
    x0: f64,
    dx: f64,
}

impl SignalFrame {
    /// Create a new signal frame.
    ///
    /// # Panics
    /// Panics if `dx` is zero or not finite.
    pub fn new(x0: f64, dx: f64) -> Self {
        assert!(x0.is_finite(), "Frame origin must be finite");
        assert!(dx.is_finite() && dx != 0.0, "Frame step must be finite and non-zero");
        Self { x0, dx }
    }

    /// Get the origin (physical coordinate of sample 0).
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Get the step (physical distance between samples).
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Convert a continuous index to a physical coordinate.
    pub fn index_to_phys(&self, i: f64) -> f64 {
        self.x0 + i * self.dx
    }

    /// Convert a physical coordinate to a continuous index.
    pub fn phys_to_index(&self, x: f64) -> f64 {
        (x - self.x0) / self.dx
    }

    /// Convert a physical coordinate to the nearest integer index
    /// (ties-to-even).
    pub fn phys_to_index_rounded(&self, x: f64) -> i64 {
        self.phys_to_index(x).round_ties_even() as i64
    }
}

impl Default for SignalFrame {
    fn default() -> Self {
        Self { x0: 0.0, dx: 1.0 }
    }
}

/// Coordinate frame of a 2-D image.
///
/// Column index maps to x, row index maps to y: the physical coordinate of
/// pixel `(row, col)` is `(x0 + col * dx, y0 + row * dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    x0: f64,
    y0: f64,
    dx: f64,
    dy: f64,
}

impl ImageFrame {
    /// Create a new image frame.
    ///
    /// # Panics
    /// Panics if a step is zero or any field is not finite.
    pub fn new(x0: f64, y0: f64, dx: f64, dy: f64) -> Self {
        assert!(x0.is_finite() && y0.is_finite(), "Frame origin must be finite");
        assert!(
            dx.is_finite() && dx != 0.0 && dy.is_finite() && dy != 0.0,
            "Frame steps must be finite and non-zero"
        );
        Self { x0, y0, dx, dy }
    }

    /// Get the x origin (physical x of column 0).
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Get the y origin (physical y of row 0).
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Get the x step (pixel width).
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y step (pixel height).
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Convert a continuous `(col, row)` index to a physical `(x, y)` point.
    pub fn index_to_phys(&self, col: f64, row: f64) -> (f64, f64) {
        (self.x0 + col * self.dx, self.y0 + row * self.dy)
    }

    /// Convert a physical `(x, y)` point to a continuous `(col, row)` index.
    pub fn phys_to_index(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x0) / self.dx, (y - self.y0) / self.dy)
    }

    /// Convert a physical `(x, y)` point to the nearest integer `(col, row)`
    /// index (ties-to-even).
    pub fn phys_to_index_rounded(&self, x: f64, y: f64) -> (i64, i64) {
        let (c, r) = self.phys_to_index(x, y);
        (c.round_ties_even() as i64, r.round_ties_even() as i64)
    }
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            dx: 1.0,
            dy: 1.0,
        }
    }
}
