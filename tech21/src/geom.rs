//!
//! # Geometric Primitives
//!

// Crates.io
use serde::{Deserialize, Serialize};

/// # Distance Type-Alias
///
/// All technology geometry is in lambda, the technology's scalable unit.
/// Values such as the serpentine transistor's 0.0333333 are not integral, hence floating-point.
///
pub type Dist = f64;

/// Tolerance used when comparing [Dist] values
pub const EPSILON: Dist = 1e-9;

/// Boolean indication of whether `a` and `b` are equal, within [EPSILON]
pub fn same(a: Dist, b: Dist) -> bool {
    (a - b).abs() < EPSILON
}

/// # Point in two-dimensional lambda-space
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct Point {
    pub x: Dist,
    pub y: Dist,
}
impl Point {
    /// Create a new [Point] from (x,y) coordinates
    pub fn new(x: Dist, y: Dist) -> Self {
        Self { x, y }
    }
    /// Create a new point shifted by `x` in the x-dimension and by `y` in the y-dimension
    pub fn shift(&self, p: &Point) -> Point {
        Point {
            x: p.x + self.x,
            y: p.y + self.y,
        }
    }
    /// Create a new point scaled by `p.x` in the x-dimension and by `p.y` in the y-dimension
    pub fn scale(&self, p: &Point) -> Point {
        Point {
            x: p.x * self.x,
            y: p.y * self.y,
        }
    }
    /// Boolean indication of equality within [EPSILON]
    pub fn approx_eq(&self, other: &Point) -> bool {
        same(self.x, other.x) && same(self.y, other.y)
    }
}
impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
