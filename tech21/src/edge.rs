//!
//! # Scalable Edge Descriptions
//!
//! Primitive-node geometry is not stored as fixed coordinates.
//! Each coordinate is instead a *rule* relative to the node's bounds:
//! `center + multiplier * size + adder`.
//! A multiplier of -0.5 lands on the left (or bottom) edge, +0.5 on the right (or top),
//! and zero on the center, before the constant `adder` is applied.
//! Scaling a node therefore moves its layers and ports along with its edges.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::bbox::BoundBox;
use crate::geom::{Dist, Point};

/// # Horizontal Edge Rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeH {
    /// Fraction of the node's width
    pub multiplier: f64,
    /// Constant offset, in lambda
    pub adder: Dist,
}
impl EdgeH {
    pub const fn new(multiplier: f64, adder: Dist) -> Self {
        Self { multiplier, adder }
    }
    /// The left edge
    pub const fn left_edge() -> Self {
        Self::new(-0.5, 0.0)
    }
    /// The right edge
    pub const fn right_edge() -> Self {
        Self::new(0.5, 0.0)
    }
    /// The center
    pub const fn center() -> Self {
        Self::new(0.0, 0.0)
    }
    /// Distance `d` inward from the left edge
    pub const fn from_left(d: Dist) -> Self {
        Self::new(-0.5, d)
    }
    /// Distance `d` inward from the right edge
    pub fn from_right(d: Dist) -> Self {
        Self::new(0.5, -d)
    }
    /// Distance `d` right of center
    pub const fn from_center(d: Dist) -> Self {
        Self::new(0.0, d)
    }
    /// Resolve against a node centered at `center`, `width` wide
    pub fn locate(&self, center: Dist, width: Dist) -> Dist {
        center + self.multiplier * width + self.adder
    }
}

/// # Vertical Edge Rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeV {
    /// Fraction of the node's height
    pub multiplier: f64,
    /// Constant offset, in lambda
    pub adder: Dist,
}
impl EdgeV {
    pub const fn new(multiplier: f64, adder: Dist) -> Self {
        Self { multiplier, adder }
    }
    pub const fn bottom_edge() -> Self {
        Self::new(-0.5, 0.0)
    }
    pub const fn top_edge() -> Self {
        Self::new(0.5, 0.0)
    }
    pub const fn center() -> Self {
        Self::new(0.0, 0.0)
    }
    /// Distance `d` upward from the bottom edge
    pub const fn from_bottom(d: Dist) -> Self {
        Self::new(-0.5, d)
    }
    /// Distance `d` downward from the top edge
    pub fn from_top(d: Dist) -> Self {
        Self::new(0.5, -d)
    }
    /// Distance `d` above center
    pub const fn from_center(d: Dist) -> Self {
        Self::new(0.0, d)
    }
    /// Resolve against a node centered at `center`, `height` tall
    pub fn locate(&self, center: Dist, height: Dist) -> Dist {
        center + self.multiplier * height + self.adder
    }
}

/// # Node Frame
///
/// The placement against which edge rules are resolved.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    pub center: Point,
    pub width: Dist,
    pub height: Dist,
}
impl NodeFrame {
    /// Create a frame centered on the origin
    pub fn new(width: Dist, height: Dist) -> Self {
        Self {
            center: Point::default(),
            width,
            height,
        }
    }
    /// Builder-style setter of the center
    pub fn at(mut self, center: Point) -> Self {
        self.center = center;
        self
    }
    /// Our outer bounds
    pub fn bounds(&self) -> BoundBox {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        BoundBox::from_points(
            Point::new(self.center.x - hw, self.center.y - hh),
            Point::new(self.center.x + hw, self.center.y + hh),
        )
    }
}

/// # Technology Point
///
/// A pair of edge rules, locating a point relative to a node.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechPoint {
    pub x: EdgeH,
    pub y: EdgeV,
}
impl TechPoint {
    pub const fn new(x: EdgeH, y: EdgeV) -> Self {
        Self { x, y }
    }
    /// The node's center
    pub const fn center() -> Self {
        Self::new(EdgeH::center(), EdgeV::center())
    }
    /// The lower-left corner
    pub const fn lower_left() -> Self {
        Self::new(EdgeH::left_edge(), EdgeV::bottom_edge())
    }
    /// The upper-right corner
    pub const fn upper_right() -> Self {
        Self::new(EdgeH::right_edge(), EdgeV::top_edge())
    }
    /// Resolve against `frame`
    pub fn locate(&self, frame: &NodeFrame) -> Point {
        Point::new(
            self.x.locate(frame.center.x, frame.width),
            self.y.locate(frame.center.y, frame.height),
        )
    }
    /// Box pair covering the full node
    pub fn full_box() -> [TechPoint; 2] {
        Self::indented(0.0)
    }
    /// Box pair inset by `amount` on all four sides
    pub fn indented(amount: Dist) -> [TechPoint; 2] {
        [
            Self::new(EdgeH::from_left(amount), EdgeV::from_bottom(amount)),
            Self::new(EdgeH::from_right(amount), EdgeV::from_top(amount)),
        ]
    }
    /// Box pair collapsed onto the node's center
    pub fn center_box() -> [TechPoint; 2] {
        [Self::center(), Self::center()]
    }
}
