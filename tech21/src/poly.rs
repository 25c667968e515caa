//!
//! # Polygon Styles
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::utils::{enumstr, EnumStr};

enumstr!(
    /// # Polygon Style
    ///
    /// How the points of an arc- or node-layer are drawn.
    PolyStyle {
        // Polygons
        Filled: "filled",
        Closed: "closed",
        Crossed: "crossed",
        // Lines
        Opened: "opened",
        OpenedDotted: "opened-dotted",
        OpenedDashed: "opened-dashed",
        OpenedThick: "opened-thick",
        Vectors: "vectors",
        // Curves
        Circle: "circle",
        ThickCircle: "thick-circle",
        Disc: "disc",
        CircleArc: "circle-arc",
        ThickCircleArc: "thick-circle-arc",
        // Text
        TextCenter: "text-center",
        TextTop: "text-top",
        TextBottom: "text-bottom",
        TextLeft: "text-left",
        TextRight: "text-right",
        TextTopLeft: "text-topleft",
        TextBottomLeft: "text-botleft",
        TextTopRight: "text-topright",
        TextBottomRight: "text-botright",
        TextBox: "text-box",
        // Miscellaneous
        Cross: "cross",
        BigCross: "big-cross",
    }
);
impl PolyStyle {
    /// Text anchors, in tenth-degree angle order starting from "left"
    const TEXT_ANGLES: [(PolyStyle, u16); 8] = [
        (Self::TextLeft, 0),
        (Self::TextBottomLeft, 450),
        (Self::TextBottom, 900),
        (Self::TextBottomRight, 1350),
        (Self::TextRight, 1800),
        (Self::TextTopRight, 2250),
        (Self::TextTop, 2700),
        (Self::TextTopLeft, 3150),
    ];

    pub fn is_text(&self) -> bool {
        use PolyStyle::*;
        matches!(
            self,
            TextCenter
                | TextTop
                | TextBottom
                | TextLeft
                | TextRight
                | TextTopLeft
                | TextBottomLeft
                | TextTopRight
                | TextBottomRight
                | TextBox
        )
    }
    /// Line styles: drawn through their points, without closing
    pub fn is_opened(&self) -> bool {
        use PolyStyle::*;
        matches!(
            self,
            Opened | OpenedDotted | OpenedDashed | OpenedThick | Vectors
        )
    }
    /// Closed-shape styles, whose points enclose an area
    pub fn is_closed_shape(&self) -> bool {
        matches!(self, Self::Filled | Self::Closed | Self::Crossed)
    }
    /// Curve styles, whose first point is a center
    pub fn is_curve(&self) -> bool {
        use PolyStyle::*;
        matches!(
            self,
            Circle | ThickCircle | Disc | CircleArc | ThickCircleArc
        )
    }
    /// Anchor angle of a text style, in tenths of a degree.
    /// Centered text and non-text styles are at zero.
    pub fn text_angle(&self) -> u16 {
        Self::TEXT_ANGLES
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, a)| *a)
            .unwrap_or(0)
    }
    /// Inverse of `text_angle`. Unlisted angles produce [PolyStyle::TextCenter].
    pub fn from_text_angle(angle: u16) -> Self {
        Self::TEXT_ANGLES
            .iter()
            .find(|(_, a)| *a == angle)
            .map(|(s, _)| *s)
            .unwrap_or(Self::TextCenter)
    }
}
