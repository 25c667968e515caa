//!
//! # Arc Prototypes
//!
//! Kinds of wire a technology offers, each drawn as one or more [ArcLayer]s.
//!

// Crates.io
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// Local imports
use crate::geom::Dist;
use crate::layer::LayerKey;
use crate::poly::PolyStyle;
use crate::table::{Named, Table};
use crate::utils::{enumstr, EnumStr};

new_key_type! {
    /// Keys for [ArcProto] entries
    pub struct ArcKey;
}

/// # Arc Table
pub type Arcs = Table<ArcKey, ArcProto>;

enumstr!(
    /// # Arc Functions
    ArcFunction {
        Unknown: "unknown",
        Metal1: "metal-1",
        Metal2: "metal-2",
        Metal3: "metal-3",
        Metal4: "metal-4",
        Metal5: "metal-5",
        Metal6: "metal-6",
        Metal7: "metal-7",
        Metal8: "metal-8",
        Metal9: "metal-9",
        Metal10: "metal-10",
        Metal11: "metal-11",
        Metal12: "metal-12",
        Poly1: "polysilicon-1",
        Poly2: "polysilicon-2",
        Poly3: "polysilicon-3",
        Diff: "diffusion",
        DiffP: "p-diffusion",
        DiffN: "n-diffusion",
        DiffS: "substrate-diffusion",
        DiffW: "well-diffusion",
        Bus: "bus",
        Unrouted: "unrouted",
        NonElectrical: "nonelectrical",
    }
);
impl ArcFunction {
    /// One-based level of metal and polysilicon functions
    pub fn level(&self) -> Option<usize> {
        let idx = Self::VARIANTS.iter().position(|f| f == self)?;
        match idx {
            1..=12 => Some(idx),
            13..=15 => Some(idx - 12),
            _ => None,
        }
    }
    pub fn is_metal(&self) -> bool {
        self.to_str().starts_with("metal-")
    }
    pub fn is_poly(&self) -> bool {
        self.to_str().starts_with("polysilicon-")
    }
    pub fn is_diffusion(&self) -> bool {
        use ArcFunction::*;
        matches!(self, Diff | DiffP | DiffN | DiffS | DiffW)
    }
}
impl Default for ArcFunction {
    fn default() -> Self {
        Self::Unknown
    }
}

/// # Arc Layer
///
/// One layer of an arc. Drawn `offset` narrower than the arc itself.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcLayer {
    pub layer: LayerKey,
    pub offset: Dist,
    pub style: PolyStyle,
}
impl ArcLayer {
    pub fn new(layer: LayerKey, offset: Dist, style: PolyStyle) -> Self {
        Self {
            layer,
            offset,
            style,
        }
    }
}

/// # Arc Prototype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcProto {
    /// Arc Name
    pub name: String,
    pub function: ArcFunction,
    /// Default full width, including every layer
    pub default_width: Dist,
    /// Difference between the full width and the user-visible "base" width
    pub width_offset: Dist,
    pub layers: Vec<ArcLayer>,
    /// Whether new arcs are constrained to `angle_increment`
    pub fixed_angle: bool,
    /// Angle increment in degrees. Zero means any angle.
    pub angle_increment: u16,
    /// Whether arcs of this kind erase ("wipe") the pins they connect to
    pub wipable: bool,
    /// Whether arcs of this kind may be drawn curved
    pub curvable: bool,
    /// Whether arc ends extend past their endpoints by half the width
    pub extended: bool,
}
impl ArcProto {
    /// Create a new [ArcProto] of unknown function.
    /// Ends are extended, and angles unconstrained with a 90-degree increment.
    pub fn new(name: impl Into<String>, default_width: Dist, layers: Vec<ArcLayer>) -> Self {
        Self {
            name: name.into(),
            function: ArcFunction::Unknown,
            default_width,
            width_offset: 0.0,
            layers,
            fixed_angle: false,
            angle_increment: 90,
            wipable: false,
            curvable: false,
            extended: true,
        }
    }
    /// Builder-style setter of our function
    pub fn with_function(mut self, function: ArcFunction) -> Self {
        self.function = function;
        self
    }
    /// Builder-style setter of the angle constraints
    pub fn with_angles(mut self, fixed: bool, increment: u16) -> Self {
        self.fixed_angle = fixed;
        self.angle_increment = increment;
        self
    }
    /// Builder-style setter of the width offset
    pub fn with_width_offset(mut self, width_offset: Dist) -> Self {
        self.width_offset = width_offset;
        self
    }
    /// Builder-style setter of `wipable`
    pub fn with_wipable(mut self) -> Self {
        self.wipable = true;
        self
    }
    /// Builder-style setter of `curvable`
    pub fn with_curvable(mut self) -> Self {
        self.curvable = true;
        self
    }
    /// Builder-style setter of `extended`
    pub fn not_extended(mut self) -> Self {
        self.extended = false;
        self
    }
    /// Default width less the width offset
    pub fn base_width(&self) -> Dist {
        self.default_width - self.width_offset
    }
    /// Width of layer number `idx` on an arc of full width `width`.
    /// Never negative.
    pub fn layer_width(&self, idx: usize, width: Dist) -> Option<Dist> {
        let layer = self.layers.get(idx)?;
        Some((width - layer.offset).max(0.0))
    }
    /// Boolean indication of whether any of our layers is `layer`
    pub fn uses_layer(&self, layer: LayerKey) -> bool {
        self.layers.iter().any(|l| l.layer == layer)
    }
}
impl Named for ArcProto {
    const KIND: &'static str = "arc";
    fn name(&self) -> &str {
        &self.name
    }
}
