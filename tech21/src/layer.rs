//!
//! # Layers
//!
//! Each [Layer] pairs a name and [Graphics] with an electrical [LayerFunction],
//! refined by a set of [FunctionExtras].
//!

// Crates.io
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use slotmap::new_key_type;

// Local imports
use crate::graphics::Graphics;
use crate::node::NodeKey;
use crate::table::{Named, Table};
use crate::utils::{enumstr, EnumStr};

new_key_type! {
    /// Keys for [Layer] entries
    pub struct LayerKey;
}

/// # Layer Table
///
/// Keyed by [LayerKey], indexed by name and by registration order.
///
pub type Layers = Table<LayerKey, Layer>;

enumstr!(
    /// # Layer Functions
    LayerFunction {
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
        Poly1: "poly-1",
        Poly2: "poly-2",
        Poly3: "poly-3",
        Gate: "gate",
        Diff: "diffusion",
        DiffP: "p-diffusion",
        DiffN: "n-diffusion",
        Implant: "implant",
        ImplantP: "p-implant",
        ImplantN: "n-implant",
        Contact1: "contact-1",
        Contact2: "contact-2",
        Contact3: "contact-3",
        Contact4: "contact-4",
        Contact5: "contact-5",
        Contact6: "contact-6",
        Contact7: "contact-7",
        Contact8: "contact-8",
        Contact9: "contact-9",
        Contact10: "contact-10",
        Contact11: "contact-11",
        Contact12: "contact-12",
        Plug: "plug",
        Overglass: "overglass",
        Resistor: "resistor",
        Capacitor: "capacitor",
        Transistor: "transistor",
        Emitter: "emitter",
        Base: "base",
        Collector: "collector",
        Substrate: "substrate",
        Well: "well",
        WellP: "p-well",
        WellN: "n-well",
        Guard: "guard",
        Isolation: "isolation",
        Bus: "bus",
        Art: "art",
        Control: "control",
    }
);
impl LayerFunction {
    const METALS: [LayerFunction; 12] = [
        Self::Metal1,
        Self::Metal2,
        Self::Metal3,
        Self::Metal4,
        Self::Metal5,
        Self::Metal6,
        Self::Metal7,
        Self::Metal8,
        Self::Metal9,
        Self::Metal10,
        Self::Metal11,
        Self::Metal12,
    ];
    const CONTACTS: [LayerFunction; 12] = [
        Self::Contact1,
        Self::Contact2,
        Self::Contact3,
        Self::Contact4,
        Self::Contact5,
        Self::Contact6,
        Self::Contact7,
        Self::Contact8,
        Self::Contact9,
        Self::Contact10,
        Self::Contact11,
        Self::Contact12,
    ];
    const POLYS: [LayerFunction; 3] = [Self::Poly1, Self::Poly2, Self::Poly3];

    /// Get the metal function for (one-based) `level`
    pub fn metal(level: usize) -> Option<Self> {
        Self::METALS.get(level.checked_sub(1)?).copied()
    }
    /// Get the contact function for (one-based) `level`
    pub fn contact(level: usize) -> Option<Self> {
        Self::CONTACTS.get(level.checked_sub(1)?).copied()
    }
    /// Get the polysilicon function for (one-based) `level`
    pub fn poly(level: usize) -> Option<Self> {
        Self::POLYS.get(level.checked_sub(1)?).copied()
    }
    /// One-based level of a metal, polysilicon, or contact function
    pub fn level(&self) -> Option<usize> {
        let find = |list: &[LayerFunction]| list.iter().position(|f| f == self).map(|i| i + 1);
        find(&Self::METALS)
            .or_else(|| find(&Self::POLYS))
            .or_else(|| find(&Self::CONTACTS))
    }
    pub fn is_metal(&self) -> bool {
        Self::METALS.contains(self)
    }
    pub fn is_contact(&self) -> bool {
        Self::CONTACTS.contains(self)
    }
    /// Polysilicon of any level, or gate
    pub fn is_poly(&self) -> bool {
        Self::POLYS.contains(self) || *self == Self::Gate
    }
    pub fn is_diff(&self) -> bool {
        matches!(self, Self::Diff | Self::DiffP | Self::DiffN)
    }
    pub fn is_implant(&self) -> bool {
        matches!(self, Self::Implant | Self::ImplantP | Self::ImplantN)
    }
    pub fn is_well(&self) -> bool {
        matches!(self, Self::Well | Self::WellP | Self::WellN)
    }
    /// Extra bits implied by the function itself, e.g. [FunctionExtras::PTYPE] for p-diffusion
    pub fn intrinsic_extras(&self) -> FunctionExtras {
        match self {
            Self::Gate => FunctionExtras::INTRANS,
            Self::DiffP | Self::ImplantP | Self::WellP => FunctionExtras::PTYPE,
            Self::DiffN | Self::ImplantN | Self::WellN => FunctionExtras::NTYPE,
            _ => FunctionExtras::NONE,
        }
    }
}
impl Default for LayerFunction {
    fn default() -> Self {
        Self::Unknown
    }
}

/// # Layer Function Extras
///
/// Bit-set of refinements to a [LayerFunction].
/// Serialized as a list of its bit names.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FunctionExtras(u32);
impl FunctionExtras {
    pub const NONE: Self = Self(0);
    pub const PTYPE: Self = Self(0o100);
    pub const NTYPE: Self = Self(0o200);
    pub const DEPLETION: Self = Self(0o400);
    pub const ENHANCEMENT: Self = Self(0o1000);
    pub const LIGHT: Self = Self(0o2000);
    pub const HEAVY: Self = Self(0o4000);
    pub const PSEUDO: Self = Self(0o10000);
    pub const NONELEC: Self = Self(0o20000);
    pub const CONMETAL: Self = Self(0o40000);
    pub const CONPOLY: Self = Self(0o100000);
    pub const CONDIFF: Self = Self(0o200000);
    pub const INTRANS: Self = Self(0o20000000);

    const NAMED: [(Self, &'static str); 12] = [
        (Self::PTYPE, "p-type"),
        (Self::NTYPE, "n-type"),
        (Self::DEPLETION, "depletion"),
        (Self::ENHANCEMENT, "enhancement"),
        (Self::LIGHT, "light"),
        (Self::HEAVY, "heavy"),
        (Self::PSEUDO, "pseudo"),
        (Self::NONELEC, "nonelectrical"),
        (Self::CONMETAL, "connects-metal"),
        (Self::CONPOLY, "connects-poly"),
        (Self::CONDIFF, "connects-diff"),
        (Self::INTRANS, "inside-transistor"),
    ];

    /// Raw bit value
    pub fn bits(&self) -> u32 {
        self.0
    }
    /// Boolean indication of whether all bits of `other` are set
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    /// Names of each set bit
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect()
    }
    /// Parse a single bit-name, as produced by `names`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(bit, _)| *bit)
    }
}
impl std::ops::BitOr for FunctionExtras {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl Serialize for FunctionExtras {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for FunctionExtras {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names: Vec<String> = Vec::deserialize(deserializer)?;
        let mut rv = Self::NONE;
        for name in names.iter() {
            match Self::from_name(name) {
                Some(bit) => rv.insert(bit),
                None => {
                    return Err(de::Error::custom(format!(
                        "unknown layer function extra `{}`",
                        name
                    )))
                }
            }
        }
        Ok(rv)
    }
}

/// # Layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer Name
    pub name: String,
    pub function: LayerFunction,
    #[serde(default, skip_serializing_if = "FunctionExtras::is_empty")]
    pub extras: FunctionExtras,
    pub graphics: Graphics,
    /// Name in CIF files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cif_layer: Option<String>,
    /// Name in DXF files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dxf_layer: Option<String>,
    /// Primitive node which draws this layer alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pure_layer_node: Option<NodeKey>,
}
impl Layer {
    /// Create a new [Layer] with unknown function
    pub fn new(name: impl Into<String>, graphics: Graphics) -> Self {
        Self {
            name: name.into(),
            function: LayerFunction::Unknown,
            extras: FunctionExtras::NONE,
            graphics,
            cif_layer: None,
            dxf_layer: None,
            pure_layer_node: None,
        }
    }
    /// Builder-style setter of the function and its extras
    pub fn with_function(mut self, function: LayerFunction, extras: FunctionExtras) -> Self {
        self.function = function;
        self.extras = extras;
        self
    }
    /// Builder-style setter of the CIF name. Empty names are stored as `None`.
    pub fn with_cif(mut self, cif: &str) -> Self {
        self.cif_layer = non_empty(cif);
        self
    }
    /// Builder-style setter of the DXF name. Empty names are stored as `None`.
    pub fn with_dxf(mut self, dxf: &str) -> Self {
        self.dxf_layer = non_empty(dxf);
        self
    }
    /// All extras: those set explicitly, plus those implied by our function
    pub fn all_extras(&self) -> FunctionExtras {
        self.extras | self.function.intrinsic_extras()
    }
    /// Pseudo-layers are drawn on pins, and never written out to mask data
    pub fn is_pseudo(&self) -> bool {
        self.extras.contains(FunctionExtras::PSEUDO)
    }
    /// Boolean indication of whether this layer carries signals
    pub fn is_electrical(&self) -> bool {
        !self.extras.contains(FunctionExtras::NONELEC) && self.function != LayerFunction::Art
    }
}
impl Named for Layer {
    const KIND: &'static str = "layer";
    fn name(&self) -> &str {
        &self.name
    }
}

fn non_empty(s: &str) -> Option<String> {
    match s.is_empty() {
        true => None,
        false => Some(s.to_string()),
    }
}
