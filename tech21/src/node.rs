//!
//! # Primitive Nodes
//!
//! Pins, contacts, transistors and the other fixed components of a technology.
//! Each is drawn as a list of [NodeLayer]s and connected through [PrimitivePort]s,
//! all positioned by edge rules relative to the node's bounds.
//!

// Crates.io
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// Local imports
use crate::arc::ArcKey;
use crate::bbox::BoundBox;
use crate::edge::{EdgeH, EdgeV, NodeFrame, TechPoint};
use crate::geom::{Dist, Point};
use crate::layer::LayerKey;
use crate::poly::PolyStyle;
use crate::table::{Named, Table};
use crate::utils::{enumstr, EnumStr};

new_key_type! {
    /// Keys for [PrimitiveNode] entries
    pub struct NodeKey;
}

/// # Node Table
pub type Nodes = Table<NodeKey, PrimitiveNode>;

enumstr!(
    /// # Node Functions
    NodeFunction {
        Unknown: "unknown",
        Pin: "pin",
        Contact: "contact",
        PureLayer: "pure-layer-node",
        Connect: "connection",
        TransistorNMos: "nMOS-transistor",
        TransistorDMos: "DMOS-transistor",
        TransistorPMos: "pMOS-transistor",
        TransistorNpn: "NPN-transistor",
        TransistorPnp: "PNP-transistor",
        TransistorNJfet: "n-type-JFET-transistor",
        TransistorPJfet: "p-type-JFET-transistor",
        TransistorDMes: "depletion-mesfet",
        TransistorEMes: "enhancement-mesfet",
        TransistorRef: "prototype-defined-transistor",
        Transistor: "transistor",
        Transistor4NMos: "4-port-nMOS-transistor",
        Transistor4DMos: "4-port-DMOS-transistor",
        Transistor4PMos: "4-port-pMOS-transistor",
        Transistor4Npn: "4-port-NPN-transistor",
        Transistor4Pnp: "4-port-PNP-transistor",
        Transistor4NJfet: "4-port-n-type-JFET-transistor",
        Transistor4PJfet: "4-port-p-type-JFET-transistor",
        Transistor4DMes: "4-port-depletion-mesfet",
        Transistor4EMes: "4-port-enhancement-mesfet",
        Transistor4: "4-port-transistor",
        Resistor: "resistor",
        PolyResistor: "poly-resistor",
        WellResistor: "well-resistor",
        EsdDevice: "esd-device",
        Capacitor: "capacitor",
        ElectrolyticCapacitor: "electrolytic-capacitor",
        Diode: "diode",
        ZenerDiode: "zener-diode",
        Inductor: "inductor",
        Meter: "meter",
        Base: "base",
        Emitter: "emitter",
        Collector: "collector",
        Buffer: "buffer",
        GateAnd: "AND-gate",
        GateOr: "OR-gate",
        GateXor: "XOR-gate",
        FlipFlopRsMs: "flip-flop-RS-MS",
        FlipFlopRsP: "flip-flop-RS-P",
        FlipFlopRsN: "flip-flop-RS-N",
        FlipFlopJkMs: "flip-flop-JK-MS",
        FlipFlopJkP: "flip-flop-JK-P",
        FlipFlopJkN: "flip-flop-JK-N",
        FlipFlopDMs: "flip-flop-D-MS",
        FlipFlopDP: "flip-flop-D-P",
        FlipFlopDN: "flip-flop-D-N",
        FlipFlopTMs: "flip-flop-T-MS",
        FlipFlopTP: "flip-flop-T-P",
        FlipFlopTN: "flip-flop-T-N",
        Mux: "multiplexor",
        Power: "power",
        Ground: "ground",
        Source: "source",
        Substrate: "substrate",
        Well: "well",
        Art: "artwork",
        Array: "array",
        Align: "align",
        Ccvs: "ccvs",
        Cccs: "cccs",
        Vcvs: "vcvs",
        Vccs: "vccs",
        TransmissionLine: "transmission-line",
    }
);
impl NodeFunction {
    /// Any kind of transistor, three- or four-port
    pub fn is_transistor(&self) -> bool {
        let s = self.to_str();
        s.ends_with("transistor") || s.ends_with("mesfet")
    }
    pub fn is_flip_flop(&self) -> bool {
        self.to_str().starts_with("flip-flop")
    }
    pub fn is_pin(&self) -> bool {
        *self == Self::Pin
    }
    pub fn is_contact(&self) -> bool {
        *self == Self::Contact
    }
}
impl Default for NodeFunction {
    fn default() -> Self {
        Self::Unknown
    }
}

enumstr!(
    /// # Node-Layer Point Representations
    ///
    /// * `Points`: every point is a vertex
    /// * `Box`: two diagonally opposite corners
    /// * `MinBox`: two box corners, followed by two corners of the minimum box
    Representation {
        Points: "points",
        Box: "box",
        MinBox: "minbox",
    }
);
impl Representation {
    /// Boolean indication of whether `n` points is valid for this representation
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Self::Points => n >= 1,
            Self::Box => n == 2,
            Self::MinBox => n == 4,
        }
    }
}

/// # Serpentine Extents
///
/// How far a serpentine transistor's layer extends past its centerline path,
/// on each side and past each end.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SerpentineExtent {
    pub left: Dist,
    pub right: Dist,
    pub top: Dist,
    pub bottom: Dist,
}

/// # Node Layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayer {
    pub layer: LayerKey,
    /// Index of the port this layer is connected to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<usize>,
    pub style: PolyStyle,
    pub representation: Representation,
    pub points: Vec<TechPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serpentine: Option<SerpentineExtent>,
}
impl NodeLayer {
    /// Create a [Representation::Box] layer from two corners
    pub fn boxed(layer: LayerKey, port: Option<usize>, style: PolyStyle, pts: [TechPoint; 2]) -> Self {
        Self::new(layer, port, style, Representation::Box, pts.to_vec())
    }
    /// Create a [Representation::Points] layer
    pub fn points(
        layer: LayerKey,
        port: Option<usize>,
        style: PolyStyle,
        pts: Vec<TechPoint>,
    ) -> Self {
        Self::new(layer, port, style, Representation::Points, pts)
    }
    /// Create a [Representation::MinBox] layer
    pub fn min_box(
        layer: LayerKey,
        port: Option<usize>,
        style: PolyStyle,
        pts: [TechPoint; 4],
    ) -> Self {
        Self::new(layer, port, style, Representation::MinBox, pts.to_vec())
    }
    pub fn new(
        layer: LayerKey,
        port: Option<usize>,
        style: PolyStyle,
        representation: Representation,
        points: Vec<TechPoint>,
    ) -> Self {
        Self {
            layer,
            port,
            style,
            representation,
            points,
            serpentine: None,
        }
    }
    /// Builder-style setter of serpentine extents
    pub fn with_serpentine(mut self, left: Dist, right: Dist, top: Dist, bottom: Dist) -> Self {
        self.serpentine = Some(SerpentineExtent {
            left,
            right,
            top,
            bottom,
        });
        self
    }
    /// Resolve each point against `frame`
    pub fn locate(&self, frame: &NodeFrame) -> Vec<Point> {
        self.points.iter().map(|p| p.locate(frame)).collect()
    }
    /// Bounding box of our points, resolved against `frame`.
    /// Uses only the outer box of a [Representation::MinBox].
    pub fn bounds(&self, frame: &NodeFrame) -> BoundBox {
        use crate::bbox::BoundBoxTrait;
        let pts = match self.representation {
            Representation::MinBox => &self.points[..self.points.len().min(2)],
            _ => &self.points[..],
        };
        let located: Vec<Point> = pts.iter().map(|p| p.locate(frame)).collect();
        located.bbox()
    }
}

/// # Size Offset
///
/// Inset of a node's "true" bounds from its full bounds, per side.
/// Typically covers implants and wells which surround the node's active area.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeOffset {
    pub lx: Dist,
    pub hx: Dist,
    pub ly: Dist,
    pub hy: Dist,
}
impl SizeOffset {
    pub fn new(lx: Dist, hx: Dist, ly: Dist, hy: Dist) -> Self {
        Self { lx, hx, ly, hy }
    }
    /// Same inset on all four sides
    pub fn uniform(d: Dist) -> Self {
        Self::new(d, d, d, d)
    }
}

enumstr!(
    /// # Port Characteristics
    PortCharacteristic {
        Unknown: "unknown",
        Input: "input",
        Output: "output",
        Bidirectional: "bidirectional",
        Power: "power",
        Ground: "ground",
        Clock: "clock",
        Clock1: "clock1",
        Clock2: "clock2",
        Clock3: "clock3",
        Clock4: "clock4",
        Clock5: "clock5",
        Clock6: "clock6",
        ReferenceOutput: "refout",
        ReferenceInput: "refin",
        ReferenceBase: "refbase",
    }
);
impl Default for PortCharacteristic {
    fn default() -> Self {
        Self::Unknown
    }
}

/// # Primitive Port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitivePort {
    /// Port Name
    pub name: String,
    /// Arcs which may connect here
    pub connections: Vec<ArcKey>,
    /// Preferred connection direction, in degrees
    pub angle: u16,
    /// Allowed deviation from `angle`, in degrees. 180 allows any direction.
    pub angle_range: u16,
    /// Ports sharing a topology number are electrically connected through the node
    pub topology: usize,
    pub characteristic: PortCharacteristic,
    pub left: EdgeH,
    pub bottom: EdgeV,
    pub right: EdgeH,
    pub top: EdgeV,
}
impl PrimitivePort {
    /// Create a new port covering the full node, connecting in any direction
    pub fn new(name: impl Into<String>, connections: Vec<ArcKey>) -> Self {
        Self {
            name: name.into(),
            connections,
            angle: 0,
            angle_range: 180,
            topology: 0,
            characteristic: PortCharacteristic::Unknown,
            left: EdgeH::left_edge(),
            bottom: EdgeV::bottom_edge(),
            right: EdgeH::right_edge(),
            top: EdgeV::top_edge(),
        }
    }
    /// Builder-style setter of the direction and its range
    pub fn with_angles(mut self, angle: u16, range: u16) -> Self {
        self.angle = angle;
        self.angle_range = range;
        self
    }
    /// Builder-style setter of the topology number
    pub fn with_topology(mut self, topology: usize) -> Self {
        self.topology = topology;
        self
    }
    /// Builder-style setter of the characteristic
    pub fn with_characteristic(mut self, c: PortCharacteristic) -> Self {
        self.characteristic = c;
        self
    }
    /// Builder-style setter of all four edges
    pub fn with_edges(mut self, left: EdgeH, bottom: EdgeV, right: EdgeH, top: EdgeV) -> Self {
        self.left = left;
        self.bottom = bottom;
        self.right = right;
        self.top = top;
        self
    }
    /// Builder-style inset of all four edges by `d` from the node's edges
    pub fn inset(self, d: Dist) -> Self {
        self.with_edges(
            EdgeH::from_left(d),
            EdgeV::from_bottom(d),
            EdgeH::from_right(d),
            EdgeV::from_top(d),
        )
    }
    /// Port area on a node placed at `frame`
    pub fn bounds(&self, frame: &NodeFrame) -> BoundBox {
        BoundBox::from_points(
            Point::new(
                self.left.locate(frame.center.x, frame.width),
                self.bottom.locate(frame.center.y, frame.height),
            ),
            Point::new(
                self.right.locate(frame.center.x, frame.width),
                self.top.locate(frame.center.y, frame.height),
            ),
        )
    }
    /// Boolean indication of whether `arc` may connect here
    pub fn connects_to(&self, arc: ArcKey) -> bool {
        self.connections.contains(&arc)
    }
    /// Boolean indication of whether arcs may connect from any direction
    pub fn is_isotropic(&self) -> bool {
        self.angle_range >= 180
    }
}

/// # Multi-Cut Contact Parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiCut {
    pub cut_width: Dist,
    pub cut_height: Dist,
    /// Cut inset from the node's true bounds, horizontally
    pub indent_x: Dist,
    /// Cut inset from the node's true bounds, vertically
    pub indent_y: Dist,
    /// Cut spacing when cuts are in a single row or column
    pub spacing_1d: Dist,
    /// Cut spacing when cuts form a two-dimensional array
    pub spacing_2d: Dist,
}
impl MultiCut {
    /// Create from the six-value list (size x, size y, indent x, indent y, 1d spacing, 2d spacing)
    pub fn from_values(v: [Dist; 6]) -> Self {
        Self {
            cut_width: v[0],
            cut_height: v[1],
            indent_x: v[2],
            indent_y: v[3],
            spacing_1d: v[4],
            spacing_2d: v[5],
        }
    }
    pub fn values(&self) -> [Dist; 6] {
        [
            self.cut_width,
            self.cut_height,
            self.indent_x,
            self.indent_y,
            self.spacing_1d,
            self.spacing_2d,
        ]
    }
}

/// # Serpentine Transistor Parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Serpentine {
    pub layer_count: f64,
    /// Active port inset from the ends of the serpentine path
    pub active_port_inset: Dist,
    /// Active port distance from the poly edge
    pub active_port_edge: Dist,
    pub poly_width: Dist,
    /// Poly port inset from the poly edge
    pub poly_port_inset: Dist,
    /// Poly port distance from the active edge
    pub poly_port_edge: Dist,
}
impl Serpentine {
    /// Create from the six-value list, in field order
    pub fn from_values(v: [f64; 6]) -> Self {
        Self {
            layer_count: v[0],
            active_port_inset: v[1],
            active_port_edge: v[2],
            poly_width: v[3],
            poly_port_inset: v[4],
            poly_port_edge: v[5],
        }
    }
    pub fn values(&self) -> [f64; 6] {
        [
            self.layer_count,
            self.active_port_inset,
            self.active_port_edge,
            self.poly_width,
            self.poly_port_inset,
            self.poly_port_edge,
        ]
    }
}

/// # Special Node Types
///
/// Serialized as a table tagged by `kind`, with any parameters alongside.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Special {
    /// Transistor which may follow an arbitrary path
    Serpentine(Serpentine),
    /// Contact with as many cuts as fit
    MultiCut(MultiCut),
    /// Node drawn as an arbitrary polygon, its outline stored per-instance
    Polygonal,
}

/// # Node Flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFlags {
    /// Erased when connected to one or two arcs
    pub wipe_on_1_or_2: bool,
    /// Erased by its connecting arcs, when they are wipable
    pub arcs_wipe: bool,
    /// Connecting arcs shrink to meet at the node's center
    pub arcs_shrink: bool,
    /// Constrained to square sizes
    pub square: bool,
    /// Instances may store their own outline
    pub holds_outline: bool,
    /// May be shrunk below its default size
    pub can_shrink: bool,
    /// Selected by clicking its edge rather than its area
    pub edge_select: bool,
}
impl NodeFlags {
    /// Typical pin flags: wiped by, and shrinking, their arcs
    pub fn pin() -> Self {
        Self {
            arcs_wipe: true,
            arcs_shrink: true,
            ..Default::default()
        }
    }
    /// Typical pure-layer flags: holding an outline
    pub fn outline() -> Self {
        Self {
            holds_outline: true,
            ..Default::default()
        }
    }
}

/// # Primitive Node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveNode {
    /// Node Name
    pub name: String,
    pub function: NodeFunction,
    pub default_width: Dist,
    pub default_height: Dist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_offset: Option<SizeOffset>,
    pub layers: Vec<NodeLayer>,
    pub ports: Vec<PrimitivePort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Special>,
    #[serde(default)]
    pub flags: NodeFlags,
}
impl PrimitiveNode {
    /// Create a new [PrimitiveNode], of unknown function and without ports
    pub fn new(
        name: impl Into<String>,
        default_width: Dist,
        default_height: Dist,
        layers: Vec<NodeLayer>,
    ) -> Self {
        Self {
            name: name.into(),
            function: NodeFunction::Unknown,
            default_width,
            default_height,
            size_offset: None,
            layers,
            ports: Vec::new(),
            special: None,
            flags: NodeFlags::default(),
        }
    }
    /// Builder-style setter of our function
    pub fn with_function(mut self, function: NodeFunction) -> Self {
        self.function = function;
        self
    }
    /// Builder-style setter of the size offset
    pub fn with_size_offset(mut self, offset: SizeOffset) -> Self {
        self.size_offset = Some(offset);
        self
    }
    /// Builder-style setter of our ports
    pub fn with_ports(mut self, ports: Vec<PrimitivePort>) -> Self {
        self.ports = ports;
        self
    }
    /// Builder-style setter of our special type
    pub fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }
    /// Builder-style setter of our flags
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
    /// Get the port named `name`
    pub fn port(&self, name: &str) -> Option<&PrimitivePort> {
        self.ports.iter().find(|p| p.name == name)
    }
    /// Get the index of the port named `name`
    pub fn port_index(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }
    /// Iterate over the layers connected to port number `idx`
    pub fn layers_on_port(&self, idx: usize) -> impl Iterator<Item = &NodeLayer> + '_ {
        self.layers.iter().filter(move |l| l.port == Some(idx))
    }
    /// Default size, less the size offset
    pub fn base_size(&self) -> (Dist, Dist) {
        match self.size_offset {
            Some(so) => (
                self.default_width - so.lx - so.hx,
                self.default_height - so.ly - so.hy,
            ),
            None => (self.default_width, self.default_height),
        }
    }
    /// Frame of a default-sized instance, centered on the origin
    pub fn default_frame(&self) -> NodeFrame {
        NodeFrame::new(self.default_width, self.default_height)
    }
    pub fn is_serpentine(&self) -> bool {
        matches!(self.special, Some(Special::Serpentine(_)))
    }
    pub fn is_multi_cut(&self) -> bool {
        matches!(self.special, Some(Special::MultiCut(_)))
    }
}
impl Named for PrimitiveNode {
    const KIND: &'static str = "node";
    fn name(&self) -> &str {
        &self.name
    }
}
