//!
//! # Technology
//!
//! The complete description of one technology: its layers, arcs, nodes,
//! design rules, and the handful of technology-wide settings that go with them.
//!

// Std-Lib
use std::collections::HashSet;
use std::path::Path;

// Crates.io
use log::{debug, info};
use serde::{Deserialize, Serialize};

// Local imports
use crate::arc::{ArcKey, ArcProto, Arcs};
use crate::drc::DesignRules;
use crate::error::{ErrorContext, TechError, TechResult};
use crate::geom::Dist;
use crate::graphics::{Color, MAX_TRANSPARENT_LAYER};
use crate::layer::{Layer, LayerKey, Layers};
use crate::node::{NodeFunction, NodeKey, Nodes, PrimitiveNode, Special};
use crate::utils::{enumstr, EnumStr, ErrorHelper, SerdeFile, SerializationFormat, Unwrapper};

/// Distance Units Enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Units {
    /// Micrometers, or microns for we olde folke
    Micro,
    /// Nanometers
    Nano,
    /// Angstroms
    Angstrom,
    /// Picometers
    Pico,
}
impl Units {
    /// Number of nanometers per unit
    pub fn nanometers(&self) -> f64 {
        match self {
            Units::Micro => 1000.0,
            Units::Nano => 1.0,
            Units::Angstrom => 0.1,
            Units::Pico => 0.001,
        }
    }
}
impl Default for Units {
    /// Default units are nanometers
    fn default() -> Units {
        Units::Nano
    }
}

/// # Technology Scale
///
/// Physical size of one lambda.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub per_lambda: f64,
    pub units: Units,
    /// Whether the scale is meaningful.
    /// Schematic and artwork technologies carry a scale only by convention.
    pub relevant: bool,
}
impl Scale {
    /// Scale of `nm` nanometers per lambda
    pub fn nanometers(nm: f64, relevant: bool) -> Self {
        Self {
            per_lambda: nm,
            units: Units::Nano,
            relevant,
        }
    }
    /// Nanometers per lambda
    pub fn to_nanometers(&self) -> f64 {
        self.per_lambda * self.units.nanometers()
    }
    /// Convert lambda distance `d` to microns
    pub fn to_microns(&self, d: Dist) -> f64 {
        d * self.to_nanometers() / 1000.0
    }
}

/// # Technology-Wide Flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechFlags {
    /// Nothing in the technology carries signals
    pub non_electrical: bool,
    /// Arcs cannot be directional
    pub no_directional_arcs: bool,
    /// Arcs cannot be negated
    pub no_negated_arcs: bool,
    /// Not editable as an ordinary technology
    pub non_standard: bool,
    /// Built in, rather than loaded
    pub static_technology: bool,
    /// Not switched to automatically, having no primitives of interest
    pub no_primitives: bool,
}

enumstr!(
    /// # Foundries
    FoundryKind {
        None: "NONE",
        Mosis: "MOSIS",
        Tsmc: "TSMC",
        St: "ST",
    }
);

/// # GDS Layer Assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdsLayer {
    pub layer: LayerKey,
    /// GDS layer specification, e.g. "49" or "49/0"
    pub spec: String,
}

/// # Foundry
/// Foundry-specific data: currently, GDS layer assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foundry {
    pub kind: FoundryKind,
    #[serde(default)]
    pub gds_layers: Vec<GdsLayer>,
}
impl Foundry {
    pub fn new(kind: FoundryKind) -> Self {
        Self {
            kind,
            gds_layers: Vec::new(),
        }
    }
    /// Assign GDS spec `spec` to `layer`, replacing any prior assignment
    pub fn set_gds_layer(&mut self, layer: LayerKey, spec: impl Into<String>) {
        let spec = spec.into();
        match self.gds_layers.iter_mut().find(|g| g.layer == layer) {
            Some(g) => g.spec = spec,
            None => self.gds_layers.push(GdsLayer { layer, spec }),
        }
    }
    /// Get the GDS spec of `layer`
    pub fn gds_layer(&self, layer: LayerKey) -> Option<&str> {
        self.gds_layers
            .iter()
            .find(|g| g.layer == layer)
            .map(|g| g.spec.as_str())
    }
}

/// # Palette Entry
/// Component-menu entries, shown by editors in rows.
/// Serialized as a `kind` tag and its `entry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entry")]
pub enum PaletteEntry {
    Arc(ArcKey),
    Node(NodeKey),
    /// Menu-label, e.g. "Pure" for the pure-layer-node sub-menu
    Label(String),
}

/// Serde helpers for palette rows.
/// Each row is written as a table of `entries`. TOML has no arrays of arrays of tables.
mod palette_rows {
    use super::PaletteEntry;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct RowRef<'a> {
        entries: &'a [PaletteEntry],
    }
    #[derive(Deserialize)]
    struct Row {
        #[serde(default)]
        entries: Vec<PaletteEntry>,
    }
    pub fn serialize<S: Serializer>(
        rows: &[Vec<PaletteEntry>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(rows.iter().map(|r| RowRef { entries: r }))
    }
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<PaletteEntry>>, D::Error> {
        let rows = Vec::<Row>::deserialize(deserializer)?;
        Ok(rows.into_iter().map(|r| r.entries).collect())
    }
}

/// # Technology Summary
/// Counts for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechSummary {
    pub name: String,
    pub description: String,
    pub layers: usize,
    pub arcs: usize,
    pub nodes: usize,
    pub rules: usize,
}

/// # Technology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    /// Technology Name, unique among technologies
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub description: String,
    pub scale: Scale,
    #[serde(default)]
    pub flags: TechFlags,
    #[serde(default)]
    pub foundries: Vec<Foundry>,
    /// Colors of the transparent planes, first plane first
    #[serde(default)]
    pub transparent_colors: Vec<Color>,
    pub layers: Layers,
    pub arcs: Arcs,
    pub nodes: Nodes,
    /// Component-menu rows
    #[serde(default, with = "palette_rows")]
    pub palette: Vec<Vec<PaletteEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<DesignRules>,
}
impl Technology {
    /// Create a new, empty [Technology]
    pub fn new(name: impl Into<String>, description: impl Into<String>, scale: Scale) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            description: description.into(),
            scale,
            flags: TechFlags::default(),
            foundries: Vec::new(),
            transparent_colors: Vec::new(),
            layers: Layers::default(),
            arcs: Arcs::default(),
            nodes: Nodes::default(),
            palette: Vec::new(),
            rules: None,
        }
    }
    /// Add a [Layer]. Layer order is significant; see [DesignRules].
    pub fn add_layer(&mut self, layer: Layer) -> TechResult<LayerKey> {
        self.layers.add(layer)
    }
    /// Add an [ArcProto]
    pub fn add_arc(&mut self, arc: ArcProto) -> TechResult<ArcKey> {
        self.arcs.add(arc)
    }
    /// Add a [PrimitiveNode]
    pub fn add_node(&mut self, node: PrimitiveNode) -> TechResult<NodeKey> {
        self.nodes.add(node)
    }
    /// Set `node` as the pure-layer node of `layer`
    pub fn set_pure_layer_node(&mut self, layer: LayerKey, node: NodeKey) -> TechResult<()> {
        if !self.nodes.contains(node) {
            return TechError::fail("Pure-layer node is not in this technology");
        }
        let layer = self
            .layers
            .get_mut(layer)
            .ok_or_else(|| TechError::msg("Layer is not in this technology"))?;
        layer.pure_layer_node = Some(node);
        Ok(())
    }
    /// Set simple design rules, from a row-major upper-triangle list of unconnected spacings
    pub fn set_unconnected_rules(&mut self, unconnected: &[Dist]) -> TechResult<()> {
        let rules = DesignRules::simple(self.layers.len(), None, Some(unconnected))?;
        self.rules = Some(rules);
        Ok(())
    }
    /// Get the [Layer] named `name`
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.by_name(name)
    }
    /// Get the [ArcProto] named `name`
    pub fn arc(&self, name: &str) -> Option<&ArcProto> {
        self.arcs.by_name(name)
    }
    /// Get the [PrimitiveNode] named `name`
    pub fn node(&self, name: &str) -> Option<&PrimitiveNode> {
        self.nodes.by_name(name)
    }
    /// Get the registration-order index of the layer named `name`
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.index(self.layers.key(name)?)
    }
    /// Get the pure-layer node of the layer named `name`
    pub fn pure_layer_node(&self, name: &str) -> Option<&PrimitiveNode> {
        let key = self.layer(name)?.pure_layer_node?;
        self.nodes.get(key)
    }
    /// Find the pin which extends arcs of kind `arc`:
    /// the first pin-function node whose first port accepts it.
    pub fn pin_for(&self, arc: ArcKey) -> Option<NodeKey> {
        self.nodes.iter().find_map(|(key, node)| {
            let first = node.ports.first()?;
            match node.function == NodeFunction::Pin && first.connects_to(arc) {
                true => Some(key),
                false => None,
            }
        })
    }
    /// Unconnected spacing between layers `a` and `b`, by name.
    /// `Ok(None)` if there is no such rule, including if we have no rules at all.
    pub fn unconnected_spacing(&self, a: &str, b: &str) -> TechResult<Option<Dist>> {
        let ia = self.require_layer_index(a)?;
        let ib = self.require_layer_index(b)?;
        Ok(self
            .rules
            .as_ref()
            .and_then(|r| r.spacing(ia, ib, false)))
    }
    /// Largest unconnected spacing in the technology. Zero if there are none.
    pub fn worst_spacing_distance(&self) -> Dist {
        self.rules
            .as_ref()
            .map_or(0.0, |r| r.worst_spacing_distance())
    }
    /// Largest unconnected spacing around the layer named `name`
    pub fn max_surround(&self, name: &str) -> TechResult<Option<Dist>> {
        let idx = self.require_layer_index(name)?;
        Ok(self.rules.as_ref().and_then(|r| r.max_surround(idx)))
    }
    fn require_layer_index(&self, name: &str) -> TechResult<usize> {
        let key = self.layers.require(name)?;
        self.layers
            .index(key)
            .ok_or_else(|| TechError::not_found("layer", name))
    }
    /// Summary counts
    pub fn summary(&self) -> TechSummary {
        TechSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            layers: self.layers.len(),
            arcs: self.arcs.len(),
            nodes: self.nodes.len(),
            rules: self.rules.as_ref().map_or(0, |r| r.num_rules()),
        }
    }
    /// Check internal consistency. See [TechValidator].
    pub fn validate(&self) -> TechResult<()> {
        TechValidator::new(self).validate()
    }
    /// Load from `fmt`-format file `fname`, and validate
    pub fn load(fname: impl AsRef<Path>, fmt: SerializationFormat) -> TechResult<Self> {
        let fname = fname.as_ref();
        let tech: Technology = SerdeFile::open(fname, fmt)?;
        tech.validate()?;
        info!("Loaded technology `{}` from {:?}", tech.name, fname);
        Ok(tech)
    }
    /// Save to `fmt`-format file `fname`
    pub fn store(&self, fname: impl AsRef<Path>, fmt: SerializationFormat) -> TechResult<()> {
        let fname = fname.as_ref();
        SerdeFile::save(self, fmt, fname)?;
        info!("Saved technology `{}` to {:?}", self.name, fname);
        Ok(())
    }
}
impl SerdeFile for Technology {}

///
/// # Technology Validator
///
/// Walks a [Technology], checking:
/// * Every layer, arc and port reference resolves within the technology
/// * Node-layer port indices are in range, and point counts match their representation
/// * Angles, offsets, sizes, opacity and transparency planes are in range
/// * Port names are unique per node
/// * Design-rule tables are sized for the layer count
///
/// Failures are reported with the stack of [ErrorContext]s leading to them.
///
pub struct TechValidator<'t> {
    tech: &'t Technology,
    stack: Vec<ErrorContext>,
}
impl<'t> TechValidator<'t> {
    pub fn new(tech: &'t Technology) -> Self {
        Self {
            tech,
            stack: vec![ErrorContext::Technology(tech.name.clone())],
        }
    }
    pub fn validate(&mut self) -> TechResult<()> {
        debug!("Validating technology `{}`", self.tech.name);
        let tech = self.tech;
        for (_, layer) in tech.layers.iter() {
            self.stack.push(ErrorContext::Layer(layer.name.clone()));
            self.layer(layer)?;
            self.stack.pop();
        }
        for (_, arc) in tech.arcs.iter() {
            self.stack.push(ErrorContext::Arc(arc.name.clone()));
            self.arc(arc)?;
            self.stack.pop();
        }
        for (_, node) in tech.nodes.iter() {
            self.stack.push(ErrorContext::Node(node.name.clone()));
            self.node(node)?;
            self.stack.pop();
        }
        for foundry in tech.foundries.iter() {
            self.stack.push(ErrorContext::Foundry(foundry.kind.to_string()));
            for gds in foundry.gds_layers.iter() {
                self.assert(tech.layers.contains(gds.layer), "GDS assignment to unknown layer")?;
            }
            self.stack.pop();
        }
        self.stack.push(ErrorContext::Palette);
        for entry in tech.palette.iter().flatten() {
            let ok = match entry {
                PaletteEntry::Arc(a) => tech.arcs.contains(*a),
                PaletteEntry::Node(n) => tech.nodes.contains(*n),
                PaletteEntry::Label(_) => true,
            };
            self.assert(ok, "Palette entry refers to an unknown arc or node")?;
        }
        self.stack.pop();
        if let Some(rules) = &tech.rules {
            self.stack.push(ErrorContext::Rules);
            self.assert(
                rules.connected.num_layers() == tech.layers.len()
                    && rules.unconnected.num_layers() == tech.layers.len(),
                format!(
                    "Rule tables sized for {} layers, technology has {}",
                    rules.unconnected.num_layers(),
                    tech.layers.len()
                ),
            )?;
            self.stack.pop();
        }
        Ok(())
    }
    fn layer(&self, layer: &Layer) -> TechResult<()> {
        let g = &layer.graphics;
        self.assert(
            (0.0..=1.0).contains(&g.opacity),
            format!("Opacity {} out of range", g.opacity),
        )?;
        if let Some(t) = g.transparent_layer {
            self.assert(
                t >= 1 && t <= MAX_TRANSPARENT_LAYER,
                format!("Transparent layer {} out of range", t),
            )?;
            self.assert(
                (t as usize) <= self.tech.transparent_colors.len(),
                format!("No color for transparent layer {}", t),
            )?;
        }
        if let Some(key) = layer.pure_layer_node {
            let node = self.tech.nodes.get(key).unwrapper(self, "Unknown pure-layer node")?;
            self.assert(
                node.function == NodeFunction::PureLayer,
                format!("Pure-layer node `{}` has function `{}`", node.name, node.function),
            )?;
        }
        Ok(())
    }
    fn arc(&self, arc: &ArcProto) -> TechResult<()> {
        self.assert(arc.default_width >= 0.0, "Negative default width")?;
        self.assert(
            arc.width_offset >= 0.0 && arc.width_offset <= arc.default_width,
            format!("Width offset {} out of range", arc.width_offset),
        )?;
        self.assert(arc.angle_increment < 360, "Angle increment out of range")?;
        for l in arc.layers.iter() {
            self.assert(self.tech.layers.contains(l.layer), "Unknown arc layer")?;
            self.assert(
                l.offset >= 0.0 && l.offset <= arc.default_width,
                format!("Layer offset {} out of range", l.offset),
            )?;
        }
        Ok(())
    }
    fn node(&mut self, node: &PrimitiveNode) -> TechResult<()> {
        self.assert(
            node.default_width >= 0.0 && node.default_height >= 0.0,
            "Negative default size",
        )?;
        if let Some(so) = node.size_offset {
            self.assert(
                so.lx >= 0.0 && so.hx >= 0.0 && so.ly >= 0.0 && so.hy >= 0.0,
                "Negative size offset",
            )?;
            self.assert(
                so.lx + so.hx <= node.default_width && so.ly + so.hy <= node.default_height,
                "Size offset exceeds the default size",
            )?;
        }
        for l in node.layers.iter() {
            self.assert(self.tech.layers.contains(l.layer), "Unknown node layer")?;
            if let Some(p) = l.port {
                self.assert(
                    p < node.ports.len(),
                    format!("Port index {} out of range", p),
                )?;
            }
            self.assert(
                l.representation.accepts(l.points.len()),
                format!(
                    "{} points invalid for representation `{}`",
                    l.points.len(),
                    l.representation
                ),
            )?;
            if l.serpentine.is_some() {
                self.assert(
                    matches!(node.special, Some(Special::Serpentine(_))),
                    "Serpentine extents on a non-serpentine node",
                )?;
            }
        }
        let mut names = HashSet::new();
        for port in node.ports.iter() {
            self.stack.push(ErrorContext::Port(port.name.clone()));
            self.assert(names.insert(port.name.as_str()), "Duplicate port name")?;
            self.assert(port.angle < 360, format!("Angle {} out of range", port.angle))?;
            self.assert(
                port.angle_range <= 180,
                format!("Angle range {} out of range", port.angle_range),
            )?;
            for arc in port.connections.iter() {
                self.assert(self.tech.arcs.contains(*arc), "Unknown connecting arc")?;
            }
            self.stack.pop();
        }
        Ok(())
    }
}
impl ErrorHelper for TechValidator<'_> {
    type Error = TechError;
    fn err(&self, msg: impl Into<String>) -> TechError {
        TechError::Validation {
            message: msg.into(),
            stack: self.stack.clone(),
        }
    }
}
