//!
//! # Built-In Technologies
//!
//! Each technology is built by a function returning a freshly populated [Technology].
//! Layers are added first, then arcs, then nodes, since each refers to its predecessors.
//!

// Crates.io
use log::debug;

// Local imports
use crate::arc::ArcKey;
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::geom::Dist;
use crate::layer::LayerKey;
use crate::node::{NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort, Special};
use crate::poly::PolyStyle;
use crate::tech::Technology;

mod artwork;
mod cmos;
mod efido;
mod gem;
mod generic;

pub use artwork::artwork;
pub use cmos::cmos;
pub use efido::efido;
pub use gem::gem;
pub use generic::generic;

/// Names of the built-in technologies, in [builtin] order
pub const BUILTIN_NAMES: [&str; 5] = ["artwork", "cmos", "efido", "gem", "generic"];

/// Build and validate every built-in technology
pub fn builtin() -> TechResult<Vec<Technology>> {
    let techs = vec![artwork()?, cmos()?, efido()?, gem()?, generic()?];
    for tech in techs.iter() {
        tech.validate()?;
        debug!("Built technology `{}`: {:?}", tech.name, tech.summary());
    }
    Ok(techs)
}

/// Shorthand for a [TechPoint]
pub(crate) fn tp(x: EdgeH, y: EdgeV) -> TechPoint {
    TechPoint::new(x, y)
}

/// Box between the `left`, `bottom`, `right` and `top` edges
pub(crate) fn edges(left: EdgeH, bottom: EdgeV, right: EdgeH, top: EdgeV) -> [TechPoint; 2] {
    [tp(left, bottom), tp(right, top)]
}

/// Point at fractional position (`x`, `y`) of the node size, relative to its center
pub(crate) fn frac(x: f64, y: f64) -> TechPoint {
    tp(EdgeH::new(x, 0.0), EdgeV::new(y, 0.0))
}

/// Port at a single point, the common case for schematic-like technologies
pub(crate) fn point_port(
    name: &str,
    connections: Vec<ArcKey>,
    at: TechPoint,
    angle: u16,
    range: u16,
    topology: usize,
) -> PrimitivePort {
    PrimitivePort::new(name, connections)
        .with_angles(angle, range)
        .with_topology(topology)
        .with_edges(at.x, at.y, at.x, at.y)
}

/// Pure-layer node: `layer` drawn across the full node, with one full-node port
pub(crate) fn pure_layer_node(
    name: &str,
    layer: LayerKey,
    style: PolyStyle,
    size: Dist,
    port: &str,
    connections: Vec<ArcKey>,
) -> PrimitiveNode {
    let layers = vec![NodeLayer::boxed(layer, Some(0), style, TechPoint::full_box())];
    PrimitiveNode::new(name, size, size, layers)
        .with_function(NodeFunction::PureLayer)
        .with_ports(vec![PrimitivePort::new(port, connections)])
        .with_special(Special::Polygonal)
        .with_flags(NodeFlags::outline())
}
