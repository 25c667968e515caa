//!
//! # GEM
//!
//! Temporal specification diagrams: elements and groups of events,
//! joined by general, temporal, causal, prerequisite and nondeterministic relations.
//!

// Local imports
use super::{edges, point_port, tp};
use crate::arc::{ArcFunction, ArcKey, ArcLayer, ArcProto};
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::graphics::{Color, Graphics, Outline, Stipple};
use crate::layer::{FunctionExtras, Layer, LayerFunction, LayerKey};
use crate::node::{NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort};
use crate::poly::PolyStyle;
use crate::tech::{Foundry, FoundryKind, PaletteEntry, Scale, Technology};

/// Build the GEM [Technology]
pub fn gem() -> TechResult<Technology> {
    let mut tech = Technology::new(
        "gem",
        "Temporal Specification Facility (from Lansky)",
        Scale::nanometers(1000.0, false),
    );
    tech.flags.no_negated_arcs = true;
    tech.flags.static_technology = true;
    tech.foundries.push(Foundry::new(FoundryKind::None));
    let (red, blue, green) = (
        Color::new(255, 0, 0),
        Color::new(0, 0, 255),
        Color::new(0, 155, 80),
    );
    tech.transparent_colors = vec![red, blue, green, Color::BLACK, Color::BLACK];

    let art = |name: &str, graphics: Graphics| {
        Layer::new(name, graphics).with_function(LayerFunction::Art, FunctionExtras::NONELEC)
    };
    let element = tech.add_layer(art("Element", Graphics::new(1, red, Stipple::EMPTY)))?;
    let general = tech.add_layer(art("General-arc", Graphics::new(2, blue, Stipple::EMPTY)))?;
    let temporal = tech.add_layer(art("Temporal-arc", Graphics::new(3, green, Stipple::EMPTY)))?;
    // Relations other than general and temporal are drawn black, told apart by their outline
    let dashed = |outline: Outline| {
        Graphics::new(0, Color::BLACK, Stipple::EMPTY).patterned(true, true, outline)
    };
    let causal = tech.add_layer(art("Causal-arc", dashed(Outline::Solid)))?;
    let prereq = tech.add_layer(art("Prerequisite-arc", dashed(Outline::DashedShort)))?;
    let nondet = tech.add_layer(art("Nondeterministic-arc", dashed(Outline::DottedClose)))?;
    let fork = tech.add_layer(art(
        "Nondeterministic-fork-arc",
        dashed(Outline::DottedDashedShort),
    ))?;

    let relation = |name: &str, layer: LayerKey| {
        ArcProto::new(name, 0.0, vec![ArcLayer::new(layer, 0.0, PolyStyle::Filled)])
            .with_function(ArcFunction::NonElectrical)
            .with_angles(false, 0)
    };
    let mut arcs: Vec<ArcKey> = Vec::new();
    for (name, layer) in [
        ("General", general),
        ("Temporal", temporal),
        ("Causal", causal),
        ("Prerequisite", prereq),
        ("Nondeterministic", nondet),
        ("Nondeterministic-Fork", fork),
    ] {
        arcs.push(tech.add_arc(relation(name, layer))?);
    }

    let pin = tech.add_node(
        PrimitiveNode::new(
            "General-Pin",
            1.0,
            1.0,
            vec![NodeLayer::points(
                general,
                Some(0),
                PolyStyle::Disc,
                vec![TechPoint::center(), tp(EdgeH::right_edge(), EdgeV::center())],
            )],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![point_port("pin", arcs.clone(), TechPoint::center(), 0, 180, 0)])
        .with_flags(NodeFlags {
            wipe_on_1_or_2: true,
            square: true,
            ..Default::default()
        }),
    )?;

    // Elements: an outlined event with four relation ports, two on each side
    let side_port = |name: &str, x: EdgeH, y: EdgeV, angle: u16, topology: usize| {
        point_port(name, arcs.clone(), tp(x, y), angle, 45, topology)
    };
    let quarter_up = EdgeV::new(0.25, 0.0);
    let quarter_down = EdgeV::new(-0.25, 0.0);
    let element_node = tech.add_node(
        PrimitiveNode::new(
            "Element",
            8.0,
            8.0,
            vec![
                NodeLayer::points(
                    element,
                    None,
                    PolyStyle::Circle,
                    vec![TechPoint::center(), tp(EdgeH::right_edge(), EdgeV::center())],
                ),
                NodeLayer::boxed(
                    element,
                    None,
                    PolyStyle::TextCenter,
                    edges(EdgeH::from_left(2.), EdgeV::from_bottom(2.), EdgeH::from_right(2.), EdgeV::from_top(2.)),
                ),
            ],
        )
        .with_ports(vec![
            side_port("port1", EdgeH::left_edge(), quarter_up, 180, 0),
            side_port("port2", EdgeH::left_edge(), quarter_down, 180, 1),
            side_port("port3", EdgeH::right_edge(), quarter_up, 0, 2),
            side_port("port4", EdgeH::right_edge(), quarter_down, 0, 3),
        ]),
    )?;

    // Groups: a closed box which relations may attach to anywhere along its edge
    let group = tech.add_node(
        PrimitiveNode::new(
            "Group",
            10.0,
            10.0,
            vec![NodeLayer::boxed(
                element,
                Some(0),
                PolyStyle::Closed,
                TechPoint::full_box(),
            )],
        )
        .with_ports(vec![PrimitivePort::new("group", arcs.clone())])
        .with_flags(NodeFlags {
            edge_select: true,
            ..Default::default()
        }),
    )?;

    use PaletteEntry::{Arc, Label, Node};
    tech.palette = vec![
        vec![Arc(arcs[0]), Node(pin)],
        vec![Arc(arcs[1]), Node(element_node)],
        vec![Arc(arcs[2]), Node(group)],
        vec![Arc(arcs[3]), Label("Cell".into())],
        vec![Arc(arcs[4]), Label("Misc.".into())],
        vec![Arc(arcs[5]), Label("Pure".into())],
    ];
    Ok(tech)
}
