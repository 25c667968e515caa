//!
//! # Generic
//!
//! Primitives shared by every other technology: universal, invisible and unrouted
//! connections, cell-alignment markers, simulation markers and rule-checker exclusions.
//!

// Local imports
use super::{pure_layer_node, tp};
use crate::arc::{ArcFunction, ArcLayer, ArcProto};
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::graphics::{Color, Graphics, Stipple};
use crate::layer::{FunctionExtras, Layer, LayerFunction};
use crate::node::{NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort};
use crate::poly::PolyStyle;
use crate::tech::{Foundry, FoundryKind, PaletteEntry, Scale, Technology};

/// Build the Generic [Technology]
pub fn generic() -> TechResult<Technology> {
    let mut tech = Technology::new("generic", "Useful primitives", Scale::nanometers(1000.0, false));
    tech.flags.non_standard = true;
    tech.flags.no_primitives = true;
    tech.flags.static_technology = true;
    tech.foundries.push(Foundry::new(FoundryKind::None));

    let nonelec = |name: &str, color: Color, pattern: Stipple| {
        Layer::new(name, Graphics::new(0, color, pattern).with_opacity(1.0))
            .with_function(LayerFunction::Art, FunctionExtras::NONELEC)
    };
    let universal = tech.add_layer(Layer::new(
        "Universal",
        Graphics::new(0, Color::BLACK, Stipple::SOLID).with_opacity(1.0),
    ))?;
    let glyph = tech.add_layer(nonelec("Glyph", Color::BLACK, Stipple::EMPTY))?;
    let drc = tech.add_layer(nonelec(
        "DRC",
        Color::new(255, 190, 6),
        Stipple::tiled([0x4444, 0x1111, 0x4444, 0x1111, 0x4444, 0x1111, 0x4444, 0x1111]),
    ))?;
    let afg = tech.add_layer(nonelec(
        "AFG",
        Color::new(255, 0, 0),
        Stipple::tiled([0x8888, 0x2222, 0x8888, 0x2222, 0x8888, 0x2222, 0x8888, 0x2222]),
    ))?;
    let sim_layer = tech.add_layer(nonelec("Simulation-Probe", Color::new(0, 255, 0), Stipple::SOLID))?;

    let line = |name: &str, layer, function| {
        ArcProto::new(name, 0.0, vec![ArcLayer::new(layer, 0.0, PolyStyle::Filled)])
            .with_function(function)
            .with_angles(false, 0)
    };
    let universal_arc = tech.add_arc(line("Universal", universal, ArcFunction::Unknown))?;
    let invisible_arc = tech.add_arc(line("Invisible", glyph, ArcFunction::NonElectrical))?;
    let unrouted_arc = tech.add_arc(line("Unrouted", glyph, ArcFunction::Unrouted))?;

    let center_to_right = vec![TechPoint::center(), tp(EdgeH::right_edge(), EdgeV::center())];
    let pin_flags = NodeFlags {
        wipe_on_1_or_2: true,
        square: true,
        ..Default::default()
    };
    let universal_pin = tech.add_node(
        PrimitiveNode::new(
            "Universal-Pin",
            1.0,
            1.0,
            vec![NodeLayer::points(universal, Some(0), PolyStyle::Disc, center_to_right.clone())],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![PrimitivePort::new(
            "univ",
            vec![universal_arc, invisible_arc, unrouted_arc],
        )
        .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(pin_flags),
    )?;
    let invisible_pin = tech.add_node(
        PrimitiveNode::new(
            "Invisible-Pin",
            1.0,
            1.0,
            vec![NodeLayer::boxed(glyph, Some(0), PolyStyle::Closed, TechPoint::full_box())],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![PrimitivePort::new("center", vec![invisible_arc, universal_arc])
            .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(pin_flags),
    )?;
    let unrouted_pin = tech.add_node(
        PrimitiveNode::new(
            "Unrouted-Pin",
            1.0,
            1.0,
            vec![NodeLayer::points(glyph, Some(0), PolyStyle::Disc, center_to_right)],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![PrimitivePort::new(
            "unrouted",
            vec![unrouted_arc, invisible_arc, universal_arc],
        )
        .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(pin_flags),
    )?;

    // Markers, without connections
    let cell_center = tech.add_node(
        PrimitiveNode::new(
            "Facet-Center",
            0.0,
            0.0,
            vec![
                NodeLayer::boxed(glyph, None, PolyStyle::Closed, TechPoint::full_box()),
                NodeLayer::boxed(glyph, None, PolyStyle::BigCross, TechPoint::center_box()),
            ],
        )
        .with_function(NodeFunction::Align)
        .with_ports(vec![PrimitivePort::new("center", vec![invisible_arc, universal_arc])
            .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(NodeFlags {
            can_shrink: true,
            ..Default::default()
        }),
    )?;
    let port = tech.add_node(
        PrimitiveNode::new(
            "Port",
            6.0,
            6.0,
            vec![NodeLayer::boxed(glyph, None, PolyStyle::Closed, TechPoint::indented(2.0))],
        )
        .with_function(NodeFunction::Connect)
        .with_ports(vec![PrimitivePort::new("center", vec![invisible_arc, universal_arc])
            .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(NodeFlags {
            can_shrink: true,
            ..Default::default()
        }),
    )?;
    let essential = tech.add_node(
        PrimitiveNode::new(
            "Essential-Bounds",
            0.0,
            0.0,
            vec![NodeLayer::points(
                glyph,
                None,
                PolyStyle::Opened,
                vec![
                    tp(EdgeH::from_center(-1.), EdgeV::center()),
                    TechPoint::center(),
                    tp(EdgeH::center(), EdgeV::from_center(-1.)),
                ],
            )],
        )
        .with_function(NodeFunction::Align)
        .with_ports(vec![PrimitivePort::new("center", vec![invisible_arc, universal_arc])
            .with_edges(EdgeH::center(), EdgeV::center(), EdgeH::center(), EdgeV::center())])
        .with_flags(NodeFlags {
            can_shrink: true,
            ..Default::default()
        }),
    )?;
    let sim_node = tech.add_node(
        PrimitiveNode::new(
            "Simulation-Probe",
            10.0,
            10.0,
            vec![NodeLayer::boxed(sim_layer, Some(0), PolyStyle::Filled, TechPoint::full_box())],
        )
        .with_function(NodeFunction::Art)
        .with_ports(vec![PrimitivePort::new("center", vec![invisible_arc, universal_arc])]),
    )?;

    // Exclusion regions
    let drc_node = tech.add_node(pure_layer_node(
        "DRC-Node",
        drc,
        PolyStyle::Filled,
        2.0,
        "center",
        vec![],
    ))?;
    tech.set_pure_layer_node(drc, drc_node)?;
    let afg_node = tech.add_node(pure_layer_node(
        "AFG-Node",
        afg,
        PolyStyle::Filled,
        2.0,
        "center",
        vec![],
    ))?;
    tech.set_pure_layer_node(afg, afg_node)?;

    use PaletteEntry::{Arc, Node};
    tech.palette = vec![
        vec![Arc(universal_arc), Node(universal_pin)],
        vec![Arc(invisible_arc), Node(invisible_pin)],
        vec![Arc(unrouted_arc), Node(unrouted_pin)],
        vec![Node(cell_center), Node(port)],
        vec![Node(essential), Node(sim_node)],
        vec![Node(drc_node), Node(afg_node)],
    ];
    Ok(tech)
}
