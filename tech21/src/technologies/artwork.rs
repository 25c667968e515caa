//!
//! # Artwork
//!
//! General-purpose, non-electrical drawing primitives: boxes, circles, polygons,
//! arrows and the lines which join them.
//!

// Local imports
use super::{point_port, tp};
use crate::arc::{ArcFunction, ArcKey, ArcLayer, ArcProto};
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::graphics::{Color, Graphics, Stipple};
use crate::layer::{FunctionExtras, Layer, LayerFunction, LayerKey};
use crate::node::{NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort, Representation};
use crate::poly::PolyStyle;
use crate::tech::{Foundry, FoundryKind, Scale, Technology};

/// Build the Artwork [Technology]
pub fn artwork() -> TechResult<Technology> {
    let mut tech = Technology::new(
        "artwork",
        "General-purpose artwork components",
        Scale::nanometers(2000.0, false),
    );
    tech.short_name = Some("Artwork".into());
    tech.flags.non_standard = true;
    tech.flags.non_electrical = true;
    tech.flags.no_negated_arcs = true;
    tech.flags.static_technology = true;

    let graphics = tech.add_layer(
        Layer::new("Graphics", Graphics::new(0, Color::BLACK, Stipple::SOLID))
            .with_function(LayerFunction::Art, FunctionExtras::NONELEC)
            .with_dxf("OBJECT"),
    )?;
    let mut foundry = Foundry::new(FoundryKind::None);
    foundry.set_gds_layer(graphics, "1");
    tech.foundries.push(foundry);

    // Every arc is a zero-width line, differing only in its dashing
    let arc_styles = [
        ("Solid", PolyStyle::Filled),
        ("Dotted", PolyStyle::OpenedDotted),
        ("Dashed", PolyStyle::OpenedDashed),
        ("Thicker", PolyStyle::OpenedThick),
    ];
    let mut arcs: Vec<ArcKey> = Vec::new();
    for (name, style) in arc_styles {
        let arc = ArcProto::new(name, 0.0, vec![ArcLayer::new(graphics, 0.0, style)])
            .with_function(ArcFunction::NonElectrical)
            .with_angles(false, 0)
            .with_curvable()
            .with_wipable();
        arcs.push(tech.add_arc(arc)?);
    }

    // Outlines
    let center_to_right = vec![TechPoint::center(), tp(EdgeH::right_edge(), EdgeV::center())];
    let zigzag = vec![
        TechPoint::lower_left(),
        tp(EdgeH::new(-0.125, 0.0), EdgeV::top_edge()),
        tp(EdgeH::new(0.125, 0.0), EdgeV::bottom_edge()),
        TechPoint::upper_right(),
    ];
    let triangle = vec![
        TechPoint::lower_left(),
        tp(EdgeH::right_edge(), EdgeV::bottom_edge()),
        tp(EdgeH::center(), EdgeV::top_edge()),
    ];
    // Outer box, then the minimum box, of the polygon nodes
    let polygon = vec![
        tp(EdgeH::left_edge(), EdgeV::center()),
        tp(EdgeH::center(), EdgeV::top_edge()),
        tp(EdgeH::right_edge(), EdgeV::bottom_edge()),
        tp(EdgeH::center(), EdgeV::bottom_edge()),
    ];

    let edge_select = NodeFlags {
        edge_select: true,
        ..Default::default()
    };
    let outline = NodeFlags {
        holds_outline: true,
        edge_select: true,
        ..Default::default()
    };

    let pin = PrimitiveNode::new(
        "Pin",
        1.0,
        1.0,
        vec![points(graphics, PolyStyle::Disc, center_to_right.clone())],
    )
    .with_function(NodeFunction::Pin)
    .with_ports(vec![point_port("site", arcs.clone(), TechPoint::center(), 0, 180, 0)])
    .with_flags(NodeFlags::pin());
    tech.add_node(pin)?;

    // (name, port name, port angle-range, style, representation, points, flags)
    let art: Vec<(&str, &str, u16, PolyStyle, Representation, Vec<TechPoint>, NodeFlags)> = vec![
        ("Box", "box", 0, PolyStyle::Closed, Representation::Box, full(), edge_select),
        ("Crossed-Box", "fbox", 0, PolyStyle::Crossed, Representation::Box, full(), NodeFlags::default()),
        ("Filled-Box", "fbox", 0, PolyStyle::Filled, Representation::Box, full(), edge_select),
        ("Circle", "site", 180, PolyStyle::Circle, Representation::Points, center_to_right.clone(), edge_select),
        (
            "Filled-Circle",
            "site",
            180,
            PolyStyle::Disc,
            Representation::Points,
            center_to_right.clone(),
            NodeFlags {
                square: true,
                edge_select: true,
                ..Default::default()
            },
        ),
        ("Spline", "site", 180, PolyStyle::Opened, Representation::Points, zigzag.clone(), outline),
        ("Triangle", "triangle", 0, PolyStyle::Closed, Representation::Points, triangle.clone(), edge_select),
        ("Filled-Triangle", "ftriangle", 0, PolyStyle::Filled, Representation::Points, triangle, edge_select),
    ];
    for (name, port, range, style, rep, pts, flags) in art {
        tech.add_node(art_node(name, graphics, &arcs, port, range, style, rep, pts, flags))?;
    }

    let arrow = PrimitiveNode::new(
        "Arrow",
        2.0,
        2.0,
        vec![points(
            graphics,
            PolyStyle::Opened,
            vec![
                tp(EdgeH::left_edge(), EdgeV::top_edge()),
                tp(EdgeH::right_edge(), EdgeV::center()),
                TechPoint::lower_left(),
            ],
        )],
    )
    .with_function(NodeFunction::Art)
    .with_ports(vec![point_port(
        "arrow",
        arcs.clone(),
        tp(EdgeH::right_edge(), EdgeV::center()),
        0,
        180,
        0,
    )])
    .with_flags(edge_select);
    tech.add_node(arrow)?;

    let polygons = [
        ("Opened-Polygon", PolyStyle::Opened, Representation::Points, zigzag.clone()),
        ("Opened-Dotted-Polygon", PolyStyle::OpenedDotted, Representation::Points, zigzag.clone()),
        ("Opened-Dashed-Polygon", PolyStyle::OpenedDashed, Representation::Points, zigzag.clone()),
        ("Opened-Thicker-Polygon", PolyStyle::OpenedThick, Representation::Points, zigzag),
        ("Closed-Polygon", PolyStyle::Closed, Representation::MinBox, polygon.clone()),
        ("Filled-Polygon", PolyStyle::Filled, Representation::MinBox, polygon),
    ];
    for (name, style, rep, pts) in polygons {
        tech.add_node(art_node(name, graphics, &arcs, "site", 180, style, rep, pts, outline))?;
    }
    tech.add_node(art_node(
        "Thick-Circle",
        graphics,
        &arcs,
        "site",
        180,
        PolyStyle::ThickCircle,
        Representation::Points,
        center_to_right,
        edge_select,
    ))?;
    Ok(tech)
}

fn full() -> Vec<TechPoint> {
    TechPoint::full_box().to_vec()
}

fn points(layer: LayerKey, style: PolyStyle, pts: Vec<TechPoint>) -> NodeLayer {
    NodeLayer::points(layer, Some(0), style, pts)
}

/// Six-by-six art node, with a single full-node port accepting every artwork arc.
/// Ports with a zero angle-range face left; the rest are isotropic.
#[allow(clippy::too_many_arguments)]
fn art_node(
    name: &str,
    layer: LayerKey,
    arcs: &[ArcKey],
    port: &str,
    range: u16,
    style: PolyStyle,
    representation: Representation,
    pts: Vec<TechPoint>,
    flags: NodeFlags,
) -> PrimitiveNode {
    let angle = if range == 0 { 180 } else { 0 };
    let layers = vec![NodeLayer::new(layer, Some(0), style, representation, pts)];
    PrimitiveNode::new(name, 6.0, 6.0, layers)
        .with_function(NodeFunction::Art)
        .with_ports(vec![
            PrimitivePort::new(port, arcs.to_vec()).with_angles(angle, range)
        ])
        .with_flags(flags)
}
