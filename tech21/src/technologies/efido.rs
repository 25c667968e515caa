//!
//! # EFIDO
//!
//! Digital-filter block diagrams: adders, multipliers, delays and the wires between them.
//!

// Local imports
use super::{frac, point_port, tp};
use crate::arc::{ArcFunction, ArcKey, ArcLayer, ArcProto};
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::graphics::{Color, Graphics, Stipple};
use crate::layer::{FunctionExtras, Layer, LayerFunction, LayerKey};
use crate::node::{NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort};
use crate::poly::PolyStyle;
use crate::tech::{Foundry, FoundryKind, PaletteEntry, Scale, Technology};

/// Offset of the diagonal input ports, on the unit circle at 45 degrees
const DIAGONAL: f64 = 0.3535534;

/// Build the EFIDO [Technology]
pub fn efido() -> TechResult<Technology> {
    let mut tech = Technology::new("efido", "Digital Filters", Scale::nanometers(10000.0, false));
    tech.flags.no_negated_arcs = true;
    tech.flags.static_technology = true;
    tech.foundries.push(Foundry::new(FoundryKind::None));
    let (red, blue, green) = (
        Color::new(255, 0, 0),
        Color::new(0, 0, 255),
        Color::new(0, 155, 80),
    );
    tech.transparent_colors = vec![red, blue, green, Color::BLACK, Color::BLACK];

    let node_layer = tech.add_layer(
        Layer::new("Node", Graphics::new(1, red, Stipple::EMPTY))
            .with_function(LayerFunction::Art, FunctionExtras::NONELEC),
    )?;
    let arc_layer = tech.add_layer(Layer::new("Arc", Graphics::new(2, blue, Stipple::EMPTY)))?;
    let outpad = tech.add_layer(
        Layer::new("Outpad", Graphics::new(3, green, Stipple::EMPTY))
            .with_function(LayerFunction::Overglass, FunctionExtras::NONE),
    )?;

    let wire = tech.add_arc(
        ArcProto::new("wire", 0.0, vec![ArcLayer::new(arc_layer, 0.0, PolyStyle::Closed)])
            .with_function(ArcFunction::Metal1)
            .with_angles(true, 45),
    )?;
    let bus = tech.add_arc(
        ArcProto::new("bus", 2.0, vec![ArcLayer::new(arc_layer, 0.0, PolyStyle::Closed)])
            .with_function(ArcFunction::Bus)
            .with_angles(true, 45),
    )?;

    // Shared outlines
    let center_to_right = vec![TechPoint::center(), tp(EdgeH::right_edge(), EdgeV::center())];
    let out_stem = vec![frac(0.3, 0.0), tp(EdgeH::right_edge(), EdgeV::center())];
    let out_head = vec![
        frac(0.4, 0.1),
        tp(EdgeH::right_edge(), EdgeV::center()),
        frac(0.4, -0.1),
    ];
    let full = TechPoint::full_box();
    let (opened, closed) = (PolyStyle::Opened, PolyStyle::Closed);
    let pts = |key: LayerKey, port: Option<usize>, style: PolyStyle, points: Vec<TechPoint>| {
        NodeLayer::points(key, port, style, points)
    };

    let wire_pin = tech.add_node(
        PrimitiveNode::new(
            "wire_pin",
            1.0,
            1.0,
            vec![pts(arc_layer, Some(0), PolyStyle::Disc, center_to_right.clone())],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![point_port("wire", vec![wire], TechPoint::center(), 0, 180, 0)])
        .with_flags(NodeFlags {
            wipe_on_1_or_2: true,
            square: true,
            ..Default::default()
        }),
    )?;
    let bus_pin = tech.add_node(
        PrimitiveNode::new(
            "bus_pin",
            2.0,
            2.0,
            vec![NodeLayer::boxed(node_layer, Some(0), PolyStyle::Crossed, full)],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![point_port("bus", vec![bus], TechPoint::center(), 0, 180, 0)])
        .with_flags(NodeFlags::pin()),
    )?;

    // Arithmetic blocks: a circle with its operator, and an output arrow tied to port five
    let circle = pts(node_layer, None, PolyStyle::Circle, center_to_right.clone());
    let arrow = |port: usize| {
        [
            pts(node_layer, Some(port), opened, out_stem.clone()),
            pts(node_layer, Some(port), opened, out_head.clone()),
        ]
    };
    let sigma = vec![
        frac(0.25, 0.25),
        frac(-0.25, 0.25),
        TechPoint::center(),
        frac(-0.25, -0.25),
        frac(0.25, -0.25),
    ];
    let minus = vec![frac(-0.25, 0.0), frac(0.25, 0.0)];
    let square = NodeFlags {
        square: true,
        ..Default::default()
    };

    let [stem, head]: [NodeLayer; 2] = arrow(5);
    let adder_layers = vec![
        pts(node_layer, None, opened, sigma),
        stem,
        circle.clone(),
        head,
    ];
    let adder = tech.add_node(
        PrimitiveNode::new("adder", 4.0, 4.0, adder_layers)
            .with_ports(five_inputs(wire))
            .with_flags(square),
    )?;

    let mut multiplier_layers = vec![
        pts(node_layer, None, opened, vec![frac(0.25, 0.25), frac(-0.25, -0.25)]),
        pts(node_layer, None, opened, vec![frac(-0.25, 0.25), frac(0.25, -0.25)]),
        circle.clone(),
    ];
    multiplier_layers.extend(arrow(5));
    let multiplier = tech.add_node(
        PrimitiveNode::new("multiplier", 4.0, 4.0, multiplier_layers)
            .with_ports(five_inputs(wire))
            .with_flags(square),
    )?;

    let timedelay = tech.add_node(
        PrimitiveNode::new(
            "timedelay",
            4.0,
            4.0,
            vec![
                pts(node_layer, None, opened, vec![frac(-0.25, 0.25), frac(0.25, 0.25)]),
                pts(node_layer, None, opened, vec![frac(0.0, 0.25), frac(0.0, -0.25)]),
                pts(node_layer, Some(1), opened, out_stem.clone()),
                NodeLayer::boxed(node_layer, None, closed, full),
                pts(node_layer, Some(1), opened, out_head.clone()),
            ],
        )
        .with_ports(vec![
            point_port("in", vec![wire], tp(EdgeH::left_edge(), EdgeV::center()), 180, 15, 0),
            point_port("out", vec![wire], tp(EdgeH::right_edge(), EdgeV::center()), 0, 45, 1),
        ]),
    )?;

    let multiplexer = tech.add_node(
        PrimitiveNode::new(
            "multiplexer",
            4.0,
            4.0,
            vec![
                pts(
                    node_layer,
                    None,
                    opened,
                    vec![frac(-0.2, -0.05), frac(-0.25, -0.25), frac(-0.1, -0.3)],
                ),
                pts(
                    node_layer,
                    Some(1),
                    opened,
                    vec![tp(EdgeH::left_edge(), EdgeV::new(0.25, 0.0)), frac(-0.25, 0.25)],
                ),
                pts(
                    node_layer,
                    None,
                    opened,
                    vec![
                        tp(EdgeH::left_edge(), EdgeV::new(-0.25, 0.0)),
                        frac(-0.25, -0.25),
                        frac(0.25, 0.0),
                        tp(EdgeH::right_edge(), EdgeV::center()),
                    ],
                ),
                NodeLayer::boxed(node_layer, None, closed, full),
            ],
        )
        .with_ports(vec![
            point_port("in1", vec![wire], tp(EdgeH::left_edge(), EdgeV::new(0.25, 0.0)), 270, 15, 1),
            point_port("in2", vec![wire], tp(EdgeH::left_edge(), EdgeV::new(-0.25, 0.0)), 135, 15, 0),
            point_port("out", vec![wire], tp(EdgeH::right_edge(), EdgeV::center()), 0, 45, 2),
        ]),
    )?;

    let mut subtractor_layers = vec![pts(node_layer, None, opened, minus.clone())];
    subtractor_layers.extend(arrow(5));
    subtractor_layers.push(circle.clone());
    let subtractor = tech.add_node(
        PrimitiveNode::new("subtractor", 4.0, 4.0, subtractor_layers)
            .with_ports(five_inputs(wire))
            .with_flags(square),
    )?;

    let mut divider_layers = vec![
        pts(node_layer, None, opened, vec![frac(-0.05, -0.25), frac(0.05, -0.25)]),
        pts(node_layer, None, opened, minus),
        pts(node_layer, None, opened, vec![frac(-0.05, 0.25), frac(0.05, 0.25)]),
    ];
    // The divider draws its arrow head before the stem
    let [stem, head]: [NodeLayer; 2] = arrow(4);
    divider_layers.extend([head, stem, circle]);
    let divider = tech.add_node(
        PrimitiveNode::new("divider", 4.0, 4.0, divider_layers)
            .with_ports(five_inputs(wire))
            .with_flags(square),
    )?;

    let inner = [frac(-0.25, -0.25), frac(0.25, 0.25)];
    let pad = |name: &str, cross: LayerKey, port: &str| {
        PrimitiveNode::new(
            name,
            4.0,
            4.0,
            vec![
                NodeLayer::boxed(cross, Some(0), PolyStyle::Crossed, inner),
                NodeLayer::boxed(node_layer, Some(0), closed, TechPoint::full_box()),
            ],
        )
        .with_function(NodeFunction::Connect)
        .with_ports(vec![point_port(port, vec![wire], TechPoint::center(), 0, 180, 0)])
    };
    let padin = tech.add_node(pad("padin", node_layer, "out"))?;
    let padout = tech.add_node(pad("padout", outpad, "in"))?;

    use PaletteEntry::{Arc, Label, Node};
    tech.palette = vec![
        vec![Arc(wire), Node(multiplier)],
        vec![Arc(bus), Node(timedelay)],
        vec![Label("Cell".into()), Node(multiplexer)],
        vec![Label("Misc.".into()), Node(subtractor)],
        vec![Label("Pure".into()), Node(divider)],
        vec![Node(wire_pin), Node(padin)],
        vec![Node(bus_pin), Node(padout)],
        vec![Node(adder)],
    ];
    Ok(tech)
}

/// The five inputs and one output shared by the arithmetic blocks.
/// Inputs sit on the circle from top to bottom, counter-clockwise; the output on the right.
fn five_inputs(wire: ArcKey) -> Vec<PrimitivePort> {
    let d = DIAGONAL;
    let top = tp(EdgeH::center(), EdgeV::top_edge());
    let left = tp(EdgeH::left_edge(), EdgeV::center());
    let bottom = tp(EdgeH::center(), EdgeV::bottom_edge());
    let right = tp(EdgeH::right_edge(), EdgeV::center());
    vec![
        point_port("in1", vec![wire], top, 270, 15, 4),
        point_port("in2", vec![wire], frac(-d, d), 225, 15, 0),
        point_port("in3", vec![wire], left, 180, 15, 1),
        point_port("in4", vec![wire], frac(-d, -d), 135, 15, 2),
        point_port("in5", vec![wire], bottom, 90, 15, 3),
        point_port("out", vec![wire], right, 0, 45, 5),
    ]
}
