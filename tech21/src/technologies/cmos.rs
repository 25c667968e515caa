//!
//! # Generic CMOS
//!
//! N-well CMOS, Griswold rules. Two-micron lambda.
//!

// Local imports
use super::{edges, pure_layer_node};
use crate::arc::{ArcFunction, ArcLayer, ArcProto};
use crate::drc::NO_RULE;
use crate::edge::{EdgeH, EdgeV, TechPoint};
use crate::error::TechResult;
use crate::geom::Dist;
use crate::graphics::{Color, Graphics, Stipple};
use crate::layer::{FunctionExtras, Layer, LayerFunction};
use crate::node::{
    MultiCut, NodeFlags, NodeFunction, NodeLayer, PrimitiveNode, PrimitivePort, Serpentine,
    SizeOffset, Special,
};
use crate::poly::PolyStyle;
use crate::tech::{Foundry, FoundryKind, PaletteEntry, Scale, Technology};

const XX: Dist = NO_RULE;

/// Unconnected spacings, upper triangle in layer order:
/// Metal, Polysilicon, Diffusion, P+, Contact-Cut, Ohmic-Cut, P-Well, Overglass,
/// Transistor, then the five pseudo-layers.
#[rustfmt::skip]
const UNCONNECTED: [Dist; 105] = [
    3.0, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX,
         2.0, 1.0, 2.0, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX,
              3.0, 2.0, XX, 5.0, XX, XX, XX, XX, XX, XX, XX, XX,
                   2.0, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX,
                        XX, XX, XX, XX, 2.0, XX, XX, XX, XX, XX,
                            XX, XX, XX, 2.0, XX, XX, XX, XX, XX,
                                2.0, XX, XX, XX, XX, XX, XX, XX,
                                     XX, XX, XX, XX, XX, XX, XX,
                                         XX, XX, XX, XX, XX, XX,
                                             XX, XX, XX, XX, XX,
                                                 XX, XX, XX, XX,
                                                     XX, XX, XX,
                                                         XX, XX,
                                                             XX,
];

const CONTACT_CUTS: [Dist; 6] = [2.0, 2.0, 1.0, 1.0, 2.0, 2.0];
const SERPENTINE: [f64; 6] = [0.0333333, 1.0, 1.0, 2.0, 1.0, 1.0];

/// Build the Generic CMOS [Technology]
pub fn cmos() -> TechResult<Technology> {
    let mut tech = Technology::new(
        "cmos",
        "CMOS (N-Well, Griswold rules)",
        Scale::nanometers(2000.0, true),
    );
    tech.short_name = Some("Generic CMOS".into());
    tech.flags.no_negated_arcs = true;
    tech.flags.static_technology = true;
    tech.foundries.push(Foundry::new(FoundryKind::None));
    let (blue, red, green, orange, brown) = (
        Color::new(0, 0, 255),
        Color::new(223, 0, 0),
        Color::new(0, 255, 0),
        Color::new(255, 190, 6),
        Color::new(170, 140, 30),
    );
    tech.transparent_colors = vec![blue, red, green, orange, brown];

    // Stipples
    let metal_pat = Stipple::tiled([0x2222, 0, 0x8888, 0, 0x2222, 0, 0x8888, 0]);
    let poly_pat = Stipple::tiled([
        0x0808, 0x0404, 0x0202, 0x0101, 0x8080, 0x4040, 0x2020, 0x1010,
    ]);
    let diff_pat = Stipple::tiled([0, 0x0303, 0x4848, 0x0303, 0, 0x3030, 0x8484, 0x3030]);
    let select_pat = Stipple::tiled([0x1000, 0x0020, 0, 0, 0x0001, 0x0200, 0, 0]);
    let well_pat = Stipple::tiled([0, 0x00c0, 0, 0, 0, 0x00c0, 0, 0]);
    let glass_pat = Stipple::tiled([0x1c1c, 0x3e3e, 0x3636, 0x3e3e, 0x1c1c, 0, 0, 0]);
    let cut_color = Color::new(180, 130, 0);

    // Layers. Order is significant to the spacing table.
    use LayerFunction as F;
    let none = FunctionExtras::NONE;
    let pseudo = FunctionExtras::PSEUDO;
    let metal = tech.add_layer(
        Layer::new("Metal", Graphics::new(1, blue, metal_pat))
            .with_function(F::Metal1, none)
            .with_cif("CM"),
    )?;
    let poly = tech.add_layer(
        Layer::new("Polysilicon", Graphics::new(2, red, poly_pat))
            .with_function(F::Poly1, none)
            .with_cif("CP"),
    )?;
    let diff = tech.add_layer(
        Layer::new("Diffusion", Graphics::new(3, green, diff_pat))
            .with_function(F::Diff, none)
            .with_cif("CD"),
    )?;
    let pplus = tech.add_layer(
        Layer::new("P+", Graphics::new(4, orange, select_pat))
            .with_function(F::ImplantP, none)
            .with_cif("CS"),
    )?;
    let cut = tech.add_layer(
        Layer::new("Contact-Cut", Graphics::new(0, cut_color, Stipple::EMPTY))
            .with_function(F::Contact1, none)
            .with_cif("CC"),
    )?;
    let ohmic = tech.add_layer(
        Layer::new("Ohmic-Cut", Graphics::new(0, cut_color, Stipple::EMPTY))
            .with_function(F::Contact2, none)
            .with_cif("CC"),
    )?;
    let pwell = tech.add_layer(
        Layer::new("P-Well", Graphics::new(5, brown, well_pat))
            .with_function(F::WellP, none)
            .with_cif("CW"),
    )?;
    let glass = tech.add_layer(
        Layer::new("Overglass", Graphics::new(0, Color::BLACK, glass_pat))
            .with_function(F::Overglass, none)
            .with_cif("CG"),
    )?;
    tech.add_layer(
        Layer::new(
            "Transistor",
            Graphics::new(0, Color::new(200, 200, 200), Stipple::EMPTY),
        )
        .with_function(F::Transistor, pseudo),
    )?;
    let pmetal = tech.add_layer(
        Layer::new("Pseudo-Metal", Graphics::new(1, blue, metal_pat))
            .with_function(F::Metal1, pseudo),
    )?;
    let ppoly = tech.add_layer(
        Layer::new("Pseudo-Polysilicon", Graphics::new(2, red, poly_pat))
            .with_function(F::Poly1, pseudo),
    )?;
    let pdiff = tech.add_layer(
        Layer::new("Pseudo-Diffusion", Graphics::new(3, green, diff_pat))
            .with_function(F::Diff, pseudo),
    )?;
    let ppplus = tech.add_layer(
        Layer::new("Pseudo-P+", Graphics::new(4, orange, select_pat))
            .with_function(F::ImplantP, pseudo),
    )?;
    let ppwell = tech.add_layer(
        Layer::new("Pseudo-P-Well", Graphics::new(5, brown, well_pat))
            .with_function(F::WellP, pseudo),
    )?;

    // Arcs
    let filled = PolyStyle::Filled;
    let metal_arc = tech.add_arc(
        ArcProto::new("Metal", 3.0, vec![ArcLayer::new(metal, 0.0, filled)])
            .with_function(ArcFunction::Metal1)
            .with_angles(true, 90)
            .with_wipable(),
    )?;
    let poly_arc = tech.add_arc(
        ArcProto::new("Polysilicon", 2.0, vec![ArcLayer::new(poly, 0.0, filled)])
            .with_function(ArcFunction::Poly1)
            .with_angles(true, 90)
            .with_wipable(),
    )?;
    let diffp_arc = tech.add_arc(
        ArcProto::new(
            "Diffusion-p",
            6.0,
            vec![
                ArcLayer::new(diff, 4.0, filled),
                ArcLayer::new(pplus, 0.0, filled),
            ],
        )
        .with_function(ArcFunction::DiffP)
        .with_angles(true, 90)
        .with_wipable()
        .with_width_offset(4.0),
    )?;
    let diffw_arc = tech.add_arc(
        ArcProto::new(
            "Diffusion-well",
            8.0,
            vec![
                ArcLayer::new(diff, 6.0, filled),
                ArcLayer::new(pwell, 0.0, filled),
            ],
        )
        .with_function(ArcFunction::DiffN)
        .with_angles(true, 90)
        .with_wipable()
        .with_width_offset(6.0),
    )?;

    // Node geometry
    use EdgeH as H;
    use EdgeV as V;
    let full = TechPoint::full_box();
    let box_1 = edges(H::from_center(1.), V::from_bottom(3.), H::from_right(1.), V::from_top(3.));
    let box_2 = edges(H::from_left(2.), V::from_bottom(2.), H::right_edge(), V::from_top(2.));
    let box_3 = edges(H::left_edge(), V::bottom_edge(), H::from_center(1.), V::top_edge());
    let box_4 = edges(H::from_left(3.), V::from_bottom(3.), H::from_center(1.), V::from_top(3.));
    let box_5 = edges(H::from_left(1.5), V::from_bottom(1.5), H::center(), V::from_top(1.5));
    let box_6 = edges(H::from_left(4.), V::from_bottom(4.), H::center(), V::from_top(4.));
    let box_7 = edges(H::center(), V::from_bottom(4.), H::from_right(4.), V::from_top(4.));
    let box_10 = edges(H::from_left(3.), V::from_bottom(1.), H::from_right(3.), V::from_top(1.));
    let box_11 = edges(H::from_left(1.), V::from_bottom(3.), H::from_right(1.), V::from_top(3.));
    let box_14 = edges(H::from_left(2.), V::bottom_edge(), H::from_right(2.), V::top_edge());
    let box_15 = edges(H::left_edge(), V::from_bottom(2.), H::right_edge(), V::from_top(2.));
    let box_16 = edges(H::from_left(1.), V::from_bottom(1.), H::from_left(3.), V::from_bottom(3.));
    let box_17 = TechPoint::indented(3.0);
    let box_18 = TechPoint::indented(2.0);

    let (crossed, closed) = (PolyStyle::Crossed, PolyStyle::Closed);
    let layer = |key, port, style, pts| NodeLayer::boxed(key, port, style, pts);
    let port = |name: &str, arcs| PrimitivePort::new(name, arcs);

    // Pins
    let metal_pin = tech.add_node(
        PrimitiveNode::new("Metal-Pin", 3.0, 3.0, vec![layer(pmetal, Some(0), crossed, full)])
            .with_function(NodeFunction::Pin)
            .with_ports(vec![port("metal", vec![metal_arc]).inset(1.5)])
            .with_flags(NodeFlags::pin()),
    )?;
    let poly_pin = tech.add_node(
        PrimitiveNode::new(
            "Polysilicon-Pin",
            2.0,
            2.0,
            vec![layer(ppoly, Some(0), crossed, full)],
        )
        .with_function(NodeFunction::Pin)
        .with_ports(vec![port("polysilicon", vec![poly_arc]).inset(1.0)])
        .with_flags(NodeFlags::pin()),
    )?;
    let diffp_pin = tech.add_node(
        PrimitiveNode::new(
            "Diffusion-P-Pin",
            6.0,
            6.0,
            vec![
                layer(ppplus, Some(0), crossed, full),
                layer(pdiff, Some(0), crossed, box_18),
            ],
        )
        .with_function(NodeFunction::Pin)
        .with_size_offset(SizeOffset::uniform(2.0))
        .with_ports(vec![port("diff-p", vec![diffp_arc]).inset(3.0)])
        .with_flags(NodeFlags::pin()),
    )?;
    let diffw_pin = tech.add_node(
        PrimitiveNode::new(
            "Diffusion-Well-Pin",
            8.0,
            8.0,
            vec![
                layer(ppwell, Some(0), crossed, full),
                layer(pdiff, Some(0), crossed, box_17),
            ],
        )
        .with_function(NodeFunction::Pin)
        .with_size_offset(SizeOffset::uniform(3.0))
        .with_ports(vec![port("diff-w", vec![diffw_arc]).inset(4.0)])
        .with_flags(NodeFlags::pin()),
    )?;

    // Contacts
    let cuts = Special::MultiCut(MultiCut::from_values(CONTACT_CUTS));
    let metal_poly_con = tech.add_node(
        PrimitiveNode::new(
            "Metal-Polysilicon-Con",
            4.0,
            4.0,
            vec![
                layer(poly, Some(0), filled, full),
                layer(metal, Some(0), filled, full),
                layer(cut, Some(0), closed, box_16),
            ],
        )
        .with_function(NodeFunction::Contact)
        .with_ports(vec![port("metal-poly", vec![poly_arc, metal_arc]).inset(1.0)])
        .with_special(cuts),
    )?;
    let metal_diffp_con = tech.add_node(
        PrimitiveNode::new(
            "Metal-Diff-P-Con",
            8.0,
            8.0,
            vec![
                layer(pplus, Some(0), filled, full),
                layer(metal, Some(0), filled, box_18),
                layer(diff, Some(0), filled, box_18),
                layer(cut, Some(0), closed, box_16),
            ],
        )
        .with_function(NodeFunction::Contact)
        .with_size_offset(SizeOffset::uniform(2.0))
        .with_ports(vec![port("metal-diff-p", vec![diffp_arc, metal_arc]).inset(3.0)])
        .with_special(cuts),
    )?;
    let metal_diffw_con = tech.add_node(
        PrimitiveNode::new(
            "Metal-Diff-Well-Con",
            10.0,
            10.0,
            vec![
                layer(metal, Some(0), filled, box_17),
                layer(diff, Some(0), filled, box_17),
                layer(pwell, Some(0), filled, full),
                layer(cut, Some(0), closed, box_16),
            ],
        )
        .with_function(NodeFunction::Contact)
        .with_size_offset(SizeOffset::uniform(3.0))
        .with_ports(vec![port("metal-diff-w", vec![diffw_arc, metal_arc]).inset(4.0)])
        .with_special(cuts),
    )?;

    // Transistors
    let serpentine = Special::Serpentine(Serpentine::from_values(SERPENTINE));
    let transistor_flags = NodeFlags {
        holds_outline: true,
        can_shrink: true,
        ..Default::default()
    };
    let transistor = tech.add_node(
        PrimitiveNode::new(
            "Transistor",
            6.0,
            6.0,
            vec![
                layer(poly, Some(0), filled, box_15).with_serpentine(1.0, 1.0, 2.0, 2.0),
                layer(diff, Some(0), filled, box_14).with_serpentine(3.0, 3.0, 0.0, 0.0),
                layer(pplus, None, filled, full).with_serpentine(3.0, 3.0, 2.0, 2.0),
            ],
        )
        .with_function(NodeFunction::TransistorPMos)
        .with_size_offset(SizeOffset::uniform(2.0))
        .with_ports(vec![
            port("trans-poly-left", vec![poly_arc])
                .with_angles(180, 85)
                .with_edges(H::from_left(1.), V::from_bottom(3.), H::from_left(1.), V::from_top(3.)),
            port("trans-diff-top", vec![diffp_arc])
                .with_angles(90, 85)
                .with_topology(2)
                .with_edges(H::from_left(3.), V::from_top(1.), H::from_right(3.), V::from_top(1.)),
            port("trans-poly-right", vec![poly_arc])
                .with_angles(0, 85)
                .with_edges(H::from_right(1.), V::from_bottom(3.), H::from_right(1.), V::from_top(3.)),
            port("trans-diff-bottom", vec![diffp_arc])
                .with_angles(270, 85)
                .with_topology(3)
                .with_edges(H::from_left(3.), V::from_bottom(1.), H::from_right(3.), V::from_bottom(1.)),
        ])
        .with_special(serpentine)
        .with_flags(transistor_flags),
    )?;
    let transistor_well = tech.add_node(
        PrimitiveNode::new(
            "Transistor-Well",
            8.0,
            8.0,
            vec![
                layer(poly, Some(0), filled, box_11).with_serpentine(1.0, 1.0, 2.0, 2.0),
                layer(diff, Some(0), filled, box_10).with_serpentine(3.0, 3.0, 0.0, 0.0),
                layer(pwell, None, filled, full).with_serpentine(4.0, 4.0, 3.0, 3.0),
            ],
        )
        .with_function(NodeFunction::TransistorNMos)
        .with_size_offset(SizeOffset::uniform(3.0))
        .with_ports(vec![
            port("transw-poly-left", vec![poly_arc])
                .with_angles(180, 85)
                .with_topology(2)
                .with_edges(H::from_left(2.), V::from_bottom(4.), H::from_left(2.), V::from_top(4.)),
            port("transw-diff-top", vec![diffw_arc])
                .with_angles(90, 85)
                .with_edges(H::from_left(4.), V::from_top(2.), H::from_right(4.), V::from_top(2.)),
            port("transw-poly-right", vec![poly_arc])
                .with_angles(0, 85)
                .with_topology(2)
                .with_edges(H::from_right(2.), V::from_bottom(4.), H::from_right(2.), V::from_top(4.)),
            port("transw-diff-bottom", vec![diffw_arc])
                .with_angles(270, 85)
                .with_topology(1)
                .with_edges(H::from_left(4.), V::from_bottom(2.), H::from_right(4.), V::from_bottom(2.)),
        ])
        .with_special(serpentine)
        .with_flags(transistor_flags),
    )?;

    // Split contacts
    let split_well = tech.add_node(
        PrimitiveNode::new(
            "Metal-Diff-Split-Cut",
            14.0,
            10.0,
            vec![
                layer(diff, Some(0), filled, box_17),
                layer(pplus, Some(0), filled, box_5),
                layer(pwell, Some(0), filled, full),
                layer(metal, Some(0), filled, box_17),
                layer(cut, Some(1), closed, box_7),
                layer(ohmic, Some(0), crossed, box_6),
            ],
        )
        .with_function(NodeFunction::Well)
        .with_size_offset(SizeOffset::uniform(3.0))
        .with_ports(vec![
            port("metal-diff-splw-l", vec![metal_arc])
                .with_angles(180, 90)
                .with_edges(H::from_left(4.), V::from_bottom(4.), H::from_center(-1.), V::from_top(4.)),
            port("metal-diff-splw-r", vec![diffw_arc, metal_arc])
                .with_angles(0, 90)
                .with_edges(H::from_center(1.), V::from_bottom(4.), H::from_right(4.), V::from_top(4.)),
        ]),
    )?;
    let split_substrate = tech.add_node(
        PrimitiveNode::new(
            "Metal-Diff-SplitN-Cut",
            10.0,
            8.0,
            vec![
                layer(pplus, Some(0), filled, box_3),
                layer(diff, Some(0), filled, box_2),
                layer(metal, Some(0), filled, box_2),
                layer(cut, Some(0), closed, box_4),
                layer(ohmic, Some(1), crossed, box_1),
            ],
        )
        .with_function(NodeFunction::Substrate)
        .with_size_offset(SizeOffset::new(2.0, 0.0, 2.0, 2.0))
        .with_ports(vec![
            port("metal-diff-splp-l", vec![diffp_arc, metal_arc])
                .with_angles(0, 90)
                .with_edges(H::from_left(3.), V::from_bottom(3.), H::center(), V::from_top(3.)),
            port("metal-diff-splp-r", vec![metal_arc])
                .with_angles(180, 90)
                .with_edges(H::from_center(2.), V::from_bottom(3.), H::from_right(1.), V::from_top(3.)),
        ]),
    )?;

    // Pure-layer nodes
    let pure = [
        (metal, "Metal-Node", filled, 3.0, "metal", vec![metal_arc]),
        (poly, "Polysilicon-Node", filled, 2.0, "polysilicon", vec![poly_arc]),
        (diff, "Diffusion-Node", filled, 2.0, "diffusion", vec![]),
        (pplus, "P-Node", filled, 2.0, "p+", vec![]),
        (cut, "Cut-Node", closed, 2.0, "cut", vec![]),
        (ohmic, "Ohmic-Cut-Node", crossed, 2.0, "ohmic-cut", vec![]),
        (pwell, "Well-Node", filled, 4.0, "well", vec![]),
        (glass, "Overglass-Node", filled, 2.0, "overglass", vec![]),
    ];
    for (layer, name, style, size, port, arcs) in pure {
        let node = tech.add_node(pure_layer_node(name, layer, style, size, port, arcs))?;
        tech.set_pure_layer_node(layer, node)?;
    }

    use PaletteEntry::{Arc, Label, Node};
    tech.palette = vec![
        vec![Arc(poly_arc), Node(poly_pin), Node(metal_poly_con)],
        vec![Arc(metal_arc), Node(metal_pin), Node(split_substrate)],
        vec![Arc(diffp_arc), Node(diffp_pin), Node(metal_diffp_con)],
        vec![Arc(diffw_arc), Node(diffw_pin), Node(metal_diffw_con)],
        vec![Node(transistor), Node(transistor_well), Node(split_well)],
        vec![Label("Pure".into()), Label("Misc.".into()), Label("Cell".into())],
    ];
    tech.set_unconnected_rules(&UNCONNECTED)?;
    Ok(tech)
}
