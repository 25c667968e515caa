//!
//! # tech21 unit tests
//!

use super::*;
use crate::technologies::{artwork, cmos, efido, gem, generic};
use crate::utils::SerializationFormat;

#[test]
fn edges() {
    // Six-wide node, centered at x=10
    assert_eq!(EdgeH::left_edge().locate(10.0, 6.0), 7.0);
    assert_eq!(EdgeH::right_edge().locate(10.0, 6.0), 13.0);
    assert_eq!(EdgeH::from_left(1.5).locate(10.0, 6.0), 8.5);
    assert_eq!(EdgeH::from_right(1.5).locate(10.0, 6.0), 11.5);
    assert_eq!(EdgeV::from_top(1.0).locate(0.0, 4.0), 1.0);
    assert_eq!(EdgeV::from_center(-1.0).locate(0.0, 4.0), -1.0);

    let frame = NodeFrame::new(6.0, 4.0).at(Point::new(10.0, 0.0));
    let [p0, p1] = TechPoint::indented(1.0);
    assert_eq!(p0.locate(&frame), Point::new(8.0, -1.0));
    assert_eq!(p1.locate(&frame), Point::new(12.0, 1.0));
}

#[test]
fn table() -> TechResult<()> {
    let mut layers = Layers::default();
    let a = layers.add(Layer::new("a", Graphics::opaque(Color::BLACK)))?;
    let b = layers.add(Layer::new("b", Graphics::opaque(Color::WHITE)))?;
    assert_eq!(layers.len(), 2);
    assert_eq!(layers.key("b"), Some(b));
    assert_eq!(layers.index(a), Some(0));
    assert_eq!(layers.key_at(1), Some(b));
    assert_eq!(layers.name_of(a), Some("a"));
    assert!(layers.key("c").is_none());

    // Names are unique
    let dup = layers.add(Layer::new("a", Graphics::opaque(Color::WHITE)));
    assert!(matches!(dup, Err(TechError::Duplicate { kind: "layer", .. })));
    assert_eq!(layers.len(), 2);
    assert!(matches!(layers.require("c"), Err(TechError::NotFound { .. })));
    Ok(())
}

#[test]
fn spacing_table() -> TechResult<()> {
    // Three layers, upper triangle: (0,0) (0,1) (0,2) (1,1) (1,2) (2,2)
    let table = SpacingTable::from_upper_triangle(3, &[1.0, NO_RULE, 3.0, 2.0, NO_RULE, 4.0])?;
    assert_eq!(SpacingTable::size_for(3), 6);
    assert_eq!(table.get(0, 2), Some(3.0));
    assert_eq!(table.get(2, 0), Some(3.0));
    assert_eq!(table.get(0, 1), None);
    assert_eq!(table.get(2, 2), Some(4.0));
    assert_eq!(table.get(3, 0), None);
    assert_eq!(table.num_rules(), 4);
    assert_eq!(table.worst(), 4.0);
    assert_eq!(table.max_surround(0), Some(3.0));

    // Wrong-length lists are rejected
    assert!(SpacingTable::from_upper_triangle(3, &[1.0, 2.0]).is_err());
    assert!(DesignRules::simple(4, None, Some(&[1.0; 6])).is_err());
    Ok(())
}

#[test]
fn spacing_table_rejects_non_finite() -> TechResult<()> {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(SpacingTable::from_upper_triangle(2, &[1.0, bad, 2.0]).is_err());
        assert!(DesignRules::simple(2, None, Some(&[bad, 1.0, 2.0])).is_err());
    }
    let mut table = SpacingTable::empty(2);
    assert!(table.set(0, 1, Some(f64::NAN)).is_err());
    assert!(table.set(1, 1, Some(f64::INFINITY)).is_err());
    assert!(table.set(0, 0, Some(-2.0)).is_err());
    assert_eq!(table.num_rules(), 0);
    table.set(0, 1, Some(1.5))?;
    assert_eq!(table.get(1, 0), Some(1.5));

    // Loaded tables get the same checks
    let yaml = SerializationFormat::Yaml;
    assert!(yaml.from_str::<SpacingTable>("num_layers: 1\nvalues: [.nan]\n").is_err());
    assert!(yaml.from_str::<SpacingTable>("num_layers: 1\nvalues: [-2.0]\n").is_err());
    assert!(yaml.from_str::<SpacingTable>("num_layers: 2\nvalues: [1.0]\n").is_err());
    let table: SpacingTable = yaml.from_str("num_layers: 1\nvalues: [-1.0]\n")?;
    assert_eq!(table.get(0, 0), None);
    Ok(())
}

#[test]
fn builtins() -> TechResult<()> {
    let techs = technologies::builtin()?;
    let names: Vec<&str> = techs.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, technologies::BUILTIN_NAMES);
    Ok(())
}

#[test]
fn cmos_tables() -> TechResult<()> {
    let tech = cmos()?;
    tech.validate()?;
    let summary = tech.summary();
    assert_eq!(summary.layers, 14);
    assert_eq!(summary.arcs, 4);
    assert_eq!(summary.nodes, 19);
    assert_eq!(tech.layer_index("Metal"), Some(0));
    assert_eq!(tech.layer_index("Pseudo-P-Well"), Some(13));
    assert_eq!(tech.short_name.as_deref(), Some("Generic CMOS"));
    assert!(tech.scale.relevant);
    assert_eq!(tech.scale.to_microns(3.0), 6.0);

    let diffp = tech.arc("Diffusion-p").ok_or("Missing arc")?;
    assert_eq!(diffp.default_width, 6.0);
    assert_eq!(diffp.width_offset, 4.0);
    assert_eq!(diffp.base_width(), 2.0);

    let metal = tech.layer("Metal").ok_or("Missing layer")?;
    assert_eq!(metal.cif_layer.as_deref(), Some("CM"));
    assert!(metal.function.is_metal());
    assert_eq!(
        tech.pure_layer_node("Metal").map(|n| n.name.as_str()),
        Some("Metal-Node")
    );
    Ok(())
}

#[test]
fn cmos_rules() -> TechResult<()> {
    let tech = cmos()?;
    let spacing = |a: &str, b: &str| tech.unconnected_spacing(a, b);
    assert_eq!(spacing("Metal", "Metal")?, Some(3.0));
    assert_eq!(spacing("Polysilicon", "Diffusion")?, Some(1.0));
    assert_eq!(spacing("Diffusion", "Polysilicon")?, Some(1.0));
    assert_eq!(spacing("Diffusion", "Ohmic-Cut")?, Some(5.0));
    assert_eq!(spacing("Contact-Cut", "Transistor")?, Some(2.0));
    assert_eq!(spacing("Metal", "Polysilicon")?, None);
    assert_eq!(spacing("Pseudo-Metal", "Pseudo-Metal")?, None);
    assert!(spacing("Metal", "Metal-5").is_err());

    assert_eq!(tech.worst_spacing_distance(), 5.0);
    assert_eq!(tech.max_surround("Diffusion")?, Some(5.0));
    assert_eq!(tech.max_surround("Overglass")?, None);
    assert_eq!(tech.summary().rules, 11);
    Ok(())
}

#[test]
fn cmos_transistor() -> TechResult<()> {
    let tech = cmos()?;
    let trans = tech.node("Transistor").ok_or("Missing node")?;
    assert!(trans.is_serpentine());
    assert_eq!(trans.function, NodeFunction::TransistorPMos);
    assert_eq!(trans.base_size(), (2.0, 2.0));
    assert_eq!(trans.ports.len(), 4);

    // Diffusion ports sit one unit inside the top and bottom edges
    let frame = trans.default_frame();
    let top = trans.port("trans-diff-top").ok_or("Missing port")?;
    let bounds = top.bounds(&frame);
    assert_eq!(bounds.p0, Point::new(0.0, 2.0));
    assert_eq!(bounds.p1, Point::new(0.0, 2.0));
    assert_eq!(top.topology, 2);
    assert!(!top.is_isotropic());

    // Serpentine extents are carried per layer
    let poly = &trans.layers[0];
    let extent = poly.serpentine.ok_or("Missing serpentine extent")?;
    assert_eq!((extent.top, extent.bottom), (2.0, 2.0));
    Ok(())
}

#[test]
fn cmos_pins() -> TechResult<()> {
    let tech = cmos()?;
    let metal = tech.arcs.require("Metal")?;
    let pin = tech.pin_for(metal).ok_or("No pin")?;
    assert_eq!(tech.nodes.name_of(pin), Some("Metal-Pin"));
    let node = tech.nodes.get(pin).ok_or("Missing node")?;
    let port = &node.ports[0];
    assert!(port.connects_to(metal));
    // Metal pin ports collapse onto the pin's center
    let bounds = port.bounds(&node.default_frame());
    assert_eq!(bounds.size(), (0.0, 0.0));
    Ok(())
}

#[test]
fn efido_tables() -> TechResult<()> {
    let tech = efido()?;
    let summary = tech.summary();
    assert_eq!((summary.layers, summary.arcs, summary.nodes), (3, 2, 10));
    assert!(tech.rules.is_none());
    assert_eq!(tech.worst_spacing_distance(), 0.0);

    let adder = tech.node("adder").ok_or("Missing node")?;
    let names: Vec<&str> = adder.ports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["in1", "in2", "in3", "in4", "in5", "out"]);
    let bus = tech.arc("bus").ok_or("Missing arc")?;
    assert_eq!(bus.function, ArcFunction::Bus);
    assert_eq!(bus.default_width, 2.0);
    Ok(())
}

#[test]
fn efido_arrows() -> TechResult<()> {
    let tech = efido()?;
    // Adder: operator, arrow stem, circle, arrow head
    let adder = tech.node("adder").ok_or("Missing node")?;
    let stem = &adder.layers[1];
    let head = &adder.layers[3];
    assert_eq!((stem.points.len(), head.points.len()), (2, 3));

    // Divider: three operator strokes, then the arrow head before its stem, then the circle
    let divider = tech.node("divider").ok_or("Missing node")?;
    assert_eq!(divider.layers.len(), 6);
    assert_eq!(divider.layers[3].points, head.points);
    assert_eq!(divider.layers[4].points, stem.points);
    assert_eq!(divider.layers[3].port, Some(4));
    assert_eq!(divider.layers[4].port, Some(4));
    assert_eq!(divider.layers[5].style, PolyStyle::Circle);

    // Subtractor keeps stem-then-head
    let subtractor = tech.node("subtractor").ok_or("Missing node")?;
    assert_eq!(subtractor.layers[1].points, stem.points);
    assert_eq!(subtractor.layers[2].points, head.points);
    Ok(())
}

#[test]
fn artwork_tables() -> TechResult<()> {
    let tech = artwork()?;
    let summary = tech.summary();
    assert_eq!((summary.layers, summary.arcs, summary.nodes), (1, 4, 17));
    assert!(tech.flags.non_electrical);
    for (_, arc) in tech.arcs.iter() {
        assert_eq!(arc.function, ArcFunction::NonElectrical);
    }
    let graphics = tech.layers.require("Graphics")?;
    assert_eq!(tech.foundries[0].gds_layer(graphics), Some("1"));

    let polygon = tech.node("Filled-Polygon").ok_or("Missing node")?;
    assert_eq!(polygon.layers[0].representation, Representation::MinBox);
    assert!(polygon.flags.holds_outline);
    Ok(())
}

#[test]
fn gem_and_generic() -> TechResult<()> {
    let gem = gem()?;
    assert_eq!(gem.arcs.len(), 6);
    let element = gem.node("Element").ok_or("Missing node")?;
    assert_eq!(element.ports.len(), 4);

    let generic = generic()?;
    assert!(generic.flags.no_primitives);
    assert!(generic.node("Facet-Center").is_some());
    assert_eq!(
        generic.pure_layer_node("DRC").map(|n| n.name.as_str()),
        Some("DRC-Node")
    );
    // The universal pin comes first, and accepts every generic arc
    let unrouted = generic.arcs.require("Unrouted")?;
    let pin = generic.pin_for(unrouted).ok_or("No pin")?;
    assert_eq!(generic.nodes.name_of(pin), Some("Universal-Pin"));
    Ok(())
}

#[test]
fn validation_failures() -> TechResult<()> {
    // Port index beyond the node's ports
    let mut tech = efido()?;
    let wire = tech.arcs.require("wire")?;
    let layer = tech.layers.require("Node")?;
    let bad = PrimitiveNode::new(
        "bad",
        2.0,
        2.0,
        vec![NodeLayer::boxed(layer, Some(3), PolyStyle::Filled, TechPoint::full_box())],
    )
    .with_ports(vec![PrimitivePort::new("only", vec![wire])]);
    tech.add_node(bad)?;
    match tech.validate() {
        Err(TechError::Validation { stack, .. }) => {
            assert_eq!(stack.last(), Some(&ErrorContext::Node("bad".into())));
        }
        other => panic!("Expected a validation error, got {:?}", other),
    }

    // Transparent plane without a color
    let mut tech = efido()?;
    tech.add_layer(Layer::new("Extra", Graphics::new(9, Color::BLACK, Stipple::SOLID)))?;
    assert!(tech.validate().is_err());

    // Rules sized for a different layer count
    let mut tech = artwork()?;
    tech.rules = Some(DesignRules::simple(2, None, None)?);
    assert!(tech.validate().is_err());
    Ok(())
}

#[test]
fn round_trips() -> TechResult<()> {
    use SerializationFormat::{Json, Toml, Yaml};
    for tech in technologies::builtin()? {
        for fmt in [Yaml, Json, Toml] {
            let s = fmt.to_string(&tech)?;
            let back: Technology = fmt.from_str(&s)?;
            back.validate()?;
            assert_eq!(back.name, tech.name);
            assert_eq!(back.summary(), tech.summary());
            assert_eq!(back.rules, tech.rules);
            assert_eq!(back.palette, tech.palette);
            assert_eq!(back.foundries, tech.foundries);
            // Keys and order survive the trip
            assert!(back.layers.keys().eq(tech.layers.keys()));
            for (key, layer) in tech.layers.iter() {
                assert_eq!(back.layers.get(key), Some(layer));
            }
            for (key, arc) in tech.arcs.iter() {
                assert_eq!(back.arcs.get(key), Some(arc));
            }
            for (key, node) in tech.nodes.iter() {
                assert_eq!(back.nodes.get(key), Some(node));
                assert_eq!(back.nodes.key(&node.name), Some(key));
            }
        }
    }
    Ok(())
}

#[test]
fn tables_serialize_as_lists() -> TechResult<()> {
    let tech = efido()?;
    let s = SerializationFormat::Json.to_string(&tech.layers)?;
    assert!(s.trim_start().starts_with('['));
    let back: Layers = SerializationFormat::Json.from_str(&s)?;
    let names: Vec<&str> = back.iter().map(|(_, l)| l.name.as_str()).collect();
    assert_eq!(names, ["Node", "Arc", "Outpad"]);
    assert_eq!(back.key("Arc"), tech.layers.key("Arc"));
    Ok(())
}

#[test]
fn tampered_files() -> TechResult<()> {
    let json = SerializationFormat::Json;
    let s = json.to_string(&efido()?)?;

    // Two layers named "Outpad"
    let dup = s.replacen("\"name\": \"Node\"", "\"name\": \"Outpad\"", 1);
    assert_ne!(dup, s);
    let err = json.from_str::<Technology>(&dup).err().ok_or("Duplicate layer accepted")?;
    assert!(err.to_string().contains("Duplicate layer `Outpad`"));

    // Two arcs named "wire"
    let dup = s.replacen("\"name\": \"bus\"", "\"name\": \"wire\"", 1);
    assert_ne!(dup, s);
    assert!(json.from_str::<Technology>(&dup).is_err());

    // A layer whose pure-layer node lies past the end of the node table
    let mut tech = efido()?;
    let stray = cmos()?.nodes.key_at(tech.nodes.len() + 5).ok_or("Missing node")?;
    let node_layer = tech.layers.require("Node")?;
    tech.layers.get_mut(node_layer).ok_or("Missing layer")?.pure_layer_node = Some(stray);
    let fname = std::env::temp_dir().join("tech21_tampered_efido.json");
    json.save(&tech, &fname)?;
    assert!(Technology::load(&fname, json).is_err());
    std::fs::remove_file(&fname)?;
    Ok(())
}

#[test]
fn registry() -> TechResult<()> {
    let mut techs = Technologies::builtin()?;
    assert_eq!(techs.len(), 5);
    assert_eq!(techs.names(), technologies::BUILTIN_NAMES);
    assert_eq!(techs.require("CMOS")?.name, "cmos");
    assert!(techs.find("mocmos").is_none());
    assert!(matches!(techs.add(gem()?), Err(TechError::Duplicate { .. })));

    // Export, remove, and load back
    let fname = std::env::temp_dir().join("tech21_registry_efido.yaml");
    techs.save("efido", &fname, SerializationFormat::Yaml)?;
    assert!(techs.remove("EFIDO").is_some());
    assert_eq!(techs.len(), 4);
    let name = techs.load(&fname, SerializationFormat::Yaml)?;
    assert_eq!(name, "efido");
    assert_eq!(techs.require("efido")?.nodes.len(), 10);
    std::fs::remove_file(&fname)?;
    Ok(())
}
