//!
//! # Technology Descriptions
//!
//! Layers, arcs, primitive nodes and simple design rules of IC and schematic technologies.
//!
//! Each [Technology] is a registry of named, ordered tables.
//! [Layer]s describe appearance and electrical function,
//! [ArcProto]s describe the wires drawn on those layers,
//! and [PrimitiveNode]s the pins, contacts and transistors which wires connect to.
//! Node geometry is stored as edge rules (see [edge]), which scale with each node's size.
//!
//! The built-in technologies live in [technologies], and are collected by [Technologies::builtin].
//! Technologies serialize to and from JSON, YAML and TOML "technology files".
//!

// Internal modules & re-exports
pub use tech21utils as utils;

pub mod arc;
pub use arc::*;
pub mod bbox;
pub use bbox::*;
pub mod drc;
pub use drc::*;
pub mod edge;
pub use edge::*;
pub mod error;
pub use error::*;
pub mod geom;
pub use geom::*;
pub mod graphics;
pub use graphics::*;
pub mod layer;
pub use layer::*;
pub mod node;
pub use node::*;
pub mod poly;
pub use poly::*;
pub mod registry;
pub use registry::*;
pub mod table;
pub use table::*;
pub mod tech;
pub use tech::*;
pub mod technologies;

#[cfg(test)]
mod tests;
