//!
//! # Error Contexts
//!

// Crates.io
use serde::{Deserialize, Serialize};

/// Enumerated validation contexts.
/// Pushed and popped by tree-walkers, and reported upon failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorContext {
    Technology(String),
    Layer(String),
    Arc(String),
    Node(String),
    Port(String),
    Rules,
    Palette,
    Foundry(String),
    Unknown,
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Technology(s) => write!(f, "technology `{}`", s),
            Self::Layer(s) => write!(f, "layer `{}`", s),
            Self::Arc(s) => write!(f, "arc `{}`", s),
            Self::Node(s) => write!(f, "node `{}`", s),
            Self::Port(s) => write!(f, "port `{}`", s),
            Self::Rules => write!(f, "design rules"),
            Self::Palette => write!(f, "palette"),
            Self::Foundry(s) => write!(f, "foundry `{}`", s),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
