//!
//! # Technology Registry
//!

// Std-Lib
use std::collections::BTreeMap;
use std::path::Path;

// Crates.io
use log::{debug, info};

// Local imports
use crate::error::{TechError, TechResult};
use crate::tech::Technology;
use crate::technologies;
use crate::utils::SerializationFormat;

/// # Technologies
///
/// Collection of [Technology]s, keyed by case-insensitive name, iterated in name order.
///
#[derive(Debug, Clone, Default)]
pub struct Technologies {
    techs: BTreeMap<String, Technology>,
}
impl Technologies {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }
    /// Create a collection of the built-in technologies
    pub fn builtin() -> TechResult<Self> {
        let mut techs = Self::new();
        for tech in technologies::builtin()? {
            techs.add(tech)?;
        }
        Ok(techs)
    }
    /// Add `tech`. Fails if a technology of the same name is already present.
    pub fn add(&mut self, tech: Technology) -> TechResult<()> {
        let key = tech.name.to_lowercase();
        if self.techs.contains_key(&key) {
            return Err(TechError::Duplicate {
                kind: "technology",
                name: tech.name,
            });
        }
        debug!("Registering technology `{}`", tech.name);
        self.techs.insert(key, tech);
        Ok(())
    }
    /// Find the technology named `name`, ignoring case
    pub fn find(&self, name: &str) -> Option<&Technology> {
        self.techs.get(&name.to_lowercase())
    }
    /// Find the technology named `name`, or fail
    pub fn require(&self, name: &str) -> TechResult<&Technology> {
        self.find(name)
            .ok_or_else(|| TechError::not_found("technology", name))
    }
    /// Remove and return the technology named `name`
    pub fn remove(&mut self, name: &str) -> Option<Technology> {
        self.techs.remove(&name.to_lowercase())
    }
    /// Technology names, in order
    pub fn names(&self) -> Vec<&str> {
        self.techs.values().map(|t| t.name.as_str()).collect()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Technology> {
        self.techs.values()
    }
    pub fn len(&self) -> usize {
        self.techs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.techs.is_empty()
    }
    /// Load a technology file, validate it, and add it.
    /// Returns the loaded technology's name.
    pub fn load(&mut self, fname: impl AsRef<Path>, fmt: SerializationFormat) -> TechResult<String> {
        let tech = Technology::load(fname, fmt)?;
        let name = tech.name.clone();
        self.add(tech)?;
        Ok(name)
    }
    /// Save the technology named `name` to `fmt`-format file `fname`
    pub fn save(
        &self,
        name: &str,
        fname: impl AsRef<Path>,
        fmt: SerializationFormat,
    ) -> TechResult<()> {
        let tech = self.require(name)?;
        tech.store(fname, fmt)?;
        info!("Exported technology `{}` as {}", tech.name, fmt);
        Ok(())
    }
}
