//!
//! # Simple Design Rules
//!
//! Layer-to-layer spacing tables, stored as the upper triangle of a
//! symmetric `layers x layers` matrix, in row-major order.
//! The CMOS table, for example, lists fourteen values for the first layer,
//! thirteen for the second, and so on, 105 in total.
//!
//! Evaluating layouts against these rules is left to rule-checkers.
//! This module stores and answers questions about them.
//!

// Crates.io
use log::warn;
use serde::{Deserialize, Serialize};

// Local imports
use crate::error::{TechError, TechResult};
use crate::geom::Dist;

/// Marker for "no rule" in the raw upper-triangle lists
pub const NO_RULE: Dist = -1.0;

/// # Spacing Table
///
/// Loaded tables are checked as by [SpacingTable::from_upper_triangle].
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpacingTable")]
pub struct SpacingTable {
    num_layers: usize,
    /// Upper-triangle values. Negative entries are "no rule".
    values: Vec<Dist>,
}
/// Serialized form of [SpacingTable], before checking
#[derive(Deserialize)]
struct RawSpacingTable {
    num_layers: usize,
    values: Vec<Dist>,
}
impl TryFrom<RawSpacingTable> for SpacingTable {
    type Error = TechError;
    fn try_from(raw: RawSpacingTable) -> TechResult<Self> {
        Self::from_upper_triangle(raw.num_layers, &raw.values)
    }
}
impl SpacingTable {
    /// Number of upper-triangle entries for `num_layers` layers
    pub fn size_for(num_layers: usize) -> usize {
        num_layers * (num_layers + 1) / 2
    }
    /// Create a table with no rules
    pub fn empty(num_layers: usize) -> Self {
        Self {
            num_layers,
            values: vec![NO_RULE; Self::size_for(num_layers)],
        }
    }
    /// Create from a row-major upper-triangle list, in which [NO_RULE] marks missing rules.
    /// Fails if `values` is not sized for `num_layers`,
    /// or holds non-finite values or negative values other than [NO_RULE].
    pub fn from_upper_triangle(num_layers: usize, values: &[Dist]) -> TechResult<Self> {
        let expected = Self::size_for(num_layers);
        if values.len() != expected {
            return TechError::fail(format!(
                "Spacing table for {} layers requires {} entries, got {}",
                num_layers,
                expected,
                values.len()
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return TechError::fail(format!("Invalid non-finite spacing {}", bad));
        }
        if let Some(bad) = values.iter().find(|v| **v < 0.0 && **v != NO_RULE) {
            return TechError::fail(format!("Invalid negative spacing {}", bad));
        }
        Ok(Self {
            num_layers,
            values: values.to_vec(),
        })
    }
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }
    /// Raw upper-triangle values
    pub fn values(&self) -> &[Dist] {
        &self.values
    }
    /// Index into the upper triangle of layers `i1` and `i2`, in either order.
    /// `None` if either is out of range.
    pub fn rule_index(&self, i1: usize, i2: usize) -> Option<usize> {
        if i1 >= self.num_layers || i2 >= self.num_layers {
            return None;
        }
        let (lo, hi) = if i1 <= i2 { (i1, i2) } else { (i2, i1) };
        // Row `lo` starts after `lo` rows, shortened by the triangle
        Some(hi + self.num_layers * lo - lo * (lo + 1) / 2)
    }
    /// Spacing between layers `i1` and `i2`, if there is a rule
    pub fn get(&self, i1: usize, i2: usize) -> Option<Dist> {
        let v = *self.values.get(self.rule_index(i1, i2)?)?;
        if v < 0.0 {
            return None;
        }
        Some(v)
    }
    /// Set (or with `None`, clear) the rule between layers `i1` and `i2`
    pub fn set(&mut self, i1: usize, i2: usize, dist: Option<Dist>) -> TechResult<()> {
        let idx = self.rule_index(i1, i2).ok_or_else(|| {
            TechError::msg(format!(
                "Layer indices ({}, {}) out of range for {} layers",
                i1, i2, self.num_layers
            ))
        })?;
        let v = match dist {
            Some(d) if !d.is_finite() => {
                return TechError::fail(format!("Invalid non-finite spacing {}", d))
            }
            Some(d) if d < 0.0 => return TechError::fail(format!("Invalid negative spacing {}", d)),
            Some(d) => d,
            None => NO_RULE,
        };
        self.values[idx] = v;
        Ok(())
    }
    /// Iterate over defined rules, as (lower index, higher index, distance)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Dist)> + '_ {
        let n = self.num_layers;
        (0..n)
            .flat_map(move |i| (i..n).map(move |j| (i, j)))
            .filter_map(move |(i, j)| self.get(i, j).map(|d| (i, j, d)))
    }
    /// Number of defined rules
    pub fn num_rules(&self) -> usize {
        self.values.iter().filter(|v| **v >= 0.0).count()
    }
    /// Largest distance in the table, zero if empty
    pub fn worst(&self) -> Dist {
        self.values.iter().fold(0.0, |acc, v| acc.max(*v))
    }
    /// Largest rule between layer `idx` and any other, if it has any
    pub fn max_surround(&self, idx: usize) -> Option<Dist> {
        (0..self.num_layers)
            .filter_map(|other| self.get(idx, other))
            .fold(None, |acc: Option<Dist>, d| Some(acc.map_or(d, |a| a.max(d))))
    }
}

/// # Design Rules
///
/// Spacing between connected and unconnected geometry, per layer pair.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRules {
    pub connected: SpacingTable,
    pub unconnected: SpacingTable,
}
impl DesignRules {
    /// Create from optional raw upper-triangle lists. Missing lists produce empty tables.
    pub fn simple(
        num_layers: usize,
        connected: Option<&[Dist]>,
        unconnected: Option<&[Dist]>,
    ) -> TechResult<Self> {
        let table = |values: Option<&[Dist]>| match values {
            Some(v) => SpacingTable::from_upper_triangle(num_layers, v),
            None => Ok(SpacingTable::empty(num_layers)),
        };
        Ok(Self {
            connected: table(connected)?,
            unconnected: table(unconnected)?,
        })
    }
    pub fn num_layers(&self) -> usize {
        self.unconnected.num_layers()
    }
    /// Spacing between layers `i1` and `i2`
    pub fn spacing(&self, i1: usize, i2: usize, connected: bool) -> Option<Dist> {
        match connected {
            true => self.connected.get(i1, i2),
            false => self.unconnected.get(i1, i2),
        }
    }
    /// Largest unconnected spacing. Zero if there are none.
    pub fn worst_spacing_distance(&self) -> Dist {
        if self.unconnected.num_rules() == 0 {
            warn!("Worst spacing requested of a rule-set without unconnected rules");
        }
        self.unconnected.worst()
    }
    /// Largest unconnected spacing around layer `idx`
    pub fn max_surround(&self, idx: usize) -> Option<Dist> {
        self.unconnected.max_surround(idx)
    }
    /// Total number of rules, connected and unconnected
    pub fn num_rules(&self) -> usize {
        self.connected.num_rules() + self.unconnected.num_rules()
    }
}
