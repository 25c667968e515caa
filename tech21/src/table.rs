//!
//! # Named, Ordered, Slot-Mapped Tables
//!
//! Storage shared by a technology's layers, arcs and nodes.
//! Each entry is reachable three ways:
//! * By its [slotmap::Key], which other entries use as references
//! * By its unique name
//! * By its position in registration order, which is meaningful.
//!   Design-rule tables, for example, are indexed by layer position.
//!
//! Tables serialize as a plain list of entries, in registration order.
//! Loading re-adds each entry, so the name index and order are rebuilt rather than trusted,
//! and keys match those of the table which was saved.
//!

// Std-Lib
use std::collections::HashMap;

// Crates.io
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use slotmap::{Key, SlotMap};

// Local imports
use crate::error::{TechError, TechResult};

/// # Named Trait
/// For entries of a [Table]
pub trait Named {
    /// Kind-name used in error messages, e.g. "layer"
    const KIND: &'static str;
    fn name(&self) -> &str;
}

/// # Named Table
#[derive(Debug, Clone)]
pub struct Table<K: Key, V> {
    slots: SlotMap<K, V>,
    order: Vec<K>,
    names: HashMap<String, K>,
}
impl<K: Key, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
            names: HashMap::new(),
        }
    }
}
impl<K: Key, V: Serialize> Serialize for Table<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(_, v)| v))
    }
}
impl<'de, K: Key, V: Named + Deserialize<'de>> Deserialize<'de> for Table<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<V>::deserialize(deserializer)?;
        let mut table = Self::default();
        for entry in entries {
            table.add(entry).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}
impl<K: Key, V: Named> Table<K, V> {
    /// Add `value`, returning its key.
    /// Fails if an entry of the same name is already present.
    pub fn add(&mut self, value: V) -> TechResult<K> {
        if self.names.contains_key(value.name()) {
            return Err(TechError::Duplicate {
                kind: V::KIND,
                name: value.name().to_string(),
            });
        }
        let name = value.name().to_string();
        let key = self.slots.insert(value);
        self.order.push(key);
        self.names.insert(name, key);
        Ok(key)
    }
    /// Get the key of the entry named `name`
    pub fn key(&self, name: &str) -> Option<K> {
        self.names.get(name).copied()
    }
    /// Get the key of the entry named `name`, or fail with [TechError::NotFound]
    pub fn require(&self, name: &str) -> TechResult<K> {
        self.key(name)
            .ok_or_else(|| TechError::not_found(V::KIND, name))
    }
    /// Get a reference to the entry named `name`
    pub fn by_name(&self, name: &str) -> Option<&V> {
        self.slots.get(self.key(name)?)
    }
    /// Get the name of the entry at `key`
    pub fn name_of(&self, key: K) -> Option<&str> {
        self.slots.get(key).map(|v| v.name())
    }
}
impl<K: Key, V> Table<K, V> {
    /// Get a reference to the entry at `key`
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }
    /// Get a mutable reference to the entry at `key`.
    /// Renaming through this reference is not supported.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }
    /// Boolean indication of whether `key` refers to one of our entries
    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }
    /// Registration-order position of `key`
    pub fn index(&self, key: K) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }
    /// Key of the entry at registration-order position `idx`
    pub fn key_at(&self, idx: usize) -> Option<K> {
        self.order.get(idx).copied()
    }
    /// Entry at registration-order position `idx`
    pub fn at(&self, idx: usize) -> Option<&V> {
        self.slots.get(self.key_at(idx)?)
    }
    /// Iterate over (key, entry) pairs, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |k| self.slots.get(*k).map(|v| (*k, v)))
    }
    /// Iterate over keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
