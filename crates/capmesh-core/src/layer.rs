use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Integer routing layer index, `0..layer_count`.
pub type ZIndex = usize;

/// Ordered layer names with a bijective name <-> z-index mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMap {
    /// Layer names ordered by z-index.
    names: Vec<String>,
    z_by_name: BTreeMap<String, ZIndex>,
}

impl LayerMap {
    /// Layers numbered in the order given. The list must be non-empty and
    /// free of duplicates for the name <-> z mapping to be a bijection.
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(MeshError::EmptyLayerStack);
        }
        let mut z_by_name = BTreeMap::new();
        for (z, name) in names.iter().enumerate() {
            if z_by_name.insert(name.clone(), z).is_some() {
                return Err(MeshError::DuplicateLayer {
                    name: name.clone(),
                    z,
                });
            }
        }
        Ok(Self { names, z_by_name })
    }

    /// Build the map from a base name list, then move the names listed in
    /// `overrides` to their requested z-index. The remaining names fill the
    /// free slots in their original order.
    pub fn with_overrides(
        names: Vec<String>,
        overrides: &BTreeMap<String, ZIndex>,
    ) -> Result<Self> {
        let names = Self::from_names(names)?.names;
        let layer_count = names.len();
        let mut slots: Vec<Option<String>> = vec![None; layer_count];

        for (name, &z) in overrides {
            if !names.contains(name) {
                warn!("Ignoring z-index override for unknown layer '{}'", name);
                continue;
            }
            if z >= layer_count || slots[z].is_some() {
                return Err(MeshError::InvalidLayerMap {
                    name: name.clone(),
                    z,
                    layer_count,
                });
            }
            slots[z] = Some(name.clone());
        }

        let placed: Vec<String> = slots.iter().flatten().cloned().collect();
        let mut rest = names.into_iter().filter(|n| !placed.contains(n));
        for slot in slots.iter_mut().filter(|s| s.is_none()) {
            *slot = rest.next();
        }

        Self::from_names(slots.into_iter().flatten().collect())
    }

    pub fn z_of(&self, name: &str) -> Option<ZIndex> {
        self.z_by_name.get(name).copied()
    }

    pub fn name_of(&self, z: ZIndex) -> Option<&str> {
        self.names.get(z).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn layer_count(&self) -> usize {
        self.names.len()
    }

    /// Every z-index, ascending.
    pub fn all_z(&self) -> Vec<ZIndex> {
        (0..self.names.len()).collect()
    }

    pub fn contains_z(&self, z: ZIndex) -> bool {
        z < self.names.len()
    }
}

/// Canonical names for a stack of `count` layers.
pub fn canonical_names(count: usize) -> Vec<String> {
    match count {
        0 => Vec::new(),
        1 => vec!["top".to_string()],
        n => std::iter::once("top".to_string())
            .chain((1..n - 1).map(|i| format!("inner{}", i)))
            .chain(std::iter::once("bottom".to_string()))
            .collect(),
    }
}

/// Sort names top-down: `top`, `innerN` by `N`, anything else alphabetically,
/// `bottom` last. Duplicates are removed.
pub fn sort_canonically(mut names: Vec<String>) -> Vec<String> {
    names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    names.dedup();
    names
}

fn sort_key(name: &str) -> (u8, u32, &str) {
    if name == "top" {
        return (0, 0, name);
    }
    if name == "bottom" {
        return (3, 0, name);
    }
    match name.strip_prefix("inner").and_then(|n| n.parse::<u32>().ok()) {
        Some(n) => (1, n, name),
        None => (2, 0, name),
    }
}
