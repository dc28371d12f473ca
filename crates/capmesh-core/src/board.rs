use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Point, Polygon, Rect};
use crate::layer::ZIndex;
use crate::obstacle::Obstacle;

/// Tuning knobs for the seeding phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingOptions {
    /// Upper bound on candidates examined before seeding stops.
    pub max_candidates: usize,
    /// Candidates narrower or shorter than this are discarded.
    pub min_seed_size: f64,
}

impl Default for SeedingOptions {
    fn default() -> Self {
        Self {
            max_candidates: 50_000,
            min_seed_size: 1e-3,
        }
    }
}

/// Tuning knobs for the expansion phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionOptions {
    /// Minimum extra growth the unobstructed layers must gain before a
    /// placement is split by layer.
    pub min_split_gain: f64,
    /// Re-probe sides that stopped on a shared midline once all other
    /// growth has settled.
    pub settle_midlines: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            min_split_gain: 1e-3,
            settle_midlines: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    pub seeding: SeedingOptions,
    pub expansion: ExpansionOptions,
}

/// Everything the mesh builder needs to know about a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDescription {
    pub bounds: Rect,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// Physical board shape, if it is not simply `bounds`.
    #[serde(default)]
    pub outline: Option<Vec<Point>>,
    /// Area inside `bounds` but outside the outline. Derived from the
    /// outline when absent.
    #[serde(default)]
    pub void_rects: Option<Vec<Rect>>,
    /// Explicit layer stack, top-down.
    #[serde(default)]
    pub layer_names: Option<Vec<String>>,
    /// Explicit name -> z-index placement, applied over the layer stack.
    #[serde(default)]
    pub layer_z: Option<BTreeMap<String, ZIndex>>,
    /// Number of layers when no names are given anywhere.
    #[serde(default)]
    pub layer_count: Option<usize>,
    /// Margin every obstacle is grown by before indexing.
    #[serde(default)]
    pub clearance: f64,
    #[serde(default)]
    pub options: MeshOptions,
}

impl BoardDescription {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            obstacles: Vec::new(),
            outline: None,
            void_rects: None,
            layer_names: None,
            layer_z: None,
            layer_count: None,
            clearance: 0.0,
            options: MeshOptions::default(),
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_outline(mut self, outline: Vec<Point>) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn with_layer_count(mut self, count: usize) -> Self {
        self.layer_count = Some(count);
        self
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn outline_polygon(&self) -> Option<Polygon> {
        self.outline.as_ref().map(|v| Polygon::new(v.clone()))
    }

    /// The same board with every obstacle pre-grown by `clearance` and the
    /// clearance parameter reset to zero.
    pub fn with_preinflated_obstacles(&self) -> Self {
        let mut board = self.clone();
        board.obstacles = self
            .obstacles
            .iter()
            .map(|o| o.inflated(self.clearance))
            .collect();
        board.clearance = 0.0;
        board
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
