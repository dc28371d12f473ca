use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::layer::ZIndex;

/// A traversable capacity cell handed to the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshNode {
    pub id: String,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Sorted, de-duplicated layers this cell is usable on.
    pub available_z: Vec<ZIndex>,
    /// `"z"` followed by the comma-joined `available_z`, e.g. `"z0,2"`.
    pub layer: String,
}

impl MeshNode {
    pub fn new(id: impl Into<String>, rect: &Rect, z: &[ZIndex]) -> Self {
        let mut available_z = z.to_vec();
        available_z.sort_unstable();
        available_z.dedup();
        let layer = layer_label(&available_z);
        Self {
            id: id.into(),
            center: rect.center(),
            width: rect.width(),
            height: rect.height(),
            available_z,
            layer,
        }
    }

    /// Sequential node identifier used by every output path.
    pub fn sequential_id(n: usize) -> String {
        format!("cmn_{}", n)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.width, self.height)
    }

    pub fn shares_layer(&self, other: &MeshNode) -> bool {
        self.available_z.iter().any(|z| other.available_z.contains(z))
    }
}

pub fn layer_label(z: &[ZIndex]) -> String {
    let joined: Vec<String> = z.iter().map(|z| z.to_string()).collect();
    format!("z{}", joined.join(","))
}
