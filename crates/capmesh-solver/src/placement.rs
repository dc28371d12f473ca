use capmesh_core::{rect_envelope, MeshNode, Rect, ZIndex};
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// A free rectangle committed to the mesh, with the layers it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub rect: Rect,
    /// Sorted layer set.
    pub z: Vec<ZIndex>,
}

impl Placement {
    pub fn new(rect: Rect, z: &[ZIndex]) -> Self {
        let mut z = z.to_vec();
        z.sort_unstable();
        z.dedup();
        Self { rect, z }
    }

    pub fn shares_layer_with(&self, z: &[ZIndex]) -> bool {
        self.z.iter().any(|l| z.contains(l))
    }

    pub fn to_mesh_node(&self, n: usize) -> MeshNode {
        MeshNode::new(MeshNode::sequential_id(n), &self.rect, &self.z)
    }
}

/// Number the non-degenerate placements as mesh nodes, in order.
pub fn placements_to_nodes<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> Vec<MeshNode> {
    placements
        .into_iter()
        .filter(|p| !p.rect.is_degenerate())
        .enumerate()
        .map(|(n, p)| p.to_mesh_node(n))
        .collect()
}

/// R-tree entry pointing at a placement by position.
#[derive(Debug, Clone, PartialEq)]
struct PlacedEntry {
    index: usize,
    rect: Rect,
}

impl RTreeObject for PlacedEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        rect_envelope(&self.rect)
    }
}

/// Footprints of the placements made so far, kept in step with their rects.
#[derive(Debug, Default)]
pub struct PlacementIndex {
    tree: RTree<PlacedEntry>,
}

impl PlacementIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, index: usize, rect: Rect) {
        self.tree.insert(PlacedEntry { index, rect });
    }

    /// Replace the footprint recorded for `index`.
    pub fn update(&mut self, index: usize, old: Rect, new: Rect) {
        self.tree.remove(&PlacedEntry { index, rect: old });
        self.tree.insert(PlacedEntry { index, rect: new });
    }

    /// Positions of placements whose interior overlaps `region`, ascending.
    pub fn overlapping(&self, region: &Rect) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&rect_envelope(region))
            .filter(|e| e.rect.overlaps_interior(region))
            .map(|e| e.index)
            .collect();
        hits.sort_unstable();
        hits
    }
}
