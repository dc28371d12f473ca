use std::collections::BTreeSet;

use log::{debug, info, warn};
use rstar::{RTree, RTreeObject, AABB};

use crate::board::BoardDescription;
use crate::error::{MeshError, Result};
use crate::geometry::{Polygon, Rect};
use crate::layer::{canonical_names, sort_canonically, LayerMap, ZIndex};
use crate::obstacle::Obstacle;

/// Where an index entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// Position of the obstacle in the board description.
    Obstacle(usize),
    /// Position of the void rectangle in [`ObstacleIndex::void_rects`].
    Void(usize),
}

/// A padded obstacle or board-void rectangle on one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub rect: Rect,
    pub z: ZIndex,
    pub source: EntrySource,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        rect_envelope(&self.rect)
    }
}

/// R-tree envelope of a rectangle.
pub fn rect_envelope(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y])
}

/// Per-layer R-trees of everything a mesh node may not overlap.
///
/// Built once from a [`BoardDescription`]; read-only afterwards.
#[derive(Debug)]
pub struct ObstacleIndex {
    layers: Vec<RTree<IndexEntry>>,
    layer_map: LayerMap,
    bounds: Rect,
    outline: Option<Polygon>,
    void_rects: Vec<Rect>,
    /// Resolved z-indices per obstacle, by position in the board description.
    resolved_z: Vec<Vec<ZIndex>>,
    skipped: Vec<usize>,
}

impl ObstacleIndex {
    /// Resolve layers, validate every obstacle and populate the per-layer trees.
    ///
    /// Validation runs over all obstacles before anything is inserted, so a
    /// configuration error never leaves a partially built index behind.
    pub fn build(board: &BoardDescription) -> Result<Self> {
        let bounds = board.bounds;
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(MeshError::InvalidBounds(format!(
                "{}x{} board",
                bounds.width(),
                bounds.height()
            )));
        }

        let layer_map = resolve_layer_map(board)?;
        let layer_count = layer_map.layer_count();

        let resolved_z = board
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| resolve_obstacle_z(i, o, &layer_map))
            .collect::<Result<Vec<_>>>()?;

        let outline = board.outline_polygon();
        let void_rects = match (&outline, &board.void_rects) {
            (Some(_), Some(voids)) => voids.clone(),
            (Some(poly), None) => poly.complement_rects(&bounds),
            (None, Some(voids)) => {
                if !voids.is_empty() {
                    warn!("Ignoring {} void rects on a board without an outline", voids.len());
                }
                Vec::new()
            }
            (None, None) => Vec::new(),
        };

        let mut per_layer: Vec<Vec<IndexEntry>> = vec![Vec::new(); layer_count];
        let mut skipped = Vec::new();
        for (i, obstacle) in board.obstacles.iter().enumerate() {
            let Some(footprint) = obstacle.shape.footprint() else {
                debug!("Skipping obstacle {} with unsupported shape", i);
                skipped.push(i);
                continue;
            };
            let rect = footprint.padded_bounds(board.clearance);
            for &z in &resolved_z[i] {
                per_layer[z].push(IndexEntry {
                    rect,
                    z,
                    source: EntrySource::Obstacle(i),
                });
            }
        }
        for (i, rect) in void_rects.iter().enumerate() {
            for (z, entries) in per_layer.iter_mut().enumerate() {
                entries.push(IndexEntry {
                    rect: *rect,
                    z,
                    source: EntrySource::Void(i),
                });
            }
        }

        let layers: Vec<RTree<IndexEntry>> = per_layer.into_iter().map(RTree::bulk_load).collect();
        info!(
            "Built obstacle index: {} layers, {} obstacles ({} skipped), {} void rects",
            layer_count,
            board.obstacles.len(),
            skipped.len(),
            void_rects.len()
        );

        Ok(Self {
            layers,
            layer_map,
            bounds,
            outline,
            void_rects,
            resolved_z,
            skipped,
        })
    }

    /// Entries on layer `z` whose interior overlaps `region`.
    pub fn query(&self, z: ZIndex, region: &Rect) -> Vec<&IndexEntry> {
        let Some(tree) = self.layers.get(z) else {
            return Vec::new();
        };
        tree.locate_in_envelope_intersecting(&rect_envelope(region))
            .filter(|e| e.rect.overlaps_interior(region))
            .collect()
    }

    /// Whether `region` is clear of every entry on every layer in `zs`.
    pub fn is_free(&self, zs: &[ZIndex], region: &Rect) -> bool {
        zs.iter().all(|&z| self.query(z, region).is_empty())
    }

    /// All entries on layer `z`, in no particular order.
    pub fn entries(&self, z: ZIndex) -> impl Iterator<Item = &IndexEntry> {
        self.layers.get(z).into_iter().flat_map(|t| t.iter())
    }

    pub fn layer_map(&self) -> &LayerMap {
        &self.layer_map
    }

    pub fn layer_count(&self) -> usize {
        self.layer_map.layer_count()
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn outline(&self) -> Option<&Polygon> {
        self.outline.as_ref()
    }

    pub fn void_rects(&self) -> &[Rect] {
        &self.void_rects
    }

    /// Resolved z-indices of the obstacle at `obstacle` in the board description.
    pub fn resolved_z(&self, obstacle: usize) -> Option<&[ZIndex]> {
        self.resolved_z.get(obstacle).map(Vec::as_slice)
    }

    /// Obstacles that produced no entry because their shape is unsupported.
    pub fn skipped_obstacles(&self) -> &[usize] {
        &self.skipped
    }

    pub fn len(&self, z: ZIndex) -> usize {
        self.layers.get(z).map_or(0, RTree::size)
    }

    pub fn total_entries(&self) -> usize {
        self.layers.iter().map(RTree::size).sum()
    }
}

/// Layer stack for a board: the explicit list if there is one, otherwise
/// the names obstacles refer to (padded out to `layer_count` canonical
/// names), with any explicit z-index placement applied on top.
fn resolve_layer_map(board: &BoardDescription) -> Result<LayerMap> {
    let names = match &board.layer_names {
        Some(names) => names.clone(),
        None => {
            let referenced: Vec<String> = board
                .obstacles
                .iter()
                .flat_map(|o| o.layers.iter().cloned())
                .collect();
            let mut names = canonical_names(board.layer_count.unwrap_or(0));
            for name in sort_canonically(referenced) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            if names.is_empty() {
                names = canonical_names(1);
            }
            sort_canonically(names)
        }
    };
    match &board.layer_z {
        Some(overrides) => LayerMap::with_overrides(names, overrides),
        None => LayerMap::from_names(names),
    }
}

fn resolve_obstacle_z(index: usize, obstacle: &Obstacle, layer_map: &LayerMap) -> Result<Vec<ZIndex>> {
    if !obstacle.has_layer_refs() {
        return Ok(layer_map.all_z());
    }

    let mut zs = BTreeSet::new();
    for name in &obstacle.layers {
        let z = layer_map.z_of(name).ok_or_else(|| MeshError::UnknownLayer {
            obstacle: index,
            layer: name.clone(),
        })?;
        zs.insert(z);
    }
    zs.extend(obstacle.z_layers.iter().copied());

    let out_of_range: Vec<ZIndex> = zs
        .iter()
        .copied()
        .filter(|&z| !layer_map.contains_z(z))
        .collect();
    if !out_of_range.is_empty() {
        return Err(MeshError::LayerOutOfRange {
            obstacle: index,
            indices: out_of_range,
            layer_count: layer_map.layer_count(),
        });
    }
    Ok(zs.into_iter().collect())
}
