//! # Capmesh Renderer
//!
//! Debug scene graph for the capacity-mesh solvers. Scenes are plain
//! JSON-serializable lists of rectangles, points and polylines that an
//! external viewer draws; nothing here is part of the meshing algorithm.

pub mod palette;
pub mod scene;

pub use palette::Color;
pub use scene::{Scene, SceneLine, ScenePoint, SceneRect};

use capmesh_core::{MeshNode, ObstacleIndex};
use log::debug;

/// Board bounds, outline, voids and obstacles of one layer stack.
pub fn board_scene(index: &ObstacleIndex, title: &str) -> Scene {
    let mut scene = Scene::new(title);
    scene.add_outlined_rect(index.bounds(), palette::BOUNDS, "bounds");
    if let Some(outline) = index.outline() {
        scene.add_polyline(&outline.vertices, palette::OUTLINE, true, "outline");
    }
    for void in index.void_rects() {
        scene.add_filled_rect(void, palette::VOID, 0.3, "void", None);
    }
    for z in 0..index.layer_count() {
        let layer = Some(capmesh_core::mesh_node::layer_label(&[z]));
        for entry in index.entries(z) {
            if matches!(entry.source, capmesh_core::EntrySource::Obstacle(_)) {
                scene.add_filled_rect(&entry.rect, palette::OBSTACLE, 0.5, "obstacle", layer.clone());
            }
        }
    }
    debug!("Board scene '{}': {} rects", title, scene.rects.len());
    scene
}

/// Mesh nodes colored by their layer set.
pub fn mesh_scene(nodes: &[MeshNode], title: &str) -> Scene {
    let mut scene = Scene::new(title);
    for node in nodes {
        scene.add_filled_rect(
            &node.rect(),
            palette::layer_color(&node.available_z),
            0.35,
            &node.id,
            Some(node.layer.clone()),
        );
    }
    scene
}
