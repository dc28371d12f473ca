use capmesh_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// A filled or outlined rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRect {
    /// [min_x, min_y, max_x, max_y]
    pub bbox: [f64; 4],
    pub fill: [f32; 4], // RGBA
    pub stroke: Option<[f32; 4]>,
    pub label: String,
    /// Layer label such as `"z0,1"`, when the rect belongs to specific layers.
    pub layer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    pub color: [f32; 4],
    pub label: String,
}

/// An open or closed polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLine {
    /// Flat array of vertices: [x0, y0, x1, y1, ...]
    pub vertices: Vec<f64>,
    pub color: [f32; 4],
    pub closed: bool,
    pub label: String,
}

/// Snapshot of solver state for the debug viewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub rects: Vec<SceneRect>,
    pub points: Vec<ScenePoint>,
    pub lines: Vec<SceneLine>,
}

impl Scene {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn add_filled_rect(&mut self, rect: &Rect, color: Color, opacity: f32, label: &str, layer: Option<String>) {
        self.rects.push(SceneRect {
            bbox: [rect.min.x, rect.min.y, rect.max.x, rect.max.y],
            fill: color.to_f32_array(opacity),
            stroke: Some(color.to_f32_array(1.0)),
            label: label.to_string(),
            layer,
        });
    }

    pub fn add_outlined_rect(&mut self, rect: &Rect, color: Color, label: &str) {
        self.rects.push(SceneRect {
            bbox: [rect.min.x, rect.min.y, rect.max.x, rect.max.y],
            fill: [0.0; 4],
            stroke: Some(color.to_f32_array(1.0)),
            label: label.to_string(),
            layer: None,
        });
    }

    pub fn add_point(&mut self, p: &Point, color: Color, label: &str) {
        self.points.push(ScenePoint {
            x: p.x,
            y: p.y,
            color: color.to_f32_array(1.0),
            label: label.to_string(),
        });
    }

    pub fn add_polyline(&mut self, points: &[Point], color: Color, closed: bool, label: &str) {
        self.lines.push(SceneLine {
            vertices: points.iter().flat_map(|p| [p.x, p.y]).collect(),
            color: color.to_f32_array(1.0),
            closed,
            label: label.to_string(),
        });
    }

    /// Append every element of `other`, keeping this scene's title.
    pub fn extend(&mut self, other: Scene) {
        self.rects.extend(other.rects);
        self.points.extend(other.points);
        self.lines.extend(other.lines);
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.points.is_empty() && self.lines.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
