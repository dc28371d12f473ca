use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::layer::ZIndex;

/// Anything that can be reduced to an axis-aligned footprint for indexing.
pub trait Footprint {
    /// Bounding rectangle after growing the shape by `clearance` on every side.
    ///
    /// The clearance is applied to the shape itself before the bounding
    /// rectangle is taken, so `padded_bounds(c)` of a shape equals
    /// `padded_bounds(0.0)` of the same shape inflated by `c`.
    fn padded_bounds(&self, clearance: f64) -> Rect;
}

/// An axis-aligned rectangular pad, keepout or trace segment bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

impl Footprint for RectShape {
    fn padded_bounds(&self, clearance: f64) -> Rect {
        Rect::from_center(
            self.center,
            self.width + 2.0 * clearance,
            self.height + 2.0 * clearance,
        )
    }
}

/// An ellipse given by its center and full width/height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvalShape {
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

impl Footprint for OvalShape {
    fn padded_bounds(&self, clearance: f64) -> Rect {
        let rx = self.width / 2.0 + clearance;
        let ry = self.height / 2.0 + clearance;
        Rect::from_center(self.center, 2.0 * rx, 2.0 * ry)
    }
}

/// Obstacle geometry as declared by the board description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObstacleShape {
    Rect(RectShape),
    Oval(OvalShape),
    /// Any shape the index builder does not know how to footprint.
    #[serde(other)]
    Unsupported,
}

impl ObstacleShape {
    pub fn rect(center: Point, width: f64, height: f64) -> Self {
        ObstacleShape::Rect(RectShape {
            center,
            width,
            height,
        })
    }

    pub fn oval(center: Point, width: f64, height: f64) -> Self {
        ObstacleShape::Oval(OvalShape {
            center,
            width,
            height,
        })
    }

    /// The footprint capability of this shape, if it has one.
    pub fn footprint(&self) -> Option<&dyn Footprint> {
        match self {
            ObstacleShape::Rect(r) => Some(r),
            ObstacleShape::Oval(o) => Some(o),
            ObstacleShape::Unsupported => None,
        }
    }

    /// The same shape grown by `clearance` on every side.
    pub fn inflated(&self, clearance: f64) -> Self {
        match self {
            ObstacleShape::Rect(r) => ObstacleShape::Rect(RectShape {
                center: r.center,
                width: r.width + 2.0 * clearance,
                height: r.height + 2.0 * clearance,
            }),
            ObstacleShape::Oval(o) => ObstacleShape::Oval(OvalShape {
                center: o.center,
                width: 2.0 * (o.width / 2.0 + clearance),
                height: 2.0 * (o.height / 2.0 + clearance),
            }),
            ObstacleShape::Unsupported => ObstacleShape::Unsupported,
        }
    }
}

/// A keepout on one or more layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub shape: ObstacleShape,
    /// Layer names this obstacle occupies.
    #[serde(default)]
    pub layers: Vec<String>,
    /// Explicit z-indices this obstacle occupies, in addition to `layers`.
    #[serde(default)]
    pub z_layers: Vec<ZIndex>,
}

impl Obstacle {
    /// An obstacle with no layer references, which occupies every layer.
    pub fn new(shape: ObstacleShape) -> Self {
        Self {
            shape,
            layers: Vec::new(),
            z_layers: Vec::new(),
        }
    }

    pub fn on_layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn on_z(mut self, z_layers: &[ZIndex]) -> Self {
        self.z_layers = z_layers.to_vec();
        self
    }

    pub fn has_layer_refs(&self) -> bool {
        !self.layers.is_empty() || !self.z_layers.is_empty()
    }

    /// Copy of this obstacle with its shape grown by `clearance`.
    pub fn inflated(&self, clearance: f64) -> Self {
        Self {
            shape: self.shape.inflated(clearance),
            ..self.clone()
        }
    }
}
