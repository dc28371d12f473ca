//! # Capmesh Core
//!
//! Board model and obstacle indexing for capacity-mesh generation: geometry
//! primitives, the layer map, obstacle shapes and the per-layer R-tree index
//! the seeding and expansion solvers query.

pub mod board;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod mesh_node;
pub mod obstacle;
pub mod spatial;

pub use board::{BoardDescription, ExpansionOptions, MeshOptions, SeedingOptions};
pub use error::{MeshError, Result};
pub use geometry::{Point, Polygon, Rect, Side, EPSILON};
pub use layer::{LayerMap, ZIndex};
pub use mesh_node::MeshNode;
pub use obstacle::{Footprint, Obstacle, ObstacleShape};
pub use spatial::{rect_envelope, EntrySource, IndexEntry, ObstacleIndex};
