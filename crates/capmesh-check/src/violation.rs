use serde::{Deserialize, Serialize};

/// Kind of mesh defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two nodes sharing a layer overlap.
    Overlap,
    /// A node extends past the board bounds.
    OutOfBounds,
    /// A node extends past the board outline.
    OutsideOutline,
    /// A node covers an obstacle on one of its layers.
    ObstacleIntersection,
    /// A node references a layer the board does not have.
    LayerOutOfRange,
    /// A node with zero width or height, or no layers.
    Degenerate,
}

/// Severity level of a mesh violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A single defect found in a generated mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshViolation {
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub message: String,
    /// Ids of the nodes involved.
    pub node_ids: Vec<String>,
    /// Bounding box of the offending region: [min_x, min_y, max_x, max_y]
    pub bbox: [f64; 4],
}
