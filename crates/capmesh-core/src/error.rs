use thiserror::Error;

/// Errors raised while building the obstacle index or sequencing the solver stages.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Obstacle {obstacle} references z-indices {indices:?} outside 0..{layer_count}")]
    LayerOutOfRange {
        obstacle: usize,
        indices: Vec<usize>,
        layer_count: usize,
    },

    #[error("Obstacle {obstacle} references unknown layer '{layer}'")]
    UnknownLayer { obstacle: usize, layer: String },

    #[error("Layer map entry '{name}' -> z{z} is invalid for {layer_count} layers")]
    InvalidLayerMap {
        name: String,
        z: usize,
        layer_count: usize,
    },

    #[error("Layer stack is empty")]
    EmptyLayerStack,

    #[error("Layer '{name}' is listed twice (again at z{z})")]
    DuplicateLayer { name: String, z: usize },

    #[error("Invalid board bounds: {0}")]
    InvalidBounds(String),

    #[error("Stage '{stage}' requires '{field}' from the previous stage")]
    MissingStageOutput {
        stage: &'static str,
        field: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeshError {
    /// Configuration errors come from the caller's board description;
    /// everything else is either a broken pipeline contract or I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MeshError::LayerOutOfRange { .. }
                | MeshError::UnknownLayer { .. }
                | MeshError::InvalidLayerMap { .. }
                | MeshError::EmptyLayerStack
                | MeshError::DuplicateLayer { .. }
                | MeshError::InvalidBounds(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MeshError>;
