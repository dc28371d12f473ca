//! # Capmesh Solver
//!
//! Turns an obstacle index into a capacity mesh in two resumable phases:
//! seeding carves the free area into maximal rectangles, expansion grows
//! them until they touch obstacles, the board edge or each other.
//!
//! [`MeshPipeline`] sequences the phases one bounded step at a time, so a
//! caller can interleave meshing with other work, stop early and still
//! collect a usable (coarser) mesh, or snapshot solver state for debugging.

pub mod expansion;
pub mod pipeline;
pub mod placement;
pub mod seeding;

pub use expansion::{ExpansionOutput, ExpansionSolver, SideState};
pub use pipeline::{build_mesh, MeshPipeline, Phase, PipelineStats};
pub use placement::Placement;
pub use seeding::{SeedingOutput, SeedingSolver};
