//! Two-phase pipeline: seeding, then expansion.
//!
//! The stages are an ordered table of `{name, phase, build, extract}`. The
//! pipeline builds the current stage lazily from the shared context, steps
//! it one unit of work at a time, and once it reports done extracts its
//! output into the context for the next stage.

use std::sync::Arc;

use capmesh_core::{BoardDescription, MeshError, MeshNode, MeshOptions, ObstacleIndex, Result};
use capmesh_renderer::Scene;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::expansion::{ExpansionOutput, ExpansionSolver};
use crate::placement::placements_to_nodes;
use crate::seeding::{SeedingOutput, SeedingSolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Seeding,
    Expansion,
    Done,
}

/// The solver driving the active stage.
pub enum StageSolver {
    Seeding(SeedingSolver),
    Expansion(ExpansionSolver),
}

impl StageSolver {
    pub fn step(&mut self) {
        match self {
            StageSolver::Seeding(s) => s.step(),
            StageSolver::Expansion(s) => s.step(),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            StageSolver::Seeding(s) => s.is_done(),
            StageSolver::Expansion(s) => s.is_done(),
        }
    }

    pub fn visualize(&self) -> Scene {
        match self {
            StageSolver::Seeding(s) => s.visualize(),
            StageSolver::Expansion(s) => s.visualize(),
        }
    }
}

/// Outputs handed from one stage to the next.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub seeding: Option<SeedingOutput>,
    pub expansion: Option<ExpansionOutput>,
}

pub struct StageDef {
    pub name: &'static str,
    pub phase: Phase,
    pub build: fn(&Arc<ObstacleIndex>, &MeshOptions, &PipelineContext) -> Result<StageSolver>,
    pub extract: fn(&StageSolver, &mut PipelineContext) -> Result<()>,
}

pub static STAGES: [StageDef; 2] = [
    StageDef {
        name: "seeding",
        phase: Phase::Seeding,
        build: build_seeding,
        extract: extract_seeding,
    },
    StageDef {
        name: "expansion",
        phase: Phase::Expansion,
        build: build_expansion,
        extract: extract_expansion,
    },
];

fn build_seeding(index: &Arc<ObstacleIndex>, options: &MeshOptions, _: &PipelineContext) -> Result<StageSolver> {
    Ok(StageSolver::Seeding(SeedingSolver::new(
        Arc::clone(index),
        options.seeding.clone(),
    )))
}

fn extract_seeding(solver: &StageSolver, context: &mut PipelineContext) -> Result<()> {
    let StageSolver::Seeding(s) = solver else {
        return Err(MeshError::MissingStageOutput {
            stage: "seeding",
            field: "seeding solver",
        });
    };
    context.seeding = Some(s.output());
    Ok(())
}

fn build_expansion(index: &Arc<ObstacleIndex>, options: &MeshOptions, context: &PipelineContext) -> Result<StageSolver> {
    let seeds = context.seeding.as_ref().ok_or(MeshError::MissingStageOutput {
        stage: "expansion",
        field: "seeding output",
    })?;
    Ok(StageSolver::Expansion(ExpansionSolver::new(
        Arc::clone(index),
        seeds,
        options.expansion.clone(),
    )))
}

fn extract_expansion(solver: &StageSolver, context: &mut PipelineContext) -> Result<()> {
    let StageSolver::Expansion(s) = solver else {
        return Err(MeshError::MissingStageOutput {
            stage: "expansion",
            field: "expansion solver",
        });
    };
    context.expansion = Some(s.output());
    Ok(())
}

/// Progress counters across both stages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PipelineStats {
    pub phase: Phase,
    pub steps: usize,
    pub candidates_examined: usize,
    pub seeds_placed: usize,
    pub mesh_nodes: usize,
}

/// Incremental capacity-mesh builder for one board.
pub struct MeshPipeline {
    index: Arc<ObstacleIndex>,
    options: MeshOptions,
    context: PipelineContext,
    cursor: usize,
    active: Option<StageSolver>,
    phase: Phase,
    steps: usize,
}

impl MeshPipeline {
    /// Build the obstacle index for `board`. Configuration errors surface here.
    pub fn new(board: &BoardDescription) -> Result<Self> {
        let index = ObstacleIndex::build(board)?;
        Ok(Self::with_index(Arc::new(index), board.options.clone()))
    }

    pub fn with_index(index: Arc<ObstacleIndex>, options: MeshOptions) -> Self {
        Self {
            index,
            options,
            context: PipelineContext::default(),
            cursor: 0,
            active: None,
            phase: STAGES[0].phase,
            steps: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> &ObstacleIndex {
        &self.index
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Do one unit of work in the active stage and return the phase after it.
    pub fn step(&mut self) -> Result<Phase> {
        let Some(stage) = STAGES.get(self.cursor) else {
            self.phase = Phase::Done;
            return Ok(Phase::Done);
        };

        let mut solver = match self.active.take() {
            Some(solver) => solver,
            None => {
                debug!("Starting stage '{}'", stage.name);
                (stage.build)(&self.index, &self.options, &self.context)?
            }
        };
        solver.step();
        self.steps += 1;

        if solver.is_done() {
            (stage.extract)(&solver, &mut self.context)?;
            info!("Stage '{}' finished after {} pipeline steps", stage.name, self.steps);
            self.cursor += 1;
            self.phase = STAGES.get(self.cursor).map_or(Phase::Done, |s| s.phase);
        } else {
            self.active = Some(solver);
        }
        Ok(self.phase)
    }

    /// Step until every stage is done and return the mesh.
    pub fn solve(&mut self) -> Result<Vec<MeshNode>> {
        while self.phase != Phase::Done {
            self.step()?;
        }
        Ok(self.output())
    }

    /// The best mesh available right now: expansion output if expansion has
    /// finished, otherwise the seeds placed so far.
    pub fn output(&self) -> Vec<MeshNode> {
        if let Some(expansion) = &self.context.expansion {
            return expansion.mesh_nodes.clone();
        }
        if let Some(seeding) = &self.context.seeding {
            return placements_to_nodes(&seeding.placed);
        }
        match &self.active {
            Some(StageSolver::Seeding(s)) => placements_to_nodes(s.placed()),
            _ => Vec::new(),
        }
    }

    /// Debug scene for the current state.
    pub fn visualize(&self) -> Scene {
        if let Some(solver) = &self.active {
            return solver.visualize();
        }
        let title = match self.phase {
            Phase::Seeding => "pre-seeding",
            Phase::Expansion => "post-seeding",
            Phase::Done => "post-expansion",
        };
        let mut scene = capmesh_renderer::board_scene(&self.index, title);
        scene.extend(capmesh_renderer::mesh_scene(&self.output(), title));
        scene
    }

    pub fn stats(&self) -> PipelineStats {
        let (candidates_examined, seeds_placed) = match (&self.context.seeding, &self.active) {
            (Some(s), _) => (s.candidates_examined, s.placed.len()),
            (None, Some(StageSolver::Seeding(s))) => (s.stats().examined, s.placed().len()),
            _ => (0, 0),
        };
        PipelineStats {
            phase: self.phase,
            steps: self.steps,
            candidates_examined,
            seeds_placed,
            mesh_nodes: self.context.expansion.as_ref().map_or(0, |e| e.mesh_nodes.len()),
        }
    }
}

/// Build the complete mesh for `board` in one call.
pub fn build_mesh(board: &BoardDescription) -> Result<Vec<MeshNode>> {
    MeshPipeline::new(board)?.solve()
}
