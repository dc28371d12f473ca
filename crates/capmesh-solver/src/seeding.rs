//! Seeding: carve the board into maximal obstacle-free rectangles.
//!
//! Starting from the whole board on every layer, each step takes the
//! pending candidate spanning the most layers (largest first among equals)
//! and looks for anything overlapping it on its layers: indexed obstacles, board voids and seeds already placed. A clear
//! candidate is placed. Otherwise the dominant blocker is cut out and the
//! inverse rectangles around it are queued on the blocker's layers, while
//! the untouched layers keep the full candidate.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use capmesh_core::geometry::is_self_rect;
use capmesh_core::{ObstacleIndex, Rect, SeedingOptions, ZIndex};
use capmesh_renderer::{palette, Scene};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::placement::{Placement, PlacementIndex};

/// A rectangle waiting to be checked against the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub z: Vec<ZIndex>,
}

#[derive(Debug)]
struct Pending {
    candidate: Candidate,
    area: f64,
    seq: usize,
}

// Max-heap order: more layers first, then larger area, then first queued.
// Every multi-layer candidate is settled before any fragment with fewer
// layers is placed.
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.candidate
            .z
            .len()
            .cmp(&other.candidate.z.len())
            .then_with(|| self.area.total_cmp(&other.area))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// One footprint overlapping a candidate, with the candidate layers it blocks.
#[derive(Debug, Clone)]
struct Blocker {
    rect: Rect,
    z: Vec<ZIndex>,
}

/// Everything the expansion phase needs from seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingOutput {
    pub bounds: Rect,
    pub candidates_examined: usize,
    pub placed: Vec<Placement>,
    pub layer_names: Vec<String>,
}

/// Counters describing where candidates went.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeedingStats {
    pub examined: usize,
    pub placed: usize,
    pub subdivided: usize,
    pub rejected_self: usize,
    pub dropped_small: usize,
    pub dropped_outside: usize,
}

pub struct SeedingSolver {
    index: Arc<ObstacleIndex>,
    options: SeedingOptions,
    queue: BinaryHeap<Pending>,
    next_seq: usize,
    placed: Vec<Placement>,
    placed_index: PlacementIndex,
    stats: SeedingStats,
    done: bool,
}

impl SeedingSolver {
    pub fn new(index: Arc<ObstacleIndex>, options: SeedingOptions) -> Self {
        let root = Candidate {
            rect: *index.bounds(),
            z: index.layer_map().all_z(),
        };
        let mut solver = Self {
            index,
            options,
            queue: BinaryHeap::new(),
            next_seq: 0,
            placed: Vec::new(),
            placed_index: PlacementIndex::new(),
            stats: SeedingStats::default(),
            done: false,
        };
        solver.push(root);
        solver
    }

    /// Examine one candidate.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        if self.stats.examined >= self.options.max_candidates {
            warn!(
                "Seeding stopped after {} candidates with {} still pending",
                self.stats.examined,
                self.queue.len()
            );
            self.finish();
            return;
        }
        let Some(Pending { candidate, .. }) = self.queue.pop() else {
            self.finish();
            return;
        };
        self.stats.examined += 1;

        let blockers = self.blockers_of(&candidate);
        match dominant_blocker(&blockers, &candidate.rect) {
            None => self.place(candidate),
            Some(blocker) => self.subdivide(&candidate, blocker),
        }

        if self.queue.is_empty() {
            self.finish();
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn placed(&self) -> &[Placement] {
        &self.placed
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> SeedingStats {
        self.stats
    }

    pub fn output(&self) -> SeedingOutput {
        SeedingOutput {
            bounds: *self.index.bounds(),
            candidates_examined: self.stats.examined,
            placed: self.placed.clone(),
            layer_names: self.index.layer_map().names().to_vec(),
        }
    }

    pub fn visualize(&self) -> Scene {
        let mut scene = capmesh_renderer::board_scene(&self.index, "seeding");
        for (i, p) in self.placed.iter().enumerate() {
            let layer = capmesh_core::mesh_node::layer_label(&p.z);
            scene.add_filled_rect(
                &p.rect,
                palette::layer_color(&p.z),
                0.35,
                &format!("seed {}", i),
                Some(layer),
            );
        }
        for pending in self.queue.iter() {
            scene.add_outlined_rect(&pending.candidate.rect, palette::CANDIDATE, "candidate");
        }
        scene
    }

    fn finish(&mut self) {
        if !self.done {
            self.done = true;
            info!(
                "Seeding finished: {} examined, {} placed, {} subdivided",
                self.stats.examined, self.stats.placed, self.stats.subdivided
            );
        }
    }

    fn push(&mut self, candidate: Candidate) {
        let area = candidate.rect.area();
        self.queue.push(Pending {
            candidate,
            area,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    fn place(&mut self, candidate: Candidate) {
        let index = self.placed.len();
        debug!(
            "Placing seed {} at {:?} on z{:?}",
            index, candidate.rect, candidate.z
        );
        self.placed_index.insert(index, candidate.rect);
        self.placed.push(Placement::new(candidate.rect, &candidate.z));
        self.stats.placed += 1;
    }

    fn subdivide(&mut self, candidate: &Candidate, blocker: Blocker) {
        self.stats.subdivided += 1;

        let untouched: Vec<ZIndex> = candidate
            .z
            .iter()
            .copied()
            .filter(|z| !blocker.z.contains(z))
            .collect();
        if !untouched.is_empty() {
            self.push(Candidate {
                rect: candidate.rect,
                z: untouched,
            });
        }

        // A blocker that only touches the candidate leaves it whole; queueing
        // that piece again would never make progress.
        let center = candidate.rect.center();
        let (width, height) = (candidate.rect.width(), candidate.rect.height());
        for piece in candidate.rect.inverse_rects(&blocker.rect) {
            if is_self_rect(&piece, center, width, height) {
                self.stats.rejected_self += 1;
                continue;
            }
            if piece.width() < self.options.min_seed_size || piece.height() < self.options.min_seed_size {
                self.stats.dropped_small += 1;
                continue;
            }
            if let Some(outline) = self.index.outline() {
                if !outline.touches_rect(&piece) {
                    self.stats.dropped_outside += 1;
                    continue;
                }
            }
            self.push(Candidate {
                rect: piece,
                z: blocker.z.clone(),
            });
        }
    }

    /// Footprints overlapping `candidate` on its layers, grouped so a
    /// multi-layer obstacle shows up once with all the layers it blocks.
    fn blockers_of(&self, candidate: &Candidate) -> Vec<Blocker> {
        let mut blockers: Vec<Blocker> = Vec::new();
        let mut add = |rect: Rect, z: ZIndex| match blockers.iter_mut().find(|b| b.rect == rect) {
            Some(b) => {
                if !b.z.contains(&z) {
                    b.z.push(z);
                }
            }
            None => blockers.push(Blocker { rect, z: vec![z] }),
        };

        for &z in &candidate.z {
            for entry in self.index.query(z, &candidate.rect) {
                add(entry.rect, z);
            }
        }
        for i in self.placed_index.overlapping(&candidate.rect) {
            let placed = &self.placed[i];
            for &z in candidate.z.iter().filter(|z| placed.z.contains(z)) {
                add(placed.rect, z);
            }
        }

        for b in &mut blockers {
            b.z.sort_unstable();
        }
        blockers
    }
}

/// The blocker covering the most of `region`; ties go to the lowest
/// corner so the result does not depend on R-tree iteration order.
fn dominant_blocker(blockers: &[Blocker], region: &Rect) -> Option<Blocker> {
    blockers
        .iter()
        .max_by(|a, b| {
            a.rect
                .overlap_area(region)
                .total_cmp(&b.rect.overlap_area(region))
                .then_with(|| a.z.len().cmp(&b.z.len()))
                .then_with(|| b.rect.min.x.total_cmp(&a.rect.min.x))
                .then_with(|| b.rect.min.y.total_cmp(&a.rect.min.y))
                .then_with(|| b.rect.max.x.total_cmp(&a.rect.max.x))
                .then_with(|| b.rect.max.y.total_cmp(&a.rect.max.y))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use capmesh_core::{BoardDescription, Obstacle, ObstacleShape, Point};

    fn run(board: &BoardDescription) -> SeedingSolver {
        let index = Arc::new(ObstacleIndex::build(board).unwrap());
        let mut solver = SeedingSolver::new(index, board.options.seeding.clone());
        while !solver.is_done() {
            solver.step();
        }
        solver
    }

    fn total_area(placed: &[Placement], z: ZIndex) -> f64 {
        placed.iter().filter(|p| p.z.contains(&z)).map(|p| p.rect.area()).sum()
    }

    #[test]
    fn test_empty_board_is_one_seed() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 5.0)).with_layer_count(2);
        let solver = run(&board);
        assert_eq!(solver.placed().len(), 1);
        assert_eq!(solver.placed()[0].z, vec![0, 1]);
        assert_eq!(solver.stats().examined, 1);
    }

    #[test]
    fn test_center_obstacle_is_tiled_around() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0))
            .with_obstacle(Obstacle::new(ObstacleShape::rect(Point::new(5.0, 5.0), 2.0, 2.0)));
        let solver = run(&board);
        let placed = solver.placed();
        assert!(placed.len() >= 4);
        assert!((total_area(placed, 0) - 96.0).abs() < 1e-6);
        let obstacle = Rect::from_corners(4.0, 4.0, 6.0, 6.0);
        for (i, a) in placed.iter().enumerate() {
            assert!(!a.rect.overlaps_interior(&obstacle));
            for b in &placed[i + 1..] {
                assert!(!a.rect.overlaps_interior(&b.rect));
            }
        }
    }

    #[test]
    fn test_single_layer_obstacle_keeps_other_layer_whole() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0))
            .with_layer_count(2)
            .with_obstacle(
                Obstacle::new(ObstacleShape::rect(Point::new(5.0, 5.0), 2.0, 2.0)).on_layers(&["top"]),
            );
        let solver = run(&board);
        let placed = solver.placed();
        let bottom: Vec<_> = placed.iter().filter(|p| p.z.contains(&1)).collect();
        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].rect, Rect::from_corners(0.0, 0.0, 10.0, 10.0));
        assert!((total_area(placed, 0) - 96.0).abs() < 1e-6);
    }

    #[test]
    fn test_touching_blocker_is_not_requeued() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 12.0, 10.0));
        let index = Arc::new(ObstacleIndex::build(&board).unwrap());
        let mut solver = SeedingSolver::new(index, SeedingOptions::default());
        let candidate = Candidate {
            rect: Rect::from_corners(0.0, 0.0, 10.0, 10.0),
            z: vec![0],
        };
        let touching = Blocker {
            rect: Rect::from_corners(10.0, 0.0, 12.0, 10.0),
            z: vec![0],
        };

        solver.subdivide(&candidate, touching);
        assert_eq!(solver.stats().rejected_self, 1);
        assert_eq!(solver.pending(), 1);
    }

    #[test]
    fn test_shared_free_space_stays_multi_layer() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 20.0, 10.0))
            .with_layer_count(2)
            .with_obstacle(Obstacle::new(ObstacleShape::rect(Point::new(5.0, 5.0), 2.0, 2.0)))
            .with_obstacle(
                Obstacle::new(ObstacleShape::rect(Point::new(15.0, 5.0), 2.0, 2.0)).on_layers(&["top"]),
            );
        let solver = run(&board);
        let placed = solver.placed();

        for strip in [
            Rect::from_corners(0.0, 0.0, 20.0, 4.0),
            Rect::from_corners(0.0, 6.0, 20.0, 10.0),
        ] {
            assert!(placed.iter().any(|p| p.z == vec![0, 1] && p.rect == strip));
        }
        assert!((total_area(placed, 0) - 192.0).abs() < 1e-6);
        assert!((total_area(placed, 1) - 196.0).abs() < 1e-6);
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!(a.shares_layer_with(&b.z) && a.rect.overlaps_interior(&b.rect)));
            }
        }
    }

    #[test]
    fn test_candidate_budget_stops_seeding() {
        let mut board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0));
        for i in 0..5 {
            board = board.with_obstacle(Obstacle::new(ObstacleShape::rect(
                Point::new(1.0 + 2.0 * i as f64, 5.0),
                0.5,
                0.5,
            )));
        }
        board.options.seeding.max_candidates = 3;
        let solver = run(&board);
        assert_eq!(solver.stats().examined, 3);
        assert!(solver.pending() > 0);
    }

    #[test]
    fn test_outline_voids_excluded() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0)).with_outline(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let solver = run(&board);
        let void = Rect::from_corners(5.0, 5.0, 10.0, 10.0);
        assert!(solver.placed().iter().all(|p| !p.rect.overlaps_interior(&void)));
        assert!((total_area(solver.placed(), 0) - 75.0).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_slivers_dropped() {
        let mut board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0))
            .with_obstacle(Obstacle::new(ObstacleShape::rect(Point::new(5.0, 5.05), 10.0, 9.9)));
        board.options.seeding.min_seed_size = 0.2;
        let solver = run(&board);
        assert!(solver.placed().is_empty());
        assert!(solver.stats().dropped_small >= 1);
    }

    #[test]
    fn test_output_carries_layer_metadata() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 4.0, 4.0)).with_layer_count(3);
        let output = run(&board).output();
        assert_eq!(output.layer_names, vec!["top", "inner1", "bottom"]);
        assert_eq!(output.bounds, Rect::from_corners(0.0, 0.0, 4.0, 4.0));
        assert_eq!(output.candidates_examined, 1);
    }
}
