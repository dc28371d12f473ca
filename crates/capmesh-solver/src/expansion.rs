//! Expansion: grow every placed seed until it touches something.
//!
//! Work is a queue of `(rect, side)` probes. A probe casts the search strip
//! from that side to the board edge and finds, per layer, the nearest
//! obstacle or other rect in it; the side then moves exactly onto the
//! nearest one. Two rects facing each other across open space split the gap
//! at its midline: the first to probe takes half and marks its side as
//! resolved, so the other grows the rest of the way and they meet with no
//! gap. When the nearest blocker sits on only some of a rect's layers, the
//! rect is split by layer and the unobstructed layers keep growing.

use std::collections::VecDeque;
use std::sync::Arc;

use capmesh_core::geometry::search_strip;
use capmesh_core::{ExpansionOptions, MeshNode, ObstacleIndex, Rect, Side, ZIndex, EPSILON};
use capmesh_renderer::{palette, Scene};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::placement::{placements_to_nodes, Placement, PlacementIndex};
use crate::seeding::SeedingOutput;

/// How far a side's growth question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideState {
    /// Not probed yet.
    Open,
    /// Resting against an obstacle, a resolved rect or the board edge.
    Contact,
    /// Stopped halfway across a gap shared with another growing rect.
    Midline,
}

#[derive(Debug, Clone)]
struct GrowingRect {
    placement: Placement,
    sides: [SideState; 4],
}

impl GrowingRect {
    fn new(placement: Placement) -> Self {
        Self {
            placement,
            sides: [SideState::Open; 4],
        }
    }

    fn side(&self, side: Side) -> SideState {
        self.sides[side.index()]
    }
}

/// Nearest stop on one layer for one probe.
#[derive(Debug, Clone, Copy)]
struct LayerLimit {
    z: ZIndex,
    distance: f64,
    midline: bool,
}

impl LayerLimit {
    /// Take `distance` if it is nearer. At equal distance a hard stop
    /// overrides a midline.
    fn tighten(&mut self, distance: f64, midline: bool) {
        if distance < self.distance - EPSILON {
            self.distance = distance;
            self.midline = midline;
        } else if distance <= self.distance + EPSILON {
            self.distance = self.distance.min(distance);
            self.midline &= midline;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionOutput {
    pub mesh_nodes: Vec<MeshNode>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExpansionStats {
    pub probes: usize,
    pub grown: usize,
    pub splits: usize,
    pub midlines: usize,
}

pub struct ExpansionSolver {
    index: Arc<ObstacleIndex>,
    options: ExpansionOptions,
    bounds: Rect,
    rects: Vec<GrowingRect>,
    footprints: PlacementIndex,
    queue: VecDeque<(usize, Side)>,
    settling: bool,
    stats: ExpansionStats,
    done: bool,
}

impl ExpansionSolver {
    pub fn new(index: Arc<ObstacleIndex>, seeds: &SeedingOutput, options: ExpansionOptions) -> Self {
        Self::from_placements(index, seeds.bounds, seeds.placed.clone(), options)
    }

    /// Start from an explicit set of placements inside `bounds`.
    pub fn from_placements(
        index: Arc<ObstacleIndex>,
        bounds: Rect,
        placements: Vec<Placement>,
        options: ExpansionOptions,
    ) -> Self {
        let mut footprints = PlacementIndex::new();
        let mut queue = VecDeque::with_capacity(placements.len() * 4);
        for (i, p) in placements.iter().enumerate() {
            footprints.insert(i, p.rect);
            queue.extend(Side::ALL.iter().map(|&s| (i, s)));
        }
        Self {
            index,
            options,
            bounds,
            rects: placements.into_iter().map(GrowingRect::new).collect(),
            footprints,
            queue,
            settling: false,
            stats: ExpansionStats::default(),
            done: false,
        }
    }

    /// Run one probe.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        let Some((i, side)) = self.queue.pop_front() else {
            self.advance_pass();
            return;
        };
        // Sides opened by a split during the settle pass probe without contention.
        match self.rects[i].side(side) {
            SideState::Open => self.probe(i, side, !self.settling),
            SideState::Midline if self.settling => self.probe(i, side, false),
            _ => {}
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn stats(&self) -> ExpansionStats {
        self.stats
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.rects.iter().map(|r| &r.placement)
    }

    pub fn side_state(&self, rect: usize, side: Side) -> Option<SideState> {
        self.rects.get(rect).map(|r| r.side(side))
    }

    pub fn output(&self) -> ExpansionOutput {
        ExpansionOutput {
            mesh_nodes: placements_to_nodes(self.placements()),
        }
    }

    pub fn visualize(&self) -> Scene {
        let mut scene = capmesh_renderer::board_scene(&self.index, "expansion");
        for (i, r) in self.rects.iter().enumerate() {
            let p = &r.placement;
            scene.add_filled_rect(
                &p.rect,
                palette::layer_color(&p.z),
                0.35,
                &format!("rect {}", i),
                Some(capmesh_core::mesh_node::layer_label(&p.z)),
            );
        }
        if let Some(&(i, _)) = self.queue.front() {
            let rect = &self.rects[i].placement.rect;
            scene.add_point(&rect.center(), palette::CANDIDATE, "next probe");
        }
        scene
    }

    /// The probe queue ran dry: start the settle pass, or finish.
    fn advance_pass(&mut self) {
        if !self.settling && self.options.settle_midlines {
            self.settling = true;
            for (i, r) in self.rects.iter().enumerate() {
                for side in Side::ALL {
                    if r.side(side) == SideState::Midline {
                        self.queue.push_back((i, side));
                    }
                }
            }
            debug!("Settling {} midline sides", self.queue.len());
            if !self.queue.is_empty() {
                return;
            }
        }
        self.done = true;
        info!(
            "Expansion finished: {} rects, {} probes, {} grown, {} splits",
            self.rects.len(),
            self.stats.probes,
            self.stats.grown,
            self.stats.splits
        );
    }

    fn probe(&mut self, i: usize, side: Side, allow_midline: bool) {
        self.stats.probes += 1;
        let limits = self.layer_limits(i, side, allow_midline);

        let nearest = limits.iter().map(|l| l.distance).fold(f64::INFINITY, f64::min);
        let nearest = if nearest.is_finite() { nearest } else { 0.0 };
        let (constrained, free): (Vec<LayerLimit>, Vec<LayerLimit>) =
            limits.into_iter().partition(|l| l.distance <= nearest + EPSILON);

        if !free.is_empty() {
            let next = free.iter().map(|l| l.distance).fold(f64::INFINITY, f64::min);
            if next - nearest >= self.options.min_split_gain {
                self.split(i, &free);
            }
        }

        // The side rests on a midline only if no constrained layer has a hard stop there.
        let state = if constrained.iter().all(|l| l.midline) && !constrained.is_empty() {
            self.stats.midlines += 1;
            SideState::Midline
        } else {
            SideState::Contact
        };
        self.grow(i, side, nearest);
        self.rects[i].sides[side.index()] = state;
    }

    /// Nearest stop on each of rect `i`'s layers in direction `side`.
    fn layer_limits(&self, i: usize, side: Side, allow_midline: bool) -> Vec<LayerLimit> {
        let me = &self.rects[i].placement;
        let reach = ((self.bounds.edge(side) - me.rect.edge(side)) * side.sign()).max(0.0);
        let mut limits: Vec<LayerLimit> = me
            .z
            .iter()
            .map(|&z| LayerLimit {
                z,
                distance: reach,
                midline: false,
            })
            .collect();
        if reach < EPSILON {
            return limits;
        }

        let strip = search_strip(&me.rect, side, &self.bounds);
        for limit in limits.iter_mut() {
            for entry in self.index.query(limit.z, &strip) {
                limit.tighten(me.rect.gap_to(&entry.rect, side), false);
            }
        }

        for j in self.footprints.overlapping(&strip) {
            if j == i {
                continue;
            }
            let other = &self.rects[j];
            if !other.placement.shares_layer_with(&me.z) {
                continue;
            }
            let gap = me.rect.gap_to(&other.placement.rect, side);
            let contested = allow_midline && other.side(side.opposite()) == SideState::Open;
            let d = if contested { gap / 2.0 } else { gap };
            for limit in limits.iter_mut().filter(|l| other.placement.z.contains(&l.z)) {
                limit.tighten(d, contested);
            }
        }
        limits
    }

    /// Move the layers in `free` out of rect `i` into a new rect with the
    /// same footprint. The new rect probes every side again.
    fn split(&mut self, i: usize, free: &[LayerLimit]) {
        let free_z: Vec<ZIndex> = free.iter().map(|l| l.z).collect();
        let parent = &mut self.rects[i].placement;
        parent.z.retain(|z| !free_z.contains(z));
        let child = Placement::new(parent.rect, &free_z);
        debug!("Splitting rect {} on z{:?} off z{:?}", i, free_z, parent.z);

        let j = self.rects.len();
        self.footprints.insert(j, child.rect);
        self.rects.push(GrowingRect::new(child));
        self.queue.extend(Side::ALL.iter().map(|&s| (j, s)));
        self.stats.splits += 1;
    }

    fn grow(&mut self, i: usize, side: Side, distance: f64) {
        if distance < EPSILON {
            return;
        }
        let old = self.rects[i].placement.rect;
        let new = old.with_edge(side, old.edge(side) + side.sign() * distance);
        self.rects[i].placement.rect = new;
        self.footprints.update(i, old, new);
        self.stats.grown += 1;
    }
}
