//! Bounded best-first search over a uniform grid anchored on the start point

use crate::pathfinding::Navigator;
use crate::pathfinding::obstacles::{Obstacle, any_collides};
use bevy::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::f32::consts::SQRT_2;

/// Discrete cell coordinate, `floor(world / cell_size)` on each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    pub x: i32,
    pub y: i32,
}

impl GridKey {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_world(position: Vec2, cell_size: f32) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i32,
            y: (position.y / cell_size).floor() as i32,
        }
    }
}

/// Lattice steps in expansion order: E, W, N, S, NE, SE, NW, SW
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// How a bounded search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Came within two cells of the goal
    Found,
    /// Hit the expansion cap first
    BudgetExhausted,
    /// Every reachable cell was expanded without getting close enough
    OpenSetEmpty,
}

/// Result of a bounded search together with how much work it did
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Start-to-goal waypoints; empty unless `outcome` is `Found`
    pub path: Vec<Vec2>,
    pub expansions: usize,
    pub outcome: SearchOutcome,
}

impl SearchReport {
    pub fn is_found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }
}

#[derive(Debug, Clone)]
struct SearchNode {
    lattice: (i32, i32),
    position: Vec2,
    g: f32,
    f: f32,
    parent: Option<usize>,
    /// Insertion order into the open set, used to break ties on `f`
    seq: u64,
    closed: bool,
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // BinaryHeap is a max-heap: lowest f first, then earliest insertion
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Working state of one search call
struct SearchArena {
    origin: Vec2,
    goal: Vec2,
    cell_size: f32,
    nodes: Vec<SearchNode>,
    by_key: HashMap<GridKey, usize>,
    open: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl SearchArena {
    fn new(origin: Vec2, goal: Vec2, cell_size: f32) -> Self {
        Self {
            origin,
            goal,
            cell_size,
            nodes: Vec::new(),
            by_key: HashMap::new(),
            open: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn lattice_position(&self, lattice: (i32, i32)) -> Vec2 {
        self.origin + Vec2::new(lattice.0 as f32, lattice.1 as f32) * self.cell_size
    }

    fn key_of(&self, position: Vec2) -> GridKey {
        GridKey::from_world(position, self.cell_size)
    }

    /// Record a better route to `lattice`, opening the node if it is new
    fn relax(&mut self, lattice: (i32, i32), position: Vec2, g: f32, parent: Option<usize>) {
        let f = g + position.distance(self.goal);
        let key = self.key_of(position);

        let index = match self.by_key.get(&key) {
            Some(&index) => {
                let node = &mut self.nodes[index];
                if node.closed || g >= node.g {
                    return;
                }
                node.g = g;
                node.f = f;
                node.parent = parent;
                index
            }
            None => {
                let index = self.nodes.len();
                self.nodes.push(SearchNode {
                    lattice,
                    position,
                    g,
                    f,
                    parent,
                    seq: self.next_seq,
                    closed: false,
                });
                self.next_seq += 1;
                self.by_key.insert(key, index);
                index
            }
        };

        let node = &self.nodes[index];
        self.open.push(OpenEntry {
            f: node.f,
            seq: node.seq,
            node: index,
        });
    }

    /// Pop the lowest-f open node, skipping superseded heap entries
    fn pop_open(&mut self) -> Option<usize> {
        while let Some(entry) = self.open.pop() {
            let node = &self.nodes[entry.node];
            if node.closed || node.f != entry.f {
                continue;
            }
            return Some(entry.node);
        }
        None
    }

    fn is_closed(&self, position: Vec2) -> bool {
        self.by_key
            .get(&self.key_of(position))
            .is_some_and(|&index| self.nodes[index].closed)
    }

    /// Walk back-pointers from `index` and finish on the literal goal
    fn reconstruct(&self, index: usize) -> Vec<Vec2> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            path.push(self.nodes[i].position);
            current = self.nodes[i].parent;
        }
        path.reverse();
        path.push(self.goal);
        path
    }
}

impl Navigator {
    /// Bounded A* from `start` toward `goal` for a disc of `radius`.
    ///
    /// Returns the waypoints from start to goal, or an empty path if the search
    /// ran out of budget or room before coming within two cells of the goal.
    pub fn find_bounded_path<O: Obstacle>(
        &self,
        start: Vec2,
        goal: Vec2,
        obstacles: &[O],
        radius: f32,
    ) -> Vec<Vec2> {
        self.find_bounded_path_report(start, goal, obstacles, radius)
            .path
    }

    /// Same search as [`Navigator::find_bounded_path`], also reporting how it ended
    pub fn find_bounded_path_report<O: Obstacle>(
        &self,
        start: Vec2,
        goal: Vec2,
        obstacles: &[O],
        radius: f32,
    ) -> SearchReport {
        let cell_size = self.config().cell_size;
        let max_expansions = self.config().max_expansions;
        let success_distance = cell_size * 2.0;

        let mut arena = SearchArena::new(start, goal, cell_size);
        arena.relax((0, 0), start, 0.0, None);

        let mut expansions = 0;
        let found = loop {
            if expansions >= max_expansions {
                break None;
            }
            let Some(current) = arena.pop_open() else {
                break None;
            };
            expansions += 1;
            arena.nodes[current].closed = true;

            let (position, lattice, g) = {
                let node = &arena.nodes[current];
                (node.position, node.lattice, node.g)
            };
            if position.distance(goal) < success_distance {
                break Some(current);
            }

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let next_lattice = (lattice.0 + dx, lattice.1 + dy);
                let next_position = arena.lattice_position(next_lattice);

                if arena.is_closed(next_position)
                    || any_collides(obstacles, next_position, radius)
                {
                    continue;
                }

                let step = if dx != 0 && dy != 0 {
                    cell_size * SQRT_2
                } else {
                    cell_size
                };
                arena.relax(next_lattice, next_position, g + step, Some(current));
            }
        };

        match found {
            Some(index) => {
                let path = arena.reconstruct(index);
                debug!(
                    "Bounded search found {} waypoints from ({:.1}, {:.1}) to ({:.1}, {:.1}) after {} expansions",
                    path.len(),
                    start.x,
                    start.y,
                    goal.x,
                    goal.y,
                    expansions
                );
                SearchReport {
                    path,
                    expansions,
                    outcome: SearchOutcome::Found,
                }
            }
            None => {
                let outcome = if expansions >= max_expansions {
                    SearchOutcome::BudgetExhausted
                } else {
                    SearchOutcome::OpenSetEmpty
                };
                debug!(
                    "Bounded search gave up on ({:.1}, {:.1}) -> ({:.1}, {:.1}): {:?} after {} expansions",
                    start.x, start.y, goal.x, goal.y, outcome, expansions
                );
                SearchReport {
                    path: Vec::new(),
                    expansions,
                    outcome,
                }
            }
        }
    }
}
