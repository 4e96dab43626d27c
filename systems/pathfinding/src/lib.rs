#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid-constrained shortest-path search that yields only the first step.
//!
//! The search is an A* over 4-connected cells with unit step cost and the
//! Manhattan heuristic. Nodes are stored in an index arena that lives only for
//! the duration of a single [`Pathfinder::first_step`] call; parents are arena
//! indices rather than owned links.
//!
//! Among open nodes with the same `f = g + h`, the node with the smaller `h`
//! is expanded first, and remaining ties go to the node that was queued first.
//! Neighbours are queued west, east, north, south.

use std::{cmp::Ordering, collections::BinaryHeap};

use log::trace;
use maze_chase_core::{CellCoord, GridQuery, Heading, Step};

const EXPANSION_ORDER: [Heading; 4] = [
    Heading::WEST,
    Heading::EAST,
    Heading::NORTH,
    Heading::SOUTH,
];

/// Reusable A* workspace.
///
/// Buffers keep their capacity between calls but never carry nodes from one
/// search into the next.
#[derive(Debug, Default)]
pub struct Pathfinder {
    nodes: Vec<SearchNode>,
    open: BinaryHeap<OpenEntry>,
    visited: Vec<bool>,
}

impl Pathfinder {
    /// Creates a new pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first cell on a shortest path from `start` to `goal`.
    ///
    /// When `start` equals `goal` the start cell itself is returned. `None`
    /// signals that the goal cannot be reached; callers keep whatever heading
    /// they already had.
    pub fn first_step<G>(
        &mut self,
        grid: &G,
        start: CellCoord,
        goal: CellCoord,
    ) -> Option<CellCoord>
    where
        G: GridQuery + ?Sized,
    {
        let step = self.search(grid, start, goal);
        self.nodes.clear();
        self.open.clear();
        if step.is_none() {
            trace!("no route from {start:?} to {goal:?}");
        }
        step
    }

    fn search<G>(&mut self, grid: &G, start: CellCoord, goal: CellCoord) -> Option<CellCoord>
    where
        G: GridQuery + ?Sized,
    {
        let width = usize::try_from(grid.columns()).ok()?;
        let height = usize::try_from(grid.rows()).ok()?;
        let cell_count = width.checked_mul(height)?;
        self.visited.clear();
        self.visited.resize(cell_count, false);

        let _ = index(width, grid, start)?;
        self.push(SearchNode {
            cell: start,
            parent: None,
            cost: 0,
            estimate: start.manhattan_distance(goal),
        });

        while let Some(entry) = self.open.pop() {
            let node = self.nodes[entry.node];
            let Some(slot) = index(width, grid, node.cell) else {
                continue;
            };
            if self.visited[slot] {
                continue;
            }

            if node.cell == goal {
                return Some(self.initial_step(entry.node));
            }

            self.visited[slot] = true;

            for heading in EXPANSION_ORDER {
                let neighbor = node.cell.offset(heading);
                if !grid.is_free(neighbor) {
                    continue;
                }
                self.push(SearchNode {
                    cell: neighbor,
                    parent: Some(entry.node),
                    cost: node.cost + 1,
                    estimate: neighbor.manhattan_distance(goal),
                });
            }
        }

        None
    }

    fn push(&mut self, node: SearchNode) {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.open.push(OpenEntry {
            total: node.cost + node.estimate,
            estimate: node.estimate,
            node: id,
        });
    }

    fn initial_step(&self, mut id: usize) -> CellCoord {
        while self.nodes[id].cost > 1 {
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        self.nodes[id].cell
    }
}

/// Converts a single step into a heading by taking the sign of each delta.
#[must_use]
pub fn heading_between(from: CellCoord, to: CellCoord) -> Heading {
    Heading::new(
        Step::from_sign(to.column() - from.column()),
        Step::from_sign(to.row() - from.row()),
    )
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    cell: CellCoord,
    parent: Option<usize>,
    cost: u32,
    estimate: u32,
}

/// Heap entry; the arena index doubles as insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    total: u32,
    estimate: u32,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total
            .cmp(&self.total)
            .then_with(|| other.estimate.cmp(&self.estimate))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn index<G>(width: usize, grid: &G, cell: CellCoord) -> Option<usize>
where
    G: GridQuery + ?Sized,
{
    if !grid.contains(cell) {
        return None;
    }
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
