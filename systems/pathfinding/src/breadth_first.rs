//! Breadth-first search over the open cells of a grid.

use std::collections::VecDeque;

use maze_chase_core::{CellCoord, Grid, Path};

use crate::{settle_trivial, Trail};

/// Returns a shortest route, recording each cell's predecessor when first discovered.
#[must_use]
pub fn search(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Path> {
    if let Some(settled) = settle_trivial(grid, start, goal) {
        return settled;
    }

    let mut trail = Trail::new(grid, start);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return trail.path_to(goal);
        }

        for next in grid.open_neighbors(current) {
            if trail.is_discovered(next) {
                continue;
            }
            trail.link(next, current);
            queue.push_back(next);
        }
    }

    None
}
